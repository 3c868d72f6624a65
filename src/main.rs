use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use trackside::config::FileConfig;
use trackside::domain::{Surface, Track};
use trackside::geometry::{Bounds, DistanceMode, MinimapProjector};
use trackside::hud::render;
use trackside::sim::{GameState, InputScript, SimSettings, step};
use trackside::startup::readiness;
use trackside::trace::{FrameRecord, TraceWriter};

/// Drive the racing demo headlessly and report what the HUD would show
///
/// Examples:
///   # Hold the throttle for ten seconds on the built-in circuit
///   trackside --frames 600
///
///   # Throttle and steer left, measuring true edge distance
///   trackside --keys w,a --distance-mode segment
///
///   # Scripted run from a config file, writing a frame trace
///   trackside --config lap.toml --trace lap.jsonl
#[derive(Parser, Debug)]
#[command(name = "trackside")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches trackside.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short = 'n', long)]
    frames: Option<u64>,

    /// Simulated milliseconds per frame
    #[arg(long)]
    frame_ms: Option<f64>,

    /// Total laps shown on the lap counter
    #[arg(long)]
    laps: Option<u32>,

    /// Keys held for the whole run when the config has no script (comma separated)
    #[arg(short = 'k', long, value_delimiter = ',', default_value = "w")]
    keys: Vec<String>,

    /// Boundary distance measurement: vertex (default) or segment
    #[arg(long)]
    distance_mode: Option<DistanceMode>,

    /// Write one JSON object per frame to this file
    #[arg(short = 't', long)]
    trace: Option<PathBuf>,

    /// Fit the whole track into the minimap instead of centering the origin
    #[arg(long)]
    auto_fit: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Default)]
struct RunStats {
    track_frames: u64,
    gravel_frames: u64,
    grass_frames: u64,
    corrections: u64,
    excursions: u64,
    top_speed: f64,
    distance: f64,
}

impl RunStats {
    fn record(&mut self, surface: Surface, was_outside: bool, speed: f64) {
        match surface {
            Surface::Track => self.track_frames += 1,
            Surface::Gravel => self.gravel_frames += 1,
            Surface::Grass => self.grass_frames += 1,
        }
        if was_outside {
            self.corrections += 1;
        }
        self.top_speed = self.top_speed.max(speed.abs());
        self.distance += speed.abs();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let (config_source, file_config): (Option<PathBuf>, FileConfig) =
        if let Some(ref config_path) = args.config {
            if config_path.exists() {
                let contents = std::fs::read_to_string(config_path)
                    .context(format!("Failed to read config file: {:?}", config_path))?;
                let config = toml::from_str(&contents).context("Failed to parse config file")?;
                (Some(config_path.clone()), config)
            } else {
                bail!("Config file not found: {:?}", config_path);
            }
        } else {
            match FileConfig::load() {
                Some((path, config)) => (Some(path), config),
                None => (None, FileConfig::default()),
            }
        };

    let frames = args.frames.unwrap_or(file_config.frames);
    let frame_ms = args.frame_ms.unwrap_or(file_config.frame_ms);
    let total_laps = args.laps.unwrap_or(file_config.total_laps);
    let distance_mode = args.distance_mode.unwrap_or(file_config.distance_mode);
    let trace_path = args.trace.clone().or_else(|| file_config.trace.clone());
    let auto_fit = args.auto_fit || file_config.minimap.auto_fit;
    let verbose = args.verbose || file_config.verbose;

    if frame_ms <= 0.0 || !frame_ms.is_finite() {
        bail!("--frame-ms must be a positive number, got {}", frame_ms);
    }

    let track = match file_config.track {
        Some(ref track) => {
            Track::from_waypoints(&track.waypoints).context("Invalid track in config file")?
        }
        None => Track::default_circuit(),
    };

    let script = if file_config.script.is_empty() {
        let keys: Vec<&str> = args.keys.iter().map(|k| k.trim()).collect();
        InputScript::hold(&keys, u32::try_from(frames).unwrap_or(u32::MAX))
            .context("Invalid --keys")?
    } else {
        InputScript::new(&file_config.script).context("Invalid script in config file")?
    };

    let minimap = if auto_fit {
        let bounds =
            Bounds::of_boundary(&track.boundary).context("Failed to compute track bounds")?;
        MinimapProjector::fit(&bounds, file_config.minimap.size, file_config.minimap.margin)
    } else {
        MinimapProjector::new(file_config.minimap.size, file_config.minimap.scale)
    };

    let settings = SimSettings {
        physics: file_config.physics.clone(),
        distance_mode,
    };

    println!("trackside - Racing Demo Simulator");
    println!("=================================");
    println!();

    if verbose {
        println!("Configuration:");
        match config_source {
            Some(ref path) => println!("  Config file: {}", path.display()),
            None => println!("  Config file: none (built-in defaults)"),
        }
        println!("  Track: {} boundary points", track.boundary.len());
        println!(
            "  Start: ({:.2}, {:.2}) heading {:.3} rad",
            track.start.x, track.start.z, track.start_heading
        );
        println!("  Frames: {} at {}ms", frames, frame_ms);
        println!("  Scripted frames: {}", script.total_frames());
        println!("  Distance mode: {:?}", distance_mode);
        println!("  Max speed: {}", settings.physics.max_speed);
        println!(
            "  Minimap: {}px, {:.3}px/unit{}",
            minimap.size(),
            minimap.scale_factor(),
            if auto_fit { " (auto-fit)" } else { "" }
        );
        if let Some(ref path) = trace_path {
            println!("  Trace: {}", path.display());
        }
        println!();
    }

    let spinner = create_spinner("Waiting for host...");
    let start = Instant::now();
    let (signal, ready) = readiness();
    let host_trace = trace_path.clone();
    tokio::task::spawn_blocking(move || {
        let sink = host_trace.map(|p| TraceWriter::create(&p)).transpose();
        signal.ready(sink);
    });
    let timeout = Duration::from_millis(file_config.startup_timeout_ms);
    let mut trace = ready
        .wait(timeout)
        .await
        .context("Host failed to start")??;
    spinner.finish_with_message(format!(
        "Host ready [{:.1}s]",
        start.elapsed().as_secs_f32()
    ));

    let progress = create_progress(frames);
    let start = Instant::now();

    let mut state = GameState::new(&track, &settings, total_laps, 0.0);
    let mut stats = RunStats::default();
    let mut outside = false;

    for frame in 0..frames {
        let controls = script.controls_at(frame);
        let now_ms = (frame + 1) as f64 * frame_ms;
        let (next, report) = step(&state, &track, &controls, &settings, now_ms);
        state = next;

        stats.record(report.surface, report.was_outside, state.car.speed);
        if report.was_outside && !outside {
            stats.excursions += 1;
            if verbose {
                progress.println(format!(
                    "Warning: car outside track boundaries at frame {}",
                    state.frame
                ));
            }
        }
        outside = report.was_outside;

        if verbose && let Some(fps) = report.fps_sample {
            progress.println(format!("  frame {}: {} fps", state.frame, fps));
        }

        let hud = render(&state, &track, &minimap);
        if let Some(ref mut writer) = trace {
            writer.write(&FrameRecord::new(&state, &report, &hud))?;
        }

        progress.set_message(format!("{} | {}", hud.speedometer, report.surface.as_str()));
        progress.inc(1);
    }

    progress.finish_with_message(format!(
        "Simulated {} frames [{:.1}s]",
        frames,
        start.elapsed().as_secs_f32()
    ));

    if let Some(writer) = trace {
        let written = writer.finish().context("Failed to write trace file")?;
        if let Some(ref path) = trace_path {
            println!("Trace: {} frames -> {}", written, path.display());
        }
    }

    let hud = render(&state, &track, &minimap);

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("HUD");
    println!("  {}", hud.speedometer);
    println!("  {}", hud.lap);
    println!("  {}", hud.fps);
    println!(
        "  Minimap car: ({:.1}, {:.1})",
        hud.minimap.car.0, hud.minimap.car.1
    );
    println!();
    print_run_summary(&state, &stats, frames);

    Ok(())
}

fn print_run_summary(state: &GameState, stats: &RunStats, frames: u64) {
    let pct = |n: u64| {
        if frames == 0 {
            0.0
        } else {
            n as f64 * 100.0 / frames as f64
        }
    };

    println!("Run summary");
    println!("===========");
    println!(
        "  Final position: ({:.2}, {:.2}) heading {:.3} rad",
        state.car.position.x, state.car.position.z, state.car.heading
    );
    println!("  Distance driven: {:.1} units", stats.distance);
    println!("  Top speed: {:.0} km/h", stats.top_speed * 100.0);
    println!();
    println!("Surface breakdown:");
    println!(
        "  Track:  {:>6} frames ({:.1}%)",
        stats.track_frames,
        pct(stats.track_frames)
    );
    println!(
        "  Gravel: {:>6} frames ({:.1}%)",
        stats.gravel_frames,
        pct(stats.gravel_frames)
    );
    println!(
        "  Grass:  {:>6} frames ({:.1}%)",
        stats.grass_frames,
        pct(stats.grass_frames)
    );
    println!();
    println!(
        "Boundary corrections: {} frames over {} excursions",
        stats.corrections, stats.excursions
    );
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn create_progress(frames: u64) -> ProgressBar {
    let pb = ProgressBar::new(frames);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb
}
