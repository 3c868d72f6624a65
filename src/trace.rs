use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::Surface;
use crate::hud::HudFrame;
use crate::sim::{FrameReport, GameState, Vec3};

/// One line of the frame trace
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord<'a> {
    pub frame: u64,
    pub position: Vec3,
    pub heading: f64,
    pub speed: f64,
    pub surface: Surface,
    pub was_outside: bool,
    pub speedometer: &'a str,
    pub lap: &'a str,
    pub fps: &'a str,
}

impl<'a> FrameRecord<'a> {
    pub fn new(state: &GameState, report: &FrameReport, hud: &'a HudFrame) -> Self {
        Self {
            frame: state.frame,
            position: state.car.position,
            heading: state.car.heading,
            speed: state.car.speed,
            surface: report.surface,
            was_outside: report.was_outside,
            speedometer: &hud.speedometer,
            lap: &hud.lap,
            fps: &hud.fps,
        }
    }
}

/// Writes frames as JSON lines
///
/// Each frame is one object on its own line, so partial runs stay readable.
pub struct TraceWriter<W: Write> {
    writer: W,
    frames: u64,
}

impl TraceWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create trace file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    pub fn write(&mut self, record: &FrameRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).context("Failed to encode frame")?;
        self.writer
            .write_all(b"\n")
            .context("Failed to write trace file")?;
        self.frames += 1;
        Ok(())
    }

    /// Flush and report how many frames were written
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush().context("Failed to write trace file")?;
        Ok(self.frames)
    }
}
