use serde::Deserialize;
use std::path::PathBuf;

use crate::geometry::DistanceMode;
use crate::geometry::minimap::{MINIMAP_SCALE, MINIMAP_SIZE};
use crate::sim::{PhysicsConfig, ScriptStep};

fn default_frames() -> u64 {
    600
}
fn default_frame_ms() -> f64 {
    16.0
}
fn default_total_laps() -> u32 {
    3
}
fn default_verbose() -> bool {
    false
}
fn default_startup_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Simulated wall time per frame
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
    #[serde(default = "default_total_laps")]
    pub total_laps: u32,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub distance_mode: DistanceMode,
    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,
    #[serde(default)]
    pub trace: Option<PathBuf>,
    #[serde(default)]
    pub track: Option<TrackConfig>,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub minimap: MinimapConfig,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_ms: default_frame_ms(),
            total_laps: default_total_laps(),
            verbose: default_verbose(),
            distance_mode: DistanceMode::default(),
            startup_timeout_ms: default_startup_timeout_ms(),
            trace: None,
            track: None,
            physics: PhysicsConfig::default(),
            minimap: MinimapConfig::default(),
            script: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackConfig {
    /// Boundary ring as [x, z] pairs
    pub waypoints: Vec<(f64, f64)>,
}

fn default_minimap_size() -> f64 {
    MINIMAP_SIZE
}

fn default_minimap_scale() -> f64 {
    MINIMAP_SCALE
}

/// Margin kept around the track when the minimap is auto-fitted
fn default_minimap_margin() -> f64 {
    10.0
}

#[derive(Debug, Deserialize, Clone)]
pub struct MinimapConfig {
    #[serde(default = "default_minimap_size")]
    pub size: f64,
    #[serde(default = "default_minimap_scale")]
    pub scale: f64,
    #[serde(default)]
    pub auto_fit: bool,
    #[serde(default = "default_minimap_margin")]
    pub margin: f64,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            size: default_minimap_size(),
            scale: default_minimap_scale(),
            auto_fit: false,
            margin: default_minimap_margin(),
        }
    }
}

impl FileConfig {
    /// First parseable config on the search path, with where it came from
    pub fn load() -> Option<(PathBuf, Self)> {
        Self::load_from(&get_config_paths())
    }

    /// Candidates in order; unparseable files are warned about and skipped
    fn load_from(paths: &[PathBuf]) -> Option<(PathBuf, Self)> {
        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some((path.clone(), config)),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("trackside.toml"));
    paths.push(PathBuf::from(".trackside.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("trackside").join("config.toml"));
        paths.push(config_dir.join("trackside.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".trackside.toml"));
        paths.push(home.join(".config").join("trackside").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert_eq!(config.frames, 600);
        assert_eq!(config.frame_ms, 16.0);
        assert_eq!(config.total_laps, 3);
        assert_eq!(config.distance_mode, DistanceMode::Vertex);
        assert_eq!(config.physics, PhysicsConfig::default());
        assert_eq!(config.minimap.size, 150.0);
        assert!(config.track.is_none());
        assert!(config.script.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            frames = 240
            distance_mode = "segment"
            trace = "run.jsonl"

            [track]
            waypoints = [[0.0, 0.0], [40.0, 0.0], [40.0, 40.0], [0.0, 40.0]]

            [physics]
            max_speed = 2.0

            [minimap]
            auto_fit = true

            [[script]]
            frames = 60
            keys = ["w"]

            [[script]]
            frames = 30
            keys = ["w", "ArrowLeft"]
            "#,
        )
        .unwrap();

        assert_eq!(config.frames, 240);
        assert_eq!(config.distance_mode, DistanceMode::Segment);
        assert_eq!(config.trace, Some(PathBuf::from("run.jsonl")));
        assert_eq!(config.track.unwrap().waypoints.len(), 4);
        assert_eq!(config.physics.max_speed, 2.0);
        assert_eq!(config.physics.acceleration, 0.02);
        assert!(config.minimap.auto_fit);
        assert_eq!(config.minimap.scale, 0.5);
        assert_eq!(config.script.len(), 2);
        assert_eq!(config.script[1].keys, vec!["w", "ArrowLeft"]);
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trackside.toml");
        std::fs::write(&path, "total_laps = 5\nverbose = true\n").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let config: FileConfig = toml::from_str(&contents).unwrap();
        assert_eq!(config.total_laps, 5);
        assert!(config.verbose);
    }

    #[test]
    fn test_load_skips_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let broken = dir.path().join("trackside.toml");
        let good = dir.path().join(".trackside.toml");
        std::fs::write(&broken, "frames = \"many\"\n").unwrap();
        std::fs::write(&good, "frames = 90\n").unwrap();

        let (path, config) = FileConfig::load_from(&[missing, broken, good.clone()]).unwrap();
        assert_eq!(path, good);
        assert_eq!(config.frames, 90);
    }

    #[test]
    fn test_load_without_candidates() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::load_from(&[dir.path().join("none.toml")]).is_none());
    }

    #[test]
    fn test_bad_distance_mode_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("distance_mode = \"manhattan\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_paths_start_local() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("trackside.toml"));
        assert_eq!(paths[1], PathBuf::from(".trackside.toml"));
    }
}
