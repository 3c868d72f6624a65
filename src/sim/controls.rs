use serde::Deserialize;
use thiserror::Error;

/// A single driver input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Accelerate,
    Brake,
    TurnLeft,
    TurnRight,
    Handbrake,
}

impl Control {
    /// Map a keyboard key name onto a control, case-insensitively
    pub fn from_key(key: &str) -> Option<Control> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Control::Accelerate),
            "s" | "arrowdown" => Some(Control::Brake),
            "a" | "arrowleft" => Some(Control::TurnLeft),
            "d" | "arrowright" => Some(Control::TurnRight),
            " " | "space" => Some(Control::Handbrake),
            _ => None,
        }
    }
}

/// Which controls are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub accelerate: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub handbrake: bool,
}

impl Controls {
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Accelerate => self.accelerate = pressed,
            Control::Brake => self.brake = pressed,
            Control::TurnLeft => self.turn_left = pressed,
            Control::TurnRight => self.turn_right = pressed,
            Control::Handbrake => self.handbrake = pressed,
        }
    }

    /// Returns false if the key is not bound
    pub fn key_down(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.set(control, true);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.set(control, false);
                true
            }
            None => false,
        }
    }
}

/// One step of a scripted drive: hold `keys` for `frames` frames
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScriptStep {
    pub frames: u32,
    #[serde(default)]
    pub keys: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("script step {step}: unknown key {key:?}")]
    UnknownKey { step: usize, key: String },
}

/// Scripted input, expanded to one `Controls` per frame
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    steps: Vec<(u32, Controls)>,
}

impl InputScript {
    pub fn new(steps: &[ScriptStep]) -> Result<Self, ScriptError> {
        let mut resolved = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            let mut controls = Controls::default();
            for key in &step.keys {
                if !controls.key_down(key) {
                    return Err(ScriptError::UnknownKey {
                        step: index,
                        key: key.clone(),
                    });
                }
            }
            resolved.push((step.frames, controls));
        }

        Ok(Self { steps: resolved })
    }

    /// Hold the same keys for `frames` frames
    pub fn hold(keys: &[&str], frames: u32) -> Result<Self, ScriptError> {
        let step = ScriptStep {
            frames,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        };
        Self::new(&[step])
    }

    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|&(n, _)| n as u64).sum()
    }

    /// Controls for `frame`; nothing is held once the script runs out
    pub fn controls_at(&self, frame: u64) -> Controls {
        let mut remaining = frame;
        for &(frames, controls) in &self.steps {
            if remaining < frames as u64 {
                return controls;
            }
            remaining -= frames as u64;
        }
        Controls::default()
    }
}
