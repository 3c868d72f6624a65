use serde::{Deserialize, Serialize};

/// Ground type under the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Track,
    Gravel,
    Grass,
}

/// Handling factors for a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceEffects {
    /// Multiplier on the turn rate
    pub grip: f64,
    /// Per-frame speed retention
    pub rolling: f64,
}

impl Surface {
    pub fn effects(self) -> SurfaceEffects {
        match self {
            Surface::Track => SurfaceEffects {
                grip: 1.0,
                rolling: 0.99,
            },
            Surface::Gravel => SurfaceEffects {
                grip: 0.4,
                rolling: 0.90,
            },
            Surface::Grass => SurfaceEffects {
                grip: 0.3,
                rolling: 0.95,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Track => "track",
            Surface::Gravel => "gravel",
            Surface::Grass => "grass",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_has_full_grip() {
        let effects = Surface::Track.effects();
        assert_eq!(effects.grip, 1.0);
        assert!(effects.rolling > Surface::Gravel.effects().rolling);
    }

    #[test]
    fn test_gravel_slows_hardest() {
        let gravel = Surface::Gravel.effects().rolling;
        assert!(gravel < Surface::Grass.effects().rolling);
        assert!(gravel < Surface::Track.effects().rolling);
    }

    #[test]
    fn test_surface_serializes_lowercase() {
        let json = serde_json::to_string(&Surface::Gravel).unwrap();
        assert_eq!(json, "\"gravel\"");
    }
}
