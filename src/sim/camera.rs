use serde::Serialize;

use super::{CarState, Vec3};

/// Camera placement relative to the car, in the car's frame
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 3.0, -7.0);

/// Where the camera sits before the first frame
const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 5.0, -10.0);

/// Chase camera: position plus the point it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            look_at: Vec3::default(),
        }
    }
}

impl CameraRig {
    /// Snap behind and above the car, looking at it
    pub fn follow(car: &CarState) -> Self {
        Self {
            position: car.position.add(FOLLOW_OFFSET.rotate_y(car.heading)),
            look_at: car.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_follow_straight_ahead() {
        let car = CarState {
            position: Vec3::new(1.0, 0.25, 2.0),
            heading: 0.0,
            speed: 0.0,
        };
        let rig = CameraRig::follow(&car);
        assert_eq!(rig.position, Vec3::new(1.0, 3.25, -5.0));
        assert_eq!(rig.look_at, car.position);
    }

    #[test]
    fn test_follow_rotates_with_heading() {
        let car = CarState {
            position: Vec3::new(0.0, 0.25, 0.0),
            heading: FRAC_PI_2,
            speed: 0.0,
        };
        let rig = CameraRig::follow(&car);
        // facing +X, so the camera trails along -X
        assert!((rig.position.x + 7.0).abs() < 1e-9);
        assert!(rig.position.z.abs() < 1e-9);
        assert!((rig.position.y - 3.25).abs() < 1e-12);
    }
}
