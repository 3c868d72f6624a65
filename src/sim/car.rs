use serde::{Deserialize, Serialize};

use super::Controls;
use crate::domain::{Point2, Track};

/// A point or direction in world space; +Y is up
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate about +Y by `angle` radians
    pub fn rotate_y(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    pub fn add(self, other: Vec3) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Per-frame handling constants
///
/// Values are applied once per frame, not per second.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub max_speed: f64,
    pub acceleration: f64,
    pub braking: f64,
    pub deceleration: f64,
    pub turn_speed: f64,
    pub ground_level: f64,
    pub handbrake_rotation: f64,
    pub drift_decay: f64,
    pub handbrake_min_speed: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_speed: 1.5,
            acceleration: 0.02,
            braking: 0.04,
            deceleration: 0.01,
            turn_speed: 0.02,
            ground_level: 0.25,
            handbrake_rotation: 0.06,
            drift_decay: 0.95,
            handbrake_min_speed: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarState {
    pub position: Vec3,
    /// Yaw in radians; zero faces +Z
    pub heading: f64,
    /// Signed distance travelled per frame
    pub speed: f64,
}

impl CarState {
    /// Parked on the track's starting spot
    pub fn at_start(track: &Track, physics: &PhysicsConfig) -> Self {
        Self {
            position: Vec3::new(track.start.x, physics.ground_level, track.start.z),
            heading: track.start_heading,
            speed: 0.0,
        }
    }

    /// Unit vector the car is facing
    pub fn forward(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0).rotate_y(self.heading)
    }

    pub fn ground_position(&self) -> Point2 {
        Point2::new(self.position.x, self.position.z)
    }

    pub fn set_ground_position(&mut self, point: Point2) {
        self.position.x = point.x;
        self.position.z = point.z;
    }
}

/// Advance the car by one frame
///
/// Speed changes first, then the car moves along its current heading, then
/// it turns. `grip` scales the turn rate and comes from the surface the car
/// was on last frame.
pub fn update_car(
    car: &CarState,
    controls: &Controls,
    grip: f64,
    physics: &PhysicsConfig,
) -> CarState {
    let mut next = *car;

    if controls.accelerate {
        next.speed += physics.acceleration;
    }
    if controls.brake {
        next.speed -= physics.braking;
    }
    if !controls.accelerate && !controls.brake {
        next.speed *= 1.0 - physics.deceleration;
    }

    next.speed = next.speed.clamp(-physics.max_speed, physics.max_speed);

    let drifting = controls.handbrake && next.speed.abs() >= physics.handbrake_min_speed;
    if drifting {
        next.speed *= physics.drift_decay;
    }

    next.position = next.position.add(next.forward().scale(next.speed));

    let turn_rate = if drifting {
        physics.handbrake_rotation
    } else {
        physics.turn_speed
    } * grip;

    if controls.turn_left {
        next.heading += turn_rate;
    }
    if controls.turn_right {
        next.heading -= turn_rate;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn parked(heading: f64) -> CarState {
        CarState {
            position: Vec3::new(0.0, 0.25, 0.0),
            heading,
            speed: 0.0,
        }
    }

    fn held(f: impl FnOnce(&mut Controls)) -> Controls {
        let mut controls = Controls::default();
        f(&mut controls);
        controls
    }

    #[test]
    fn test_forward_vector() {
        let car = parked(FRAC_PI_2);
        let forward = car.forward();
        assert!((forward.x - 1.0).abs() < 1e-12);
        assert!(forward.z.abs() < 1e-12);
    }

    #[test]
    fn test_accelerate_moves_forward() {
        let physics = PhysicsConfig::default();
        let controls = held(|c| c.accelerate = true);

        let car = update_car(&parked(FRAC_PI_2), &controls, 1.0, &physics);
        assert!((car.speed - 0.02).abs() < 1e-12);
        assert!((car.position.x - 0.02).abs() < 1e-12);
        assert_eq!(car.position.y, 0.25);
    }

    #[test]
    fn test_speed_clamped() {
        let physics = PhysicsConfig::default();
        let controls = held(|c| c.accelerate = true);

        let mut car = parked(0.0);
        for _ in 0..200 {
            car = update_car(&car, &controls, 1.0, &physics);
        }
        assert_eq!(car.speed, physics.max_speed);

        let reverse = held(|c| c.brake = true);
        for _ in 0..200 {
            car = update_car(&car, &reverse, 1.0, &physics);
        }
        assert_eq!(car.speed, -physics.max_speed);
    }

    #[test]
    fn test_coasting_decays() {
        let physics = PhysicsConfig::default();
        let mut car = parked(0.0);
        car.speed = 1.0;

        let car = update_car(&car, &Controls::default(), 1.0, &physics);
        assert!((car.speed - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_turn_after_move() {
        let physics = PhysicsConfig::default();
        let controls = held(|c| {
            c.accelerate = true;
            c.turn_left = true;
        });

        let car = update_car(&parked(0.0), &controls, 1.0, &physics);
        // moved along the old heading
        assert!(car.position.x.abs() < 1e-12);
        assert!((car.position.z - 0.02).abs() < 1e-12);
        assert!((car.heading - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_grip_scales_turn() {
        let physics = PhysicsConfig::default();
        let controls = held(|c| c.turn_right = true);

        let car = update_car(&parked(0.0), &controls, 0.5, &physics);
        assert!((car.heading + 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_handbrake_needs_speed() {
        let physics = PhysicsConfig::default();
        let controls = held(|c| {
            c.handbrake = true;
            c.turn_left = true;
        });

        let mut slow = parked(0.0);
        slow.speed = 0.1;
        let slow = update_car(&slow, &controls, 1.0, &physics);
        assert!((slow.heading - physics.turn_speed).abs() < 1e-12);

        let mut fast = parked(0.0);
        fast.speed = 1.0;
        let fast = update_car(&fast, &controls, 1.0, &physics);
        assert!((fast.heading - physics.handbrake_rotation).abs() < 1e-12);
        assert!((fast.speed - 0.99 * 0.95).abs() < 1e-12);
    }
}
