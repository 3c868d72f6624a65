use super::{CameraRig, CarState, Controls, FpsCounter, PhysicsConfig, update_car};
use crate::domain::{Surface, Track};
use crate::geometry::{DistanceMode, classify_surface_with, correct_if_outside};

/// Settings fixed for the whole run
#[derive(Debug, Clone, Default)]
pub struct SimSettings {
    pub physics: PhysicsConfig,
    pub distance_mode: DistanceMode,
}

/// Everything that changes from frame to frame
#[derive(Debug, Clone)]
pub struct GameState {
    pub car: CarState,
    pub camera: CameraRig,
    /// Surface under the car as of the last frame
    pub surface: Surface,
    pub current_lap: u32,
    pub total_laps: u32,
    pub fps: FpsCounter,
    pub frame: u64,
}

impl GameState {
    pub fn new(track: &Track, settings: &SimSettings, total_laps: u32, now_ms: f64) -> Self {
        let car = CarState::at_start(track, &settings.physics);
        Self {
            car,
            camera: CameraRig::default(),
            surface: Surface::Track,
            current_lap: 1,
            total_laps,
            fps: FpsCounter::new(now_ms),
            frame: 0,
        }
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub surface: Surface,
    /// The car was off the track and got pulled back
    pub was_outside: bool,
    /// New frame-rate reading, when one was taken this frame
    pub fps_sample: Option<u32>,
}

/// Advance the game by one frame
///
/// 1. drive the car with the current controls
/// 2. classify the ground and apply its rolling resistance
/// 3. pull the car back if it left the boundary
/// 4. move the camera
pub fn step(
    state: &GameState,
    track: &Track,
    controls: &Controls,
    settings: &SimSettings,
    now_ms: f64,
) -> (GameState, FrameReport) {
    let mut next = state.clone();

    let grip = state.surface.effects().grip;
    next.car = update_car(&state.car, controls, grip, &settings.physics);

    let surface = classify_surface_with(
        next.car.ground_position(),
        &track.boundary,
        settings.distance_mode,
    );
    next.car.speed *= surface.effects().rolling;
    next.surface = surface;

    let correction = correct_if_outside(
        next.car.ground_position(),
        &mut next.car.speed,
        &track.boundary,
    );
    next.car.set_ground_position(correction.position);

    next.camera = CameraRig::follow(&next.car);
    let fps_sample = next.fps.tick(now_ms);
    next.frame += 1;

    let report = FrameReport {
        surface,
        was_outside: correction.was_outside,
        fps_sample,
    };
    (next, report)
}
