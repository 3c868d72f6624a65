//! Heads-up display model
//!
//! `render` is the presentation step: it reads a finished `GameState` and
//! produces plain data for whatever draws the overlay. It never mutates the
//! game.

use serde::Serialize;

use crate::domain::Track;
use crate::geometry::MinimapProjector;
use crate::sim::GameState;

/// Radius of the car marker on the minimap, in pixels
pub const CAR_MARKER_RADIUS: f64 = 3.0;

/// Length of the heading line on the minimap, in pixels
pub const HEADING_LINE_LENGTH: f64 = 10.0;

/// Speed scalar to the displayed km/h figure
const SPEED_DISPLAY_FACTOR: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimapFrame {
    pub size: f64,
    /// Boundary polyline in canvas pixels
    pub outline: Vec<(f64, f64)>,
    pub car: (f64, f64),
    pub car_radius: f64,
    /// End of the heading line drawn from `car`
    pub heading_tip: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudFrame {
    pub speedometer: String,
    pub lap: String,
    pub fps: String,
    pub minimap: MinimapFrame,
}

/// Displayed speed; rounds half up, then drops the sign
pub fn speed_kmh(speed: f64) -> u32 {
    (speed * SPEED_DISPLAY_FACTOR + 0.5).floor().abs() as u32
}

pub fn render(state: &GameState, track: &Track, minimap: &MinimapProjector) -> HudFrame {
    let car = minimap.project(state.car.ground_position());
    let forward = state.car.forward();

    HudFrame {
        speedometer: format!("{} km/h", speed_kmh(state.car.speed)),
        lap: format!("Lap: {}/{}", state.current_lap, state.total_laps),
        fps: format!("FPS: {}", state.fps.fps()),
        minimap: MinimapFrame {
            size: minimap.size(),
            outline: minimap.project_points(track.boundary.points()),
            car,
            car_radius: CAR_MARKER_RADIUS,
            heading_tip: (
                car.0 + forward.x * HEADING_LINE_LENGTH,
                car.1 + forward.z * HEADING_LINE_LENGTH,
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point2;
    use crate::sim::SimSettings;

    #[test]
    fn test_speed_kmh() {
        assert_eq!(speed_kmh(0.0), 0);
        assert_eq!(speed_kmh(1.5), 150);
        assert_eq!(speed_kmh(0.204), 20);
        assert_eq!(speed_kmh(0.2051), 21);
        assert_eq!(speed_kmh(-0.8), 80);
        // halves round toward +inf before the sign is dropped
        assert_eq!(speed_kmh(0.125), 13);
        assert_eq!(speed_kmh(-0.125), 12);
    }

    #[test]
    fn test_render_text() {
        let track = Track::default_circuit();
        let mut state = GameState::new(&track, &SimSettings::default(), 3, 0.0);
        state.car.speed = 0.75;

        let hud = render(&state, &track, &MinimapProjector::default());
        assert_eq!(hud.speedometer, "75 km/h");
        assert_eq!(hud.lap, "Lap: 1/3");
        assert_eq!(hud.fps, "FPS: 0");
    }

    #[test]
    fn test_render_minimap() {
        let track = Track::default_circuit();
        let mut state = GameState::new(&track, &SimSettings::default(), 3, 0.0);
        state.car.set_ground_position(Point2::new(10.0, 20.0));

        let hud = render(&state, &track, &MinimapProjector::default());
        let map = &hud.minimap;

        assert_eq!(map.size, 150.0);
        assert_eq!(map.outline.len(), track.boundary.len());
        assert_eq!(map.outline[1], (100.0, 75.0));
        assert_eq!(map.car, (80.0, 85.0));
        // facing +X
        assert!((map.heading_tip.0 - 90.0).abs() < 1e-9);
        assert!((map.heading_tip.1 - 85.0).abs() < 1e-9);
    }
}
