use super::Bounds;
use crate::domain::Point2;

/// Default minimap edge length in pixels
pub const MINIMAP_SIZE: f64 = 150.0;

/// Default pixels per world unit
pub const MINIMAP_SCALE: f64 = 0.5;

/// Maps world (x, z) onto a square minimap canvas
///
/// The plain projection puts the world origin in the middle of the canvas:
/// - px = size / 2 + x * scale
/// - py = size / 2 + z * scale
///
/// `fit` instead centers a bounding box and scales it to fill the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapProjector {
    size: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl MinimapProjector {
    /// Origin-centered projection
    pub fn new(size: f64, scale: f64) -> Self {
        Self {
            size,
            scale,
            offset_x: size / 2.0,
            offset_y: size / 2.0,
        }
    }

    /// Fit `bounds` inside the canvas, leaving `margin_px` on every side
    pub fn fit(bounds: &Bounds, size: f64, margin_px: f64) -> Self {
        let usable = (size - 2.0 * margin_px).max(0.0);
        let max_dim = bounds.width().max(bounds.depth());

        let scale = if max_dim > 0.0 { usable / max_dim } else { 1.0 };

        let (center_x, center_z) = bounds.center();
        Self {
            size,
            scale,
            offset_x: size / 2.0 - center_x * scale,
            offset_y: size / 2.0 - center_z * scale,
        }
    }

    /// World point to canvas pixels
    pub fn project(&self, point: Point2) -> (f64, f64) {
        (
            self.offset_x + point.x * self.scale,
            self.offset_y + point.z * self.scale,
        )
    }

    pub fn project_points(&self, points: &[Point2]) -> Vec<(f64, f64)> {
        points.iter().map(|&p| self.project(p)).collect()
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale
    }
}

impl Default for MinimapProjector {
    fn default() -> Self {
        Self::new(MINIMAP_SIZE, MINIMAP_SCALE)
    }
}
