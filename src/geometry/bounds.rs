use crate::domain::BoundaryPolygon;

/// Axis-aligned box on the ground plane (world units)
///
/// Used to auto-fit the minimap around a whole circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Bounds of a set of (x, z) points
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_z = f64::MAX;
        let mut max_z = f64::MIN;

        for &(x, z) in points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_z = min_z.min(z);
            max_z = max_z.max(z);
        }

        Some(Self {
            min_x,
            max_x,
            min_z,
            max_z,
        })
    }

    /// Footprint of a track boundary, `None` for an empty ring
    pub fn of_boundary(boundary: &BoundaryPolygon) -> Option<Self> {
        Self::from_points(&boundary.to_tuples())
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![(-30.0, 0.0), (80.0, 30.0), (0.0, 80.0)];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_x, -30.0);
        assert_eq!(bounds.max_x, 80.0);
        assert_eq!(bounds.min_z, 0.0);
        assert_eq!(bounds.max_z, 80.0);
        assert_eq!(bounds.width(), 110.0);
        assert_eq!(bounds.center(), (25.0, 40.0));
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(&[]).is_none());
        assert!(Bounds::of_boundary(&BoundaryPolygon::default()).is_none());
    }

    #[test]
    fn test_default_circuit_footprint() {
        let track = crate::domain::Track::default_circuit();
        let bounds = Bounds::of_boundary(&track.boundary).unwrap();

        assert_eq!(bounds.width(), 110.0);
        assert_eq!(bounds.depth(), 80.0);
        assert_eq!(bounds.center(), (25.0, 40.0));
    }
}
