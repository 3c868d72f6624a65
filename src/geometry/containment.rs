//! Track containment and surface classification
//!
//! Every function here is evaluated once per frame against the static track
//! boundary. Nothing is remembered between calls.
//!
//! Distances are measured to the nearest boundary *vertex*, not the nearest
//! edge. Interior points far from any vertex can therefore read as gravel or
//! grass even though they sit on the tarmac. `DistanceMode::Segment`
//! measures to the edges instead and must be requested explicitly.

use geo::{Closest, ClosestPoint, LineString, Point};
use serde::Deserialize;

use crate::domain::{BoundaryPolygon, Point2, Surface};

/// Maximum distance from the boundary still counted as track
pub const ON_TRACK_THRESHOLD: f64 = 5.0;

/// Maximum distance from the boundary counted as gravel trap
pub const GRAVEL_MAX: f64 = 8.0;

/// Fraction of the gap to the nearest vertex closed by one correction
pub const PULL_BACK_FACTOR: f64 = 0.1;

/// Speed multiplier applied when the car is found off the track
pub const OFF_TRACK_SPEED_FACTOR: f64 = 0.5;

/// How distance to the boundary is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    /// Distance to the closest polygon vertex
    #[default]
    #[serde(alias = "nearest-vertex")]
    Vertex,
    /// True distance to the closest polygon edge
    #[serde(alias = "nearest-segment")]
    Segment,
}

/// Outcome of a containment correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub position: Point2,
    pub was_outside: bool,
}

/// Even-odd ray-casting test
///
/// Fewer than three points never contain anything.
pub fn is_inside(position: Point2, polygon: &BoundaryPolygon) -> bool {
    let points = polygon.points();
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let p1 = points[i];
        let p2 = points[j];

        // strict on both ends: a vertex on the ray counts for exactly one edge
        if (p1.z > position.z) != (p2.z > position.z)
            && position.x < (p2.x - p1.x) * (position.z - p1.z) / (p2.z - p1.z) + p1.x
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Closest boundary vertex and its distance
///
/// Ties resolve to the earliest vertex. Returns `None` for polygons with
/// fewer than two points.
pub fn nearest_boundary_point(
    position: Point2,
    polygon: &BoundaryPolygon,
) -> Option<(Point2, f64)> {
    let points = polygon.points();
    if points.len() < 2 {
        return None;
    }

    let mut nearest = points[0];
    let mut min_distance = f64::INFINITY;

    for point in points {
        let distance = position.distance(point);
        if distance < min_distance {
            min_distance = distance;
            nearest = *point;
        }
    }

    Some((nearest, min_distance))
}

/// Closest boundary point under the given distance mode
pub fn nearest_boundary_point_with(
    position: Point2,
    polygon: &BoundaryPolygon,
    mode: DistanceMode,
) -> Option<(Point2, f64)> {
    match mode {
        DistanceMode::Vertex => nearest_boundary_point(position, polygon),
        DistanceMode::Segment => nearest_segment_point(position, polygon),
    }
}

fn nearest_segment_point(position: Point2, polygon: &BoundaryPolygon) -> Option<(Point2, f64)> {
    if polygon.len() < 2 {
        return None;
    }

    let ring: LineString<f64> = LineString::from(polygon.to_tuples());
    let target = Point::new(position.x, position.z);

    match ring.closest_point(&target) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => {
            let nearest = Point2::new(p.x(), p.y());
            Some((nearest, position.distance(&nearest)))
        }
        // NaN input; fall back to the vertex scan so the result stays defined
        Closest::Indeterminate => nearest_boundary_point(position, polygon),
    }
}

/// Band a boundary distance into a surface
pub fn surface_for_distance(distance: f64) -> Surface {
    if distance <= ON_TRACK_THRESHOLD {
        Surface::Track
    } else if distance <= GRAVEL_MAX {
        Surface::Gravel
    } else {
        Surface::Grass
    }
}

/// Surface under `position`, by distance to the nearest boundary vertex
pub fn classify_surface(position: Point2, polygon: &BoundaryPolygon) -> Surface {
    classify_surface_with(position, polygon, DistanceMode::Vertex)
}

pub fn classify_surface_with(
    position: Point2,
    polygon: &BoundaryPolygon,
    mode: DistanceMode,
) -> Surface {
    match nearest_boundary_point_with(position, polygon, mode) {
        Some((_, distance)) => surface_for_distance(distance),
        None => Surface::Grass,
    }
}

/// Soft pull-back for positions outside the boundary
///
/// When `position` is outside, `speed` is halved and the position moves a
/// tenth of the way toward the nearest boundary vertex. A degenerate polygon
/// still halves speed but leaves the position where it is.
pub fn correct_if_outside(
    position: Point2,
    speed: &mut f64,
    polygon: &BoundaryPolygon,
) -> Correction {
    if is_inside(position, polygon) {
        return Correction {
            position,
            was_outside: false,
        };
    }

    *speed *= OFF_TRACK_SPEED_FACTOR;

    let corrected = match nearest_boundary_point(position, polygon) {
        Some((nearest, _)) => Point2::new(
            position.x + (nearest.x - position.x) * PULL_BACK_FACTOR,
            position.z + (nearest.z - position.z) * PULL_BACK_FACTOR,
        ),
        None => position,
    };

    Correction {
        position: corrected,
        was_outside: true,
    }
}
