use geo::{Centroid, LineString, Polygon};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::is_inside;

/// How far in from the start waypoint the car is placed
const START_INSET: f64 = 3.0;

/// Insets tried in turn until one lands inside the ring
const START_INSETS: [f64; 3] = [START_INSET, START_INSET / 2.0, START_INSET / 4.0];

/// Waypoints of the built-in circuit, start/finish first and last
const DEFAULT_CIRCUIT: [(f64, f64); 8] = [
    (0.0, 0.0),
    (50.0, 0.0),
    (80.0, 30.0),
    (80.0, 80.0),
    (0.0, 80.0),
    (-30.0, 80.0),
    (-30.0, 30.0),
    (0.0, 0.0),
];

/// A point on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub z: f64,
}

impl Point2 {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance(&self, other: &Point2) -> f64 {
        ((other.x - self.x).powi(2) + (other.z - self.z).powi(2)).sqrt()
    }

    /// Move up to `max_step` toward `target`, stopping on it if closer
    pub fn toward(&self, target: Point2, max_step: f64) -> Point2 {
        let distance = self.distance(&target);
        if distance <= max_step {
            return target;
        }
        let t = max_step / distance;
        Point2::new(
            self.x + (target.x - self.x) * t,
            self.z + (target.z - self.z) * t,
        )
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, z): (f64, f64)) -> Self {
        Self { x, z }
    }
}

impl From<Point2> for (f64, f64) {
    fn from(p: Point2) -> Self {
        (p.x, p.z)
    }
}

/// Ordered boundary ring of a track
///
/// Points are kept exactly as supplied. A well-formed ring repeats its first
/// point as the last; `Track` guarantees that, raw polygons may not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryPolygon {
    points: Vec<Point2>,
}

impl BoundaryPolygon {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Points as (x, z) tuples
    pub fn to_tuples(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|&p| p.into()).collect()
    }
}

impl From<Vec<(f64, f64)>> for BoundaryPolygon {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(Point2::from).collect())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("track needs at least 3 distinct waypoints, got {0}")]
    TooFewPoints(usize),
    #[error("waypoint {index} is not finite: ({x}, {z})")]
    NonFinite { index: usize, x: f64, z: f64 },
    #[error("no start position inside the track boundary")]
    NoStartPosition,
}

/// A circuit: its boundary ring plus where the car starts
#[derive(Debug, Clone)]
pub struct Track {
    pub boundary: BoundaryPolygon,
    pub start: Point2,
    /// Starting yaw in radians
    pub start_heading: f64,
}

impl Track {
    /// Build a track from user waypoints, closing the ring if needed
    pub fn from_waypoints(waypoints: &[(f64, f64)]) -> Result<Self, TrackError> {
        for (index, &(x, z)) in waypoints.iter().enumerate() {
            if !x.is_finite() || !z.is_finite() {
                return Err(TrackError::NonFinite { index, x, z });
            }
        }

        let mut points: Vec<Point2> = waypoints.iter().map(|&p| Point2::from(p)).collect();

        let distinct = points
            .iter()
            .enumerate()
            .filter(|(i, p)| !points[..*i].contains(p))
            .count();
        if distinct < 3 {
            return Err(TrackError::TooFewPoints(distinct));
        }

        if points.first() != points.last() {
            points.push(points[0]);
        }

        let boundary = BoundaryPolygon::new(points);
        let (start, start_heading) = start_pose(&boundary).ok_or(TrackError::NoStartPosition)?;
        Ok(Self {
            boundary,
            start,
            start_heading,
        })
    }

    /// The built-in demo circuit
    pub fn default_circuit() -> Self {
        let boundary = BoundaryPolygon::from(DEFAULT_CIRCUIT.to_vec());
        // always found for this ring, pinned by test_default_circuit_is_closed
        let (start, start_heading) = start_pose(&boundary).unwrap_or_default();
        Self {
            boundary,
            start,
            start_heading,
        }
    }
}

/// Start just inside a waypoint, facing the next one
///
/// Walks the waypoints from the start/finish line onward and steps each one
/// toward the ring centroid by a shrinking inset. The first candidate the
/// even-odd test places inside wins, so a concave ring whose centroid sits in
/// a notch moves the grid to a later corner instead of leaving the car
/// outside. `None` when no candidate is inside (zero-area rings).
fn start_pose(boundary: &BoundaryPolygon) -> Option<(Point2, f64)> {
    let ring = LineString::from(boundary.to_tuples());
    let centroid = Polygon::new(ring, vec![]).centroid()?;
    let center = Point2::new(centroid.x(), centroid.y());

    for pair in boundary.points().windows(2) {
        let (waypoint, next) = (pair[0], pair[1]);
        if waypoint == next {
            continue;
        }
        let heading = (next.x - waypoint.x).atan2(next.z - waypoint.z);
        for inset in START_INSETS {
            let start = waypoint.toward(center, inset);
            if is_inside(start, boundary) {
                return Some((start, heading));
            }
        }
    }
    None
}

impl Default for Track {
    fn default() -> Self {
        Self::default_circuit()
    }
}
