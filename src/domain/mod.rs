pub mod surface;
pub mod track;

pub use surface::{Surface, SurfaceEffects};
pub use track::{BoundaryPolygon, Point2, Track, TrackError};
