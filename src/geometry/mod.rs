pub mod bounds;
pub mod containment;
pub mod minimap;

pub use bounds::Bounds;
pub use containment::{
    Correction, DistanceMode, classify_surface, classify_surface_with, correct_if_outside,
    is_inside, nearest_boundary_point, nearest_boundary_point_with,
};
pub use minimap::MinimapProjector;
