pub mod camera;
pub mod car;
pub mod controls;
pub mod fps;
pub mod state;

pub use camera::CameraRig;
pub use car::{CarState, PhysicsConfig, Vec3, update_car};
pub use controls::{Control, Controls, InputScript, ScriptError, ScriptStep};
pub use fps::FpsCounter;
pub use state::{FrameReport, GameState, SimSettings, step};
