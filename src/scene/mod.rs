//! Scene inputs: light records, camera and synthetic test scenes

mod camera;
mod light;
pub mod synthetic;

pub use camera::*;
pub use light::*;
pub use synthetic::{SyntheticScene, SyntheticSceneParams};
