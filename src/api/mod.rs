//! Stage facade bundling scene, renderer and interaction behind one config.

mod stage;
mod stage_config;

pub use stage::Stage;
pub use stage_config::{StageConfig, Viewport};
