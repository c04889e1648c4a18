//! chart-stage: retained-mode 2D scene graph, canvas renderer and pointer
//! interaction engine for financial charts.
//!
//! A [`scene::Scene`] owns every display object in an arena; content types
//! ([`graphics::Graphics`], [`sprite::Sprite`], [`text::Text`]) hang off its
//! nodes. [`render::CanvasRenderer`] draws the tree onto any
//! [`render::Canvas2d`], and [`interaction::InteractionManager`] turns native
//! input into hit-tested node events. [`api::Stage`] wires the three together.

pub mod api;
pub mod error;
pub mod graphics;
pub mod interaction;
pub mod math;
pub mod render;
pub mod scene;
pub mod sprite;
pub mod telemetry;
pub mod text;
pub mod texture;

pub use api::{Stage, StageConfig, Viewport};
pub use error::{StageError, StageResult};
