//! Geometry primitives shared by the scene graph, graphics and hit testing.

mod bounds;
mod curve;
mod matrix;
mod point;
mod shapes;
mod transform;

pub use bounds::Bounds;
pub use curve::{CurveKind, PathSink, trace_area, trace_line};
pub use matrix::Matrix;
pub use point::Point;
pub use shapes::{Area, AreaPoint, Circle, Line, Polygon, Rectangle, Shape};
pub use transform::Transform;
