//! Shape and style recording for vector drawing.
//!
//! A [`Graphics`] value is a small state machine: styles set with
//! [`Graphics::line_style`] / [`Graphics::begin_fill`] stay pending until a
//! shape is committed, either directly (`draw_*`) or from the open path built
//! by `move_to` / `line_to` / `close_path` once `end_fill` is called.

mod geometry;
mod style;

pub use geometry::{GraphicsData, GraphicsGeometry};
pub use style::{FillStyle, LineStyle};

use crate::math::{
    Area, AreaPoint, Circle, CurveKind, Line, Matrix, Point, Polygon, Rectangle, Shape,
};
use crate::texture::Texture;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graphics {
    geometry: GraphicsGeometry,
    fill_style: FillStyle,
    line_style: LineStyle,
    matrix: Option<Matrix>,
    current_path: Option<Polygon>,
}

impl Graphics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn geometry(&self) -> &GraphicsGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn pending_fill_style(&self) -> &FillStyle {
        &self.fill_style
    }

    #[must_use]
    pub fn pending_line_style(&self) -> &LineStyle {
        &self.line_style
    }

    /// Points of the path that has not been committed yet.
    #[must_use]
    pub fn current_path(&self) -> Option<&Polygon> {
        self.current_path.as_ref()
    }

    pub fn line_style(&mut self, width: f64, color: u32, alpha: f64) -> &mut Self {
        self.set_line_style(LineStyle::new(width, color, alpha))
    }

    pub fn set_line_style(&mut self, style: LineStyle) -> &mut Self {
        if self.current_path.is_some() {
            self.start_poly();
        }
        self.line_style = style;
        self
    }

    pub fn begin_fill(&mut self, color: u32, alpha: f64) -> &mut Self {
        if self.current_path.is_some() {
            self.start_poly();
        }
        self.fill_style = FillStyle::solid(color, alpha);
        self
    }

    /// Fills subsequent shapes with `texture` tinted by `color`.
    pub fn begin_texture_fill(
        &mut self,
        texture: Texture,
        color: u32,
        alpha: f64,
        matrix: Option<Matrix>,
    ) -> &mut Self {
        if self.current_path.is_some() {
            self.start_poly();
        }
        let visible = alpha > 0.0 && texture.is_valid();
        self.fill_style = FillStyle {
            color,
            alpha,
            visible,
            texture: Some(texture),
            matrix,
        };
        self
    }

    pub fn end_fill(&mut self) -> &mut Self {
        self.finish_poly();
        self.fill_style.reset();
        self
    }

    /// Local matrix applied to shapes committed from now on.
    pub fn set_matrix(&mut self, matrix: Option<Matrix>) -> &mut Self {
        self.matrix = matrix;
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.start_poly();
        if let Some(path) = self.current_path.as_mut() {
            path.points.clear();
            path.points.push(Point::new(x, y));
        }
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        if self.current_path.is_none() {
            self.move_to(0.0, 0.0);
        }
        if let Some(path) = self.current_path.as_mut() {
            let to = Point::new(x, y);
            if path.points.last() != Some(&to) {
                path.points.push(to);
            }
        }
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        if let Some(path) = self.current_path.as_mut() {
            path.close_stroke = true;
            self.finish_poly();
        }
        self
    }

    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.draw_shape(Shape::Rectangle(Rectangle::new(x, y, width, height)))
    }

    pub fn draw_circle(&mut self, x: f64, y: f64, radius: f64) -> &mut Self {
        self.draw_shape(Shape::Circle(Circle::new(x, y, radius)))
    }

    pub fn draw_polygon(&mut self, points: Vec<Point>) -> &mut Self {
        self.draw_shape(Shape::Polygon(Polygon::new(points)))
    }

    /// Records a stroked polyline interpolated through `curve`.
    pub fn draw_line(&mut self, points: Vec<Point>, curve: CurveKind) -> &mut Self {
        self.draw_shape(Shape::Line(Line::new(points, curve)))
    }

    /// Records a filled region between each sample's `y0` and `y1`.
    pub fn draw_area(&mut self, points: Vec<AreaPoint>, curve: CurveKind) -> &mut Self {
        self.draw_shape(Shape::Area(Area::new(points, curve)))
    }

    /// Drops every recorded shape and the open path. Pending styles survive.
    pub fn clear(&mut self) -> &mut Self {
        self.geometry.clear();
        self.current_path = None;
        self.matrix = None;
        self
    }

    #[must_use]
    pub fn contains_local_point(&self, point: Point) -> bool {
        self.geometry.contains_point(point)
    }

    /// Commits the open path, if any, so it takes part in bounds and
    /// drawing.
    pub fn flush_path(&mut self) {
        self.finish_poly();
    }

    fn draw_shape(&mut self, shape: Shape) -> &mut Self {
        self.geometry.draw_shape(
            shape,
            self.fill_style.clone(),
            self.line_style.clone(),
            self.matrix,
        );
        self
    }

    /// Commits the open path if it has a segment and starts a new one from
    /// its last point.
    fn start_poly(&mut self) {
        match self.current_path.take() {
            Some(path) if path.points.len() > 1 => {
                let last = path.points[path.points.len() - 1];
                self.draw_shape(Shape::Polygon(path));
                self.current_path = Some(Polygon::open(vec![last]));
            }
            Some(path) => self.current_path = Some(path),
            None => self.current_path = Some(Polygon::open(Vec::new())),
        }
    }

    fn finish_poly(&mut self) {
        match self.current_path.take() {
            Some(path) if path.points.len() > 1 => {
                self.draw_shape(Shape::Polygon(path));
            }
            Some(mut path) => {
                path.points.clear();
                self.current_path = Some(path);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Graphics;
    use crate::math::{Point, Shape};

    #[test]
    fn end_fill_commits_open_path_and_resets_fill() {
        let mut graphics = Graphics::new();
        graphics
            .begin_fill(0xFF0000, 1.0)
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0)
            .end_fill();

        let data = graphics.geometry().graphics_data();
        assert_eq!(data.len(), 1);
        assert!(data[0].fill_style.visible);
        assert!(!graphics.pending_fill_style().visible);
        match &data[0].shape {
            Shape::Polygon(polygon) => {
                assert_eq!(polygon.points.len(), 3);
                assert!(!polygon.close_stroke);
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn close_path_marks_polygon_closed() {
        let mut graphics = Graphics::new();
        graphics
            .line_style(2.0, 0x000000, 1.0)
            .move_to(0.0, 0.0)
            .line_to(5.0, 5.0)
            .close_path();

        match &graphics.geometry().graphics_data()[0].shape {
            Shape::Polygon(polygon) => assert!(polygon.close_stroke),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn line_to_without_move_starts_at_origin() {
        let mut graphics = Graphics::new();
        graphics.line_to(4.0, 4.0);
        let path = graphics.current_path().expect("open path");
        assert_eq!(path.points, vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)]);
    }

    #[test]
    fn clear_discards_all_shapes() {
        let mut graphics = Graphics::new();
        graphics.begin_fill(0x00FF00, 1.0).draw_rect(0.0, 0.0, 10.0, 10.0);
        graphics.clear();
        assert!(graphics.geometry().is_empty());
    }
}
