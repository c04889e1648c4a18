use crate::math::{Bounds, Matrix, Point, Shape};

use super::{FillStyle, LineStyle};

/// One recorded shape with the styles active when it was committed.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsData {
    pub shape: Shape,
    pub fill_style: FillStyle,
    pub line_style: LineStyle,
    pub matrix: Option<Matrix>,
}

impl GraphicsData {
    /// Stroke outset beyond the shape's geometric outline.
    fn stroke_pad(&self) -> f64 {
        let line = &self.line_style;
        if !line.visible {
            return 0.0;
        }

        match &self.shape {
            // Rectangles are stroked inside their outline; areas never stroke.
            Shape::Rectangle(_) | Shape::Area(_) => 0.0,
            Shape::Circle(_) => line.width * line.alignment.max(0.0),
            Shape::Polygon(polygon) if polygon.close_stroke => {
                line.width * (0.5 + (0.5 - line.alignment).abs())
            }
            Shape::Polygon(_) | Shape::Line(_) => line.width * 0.5,
        }
    }

    fn add_local_bounds(&self, bounds: &mut Bounds) {
        let matrix = self.matrix.unwrap_or(Matrix::IDENTITY);
        let pad = self.stroke_pad();

        match &self.shape {
            Shape::Rectangle(rect) => {
                if rect.is_degenerate() {
                    return;
                }
                bounds.add_frame(
                    &matrix,
                    rect.x - pad,
                    rect.y - pad,
                    rect.right() + pad,
                    rect.bottom() + pad,
                );
            }
            Shape::Circle(circle) => {
                if circle.radius <= 0.0 {
                    return;
                }
                let r = circle.radius + pad;
                bounds.add_frame(&matrix, circle.x - r, circle.y - r, circle.x + r, circle.y + r);
            }
            Shape::Polygon(polygon) => {
                bounds.add_vertices_matrix(&matrix, polygon.points.iter().copied(), pad, pad);
            }
            Shape::Line(line) => {
                let finite = line.points.iter().copied().filter(|p| p.is_finite());
                bounds.add_vertices_matrix(&matrix, finite, pad, pad);
            }
            Shape::Area(area) => {
                let finite = area.points.iter().filter(|p| p.is_finite());
                let vertices = finite.flat_map(|p| [Point::new(p.x, p.y0), Point::new(p.x, p.y1)]);
                bounds.add_vertices_matrix(&matrix, vertices, 0.0, 0.0);
            }
        }
    }
}

/// Ordered list of committed shapes owned by one graphics node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphicsGeometry {
    graphics_data: Vec<GraphicsData>,
}

impl GraphicsGeometry {
    #[must_use]
    pub fn graphics_data(&self) -> &[GraphicsData] {
        &self.graphics_data
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphics_data.is_empty()
    }

    pub fn draw_shape(
        &mut self,
        shape: Shape,
        fill_style: FillStyle,
        line_style: LineStyle,
        matrix: Option<Matrix>,
    ) {
        self.graphics_data.push(GraphicsData {
            shape,
            fill_style,
            line_style,
            matrix,
        });
    }

    pub fn clear(&mut self) {
        self.graphics_data.clear();
    }

    /// Local-space bounds of all shapes, including stroke outsets.
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        let mut bounds = Bounds::new();
        for data in &self.graphics_data {
            data.add_local_bounds(&mut bounds);
        }
        bounds
    }

    /// Tests a local point against every filled shape.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.graphics_data.iter().any(|data| {
            if !data.fill_style.visible {
                return false;
            }
            let local = match &data.matrix {
                Some(matrix) => matrix.apply_inverse(point),
                None => point,
            };
            data.shape.contains(local.x, local.y)
        })
    }
}
