use std::f64::consts::TAU;

use tracing::warn;

use crate::error::StageResult;
use crate::graphics::{FillStyle, Graphics, GraphicsData, LineStyle};
use crate::math::{Bounds, Matrix, Shape, trace_area, trace_line};
use crate::render::{Canvas2d, DrawContext, Paint, apply_tint};
use crate::scene::Drawable;

impl Drawable for Graphics {
    fn add_content_bounds(&self, world: &Matrix, bounds: &mut Bounds) {
        let local = self.geometry().local_bounds();
        if local.is_empty() {
            return;
        }
        bounds.add_frame(world, local.min_x, local.min_y, local.max_x, local.max_y);
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> StageResult<()> {
        self.flush_path();
        let world = ctx.world;
        ctx.set_context_transform(&world);

        for data in self.geometry().graphics_data() {
            if let Some(matrix) = &data.matrix {
                let mut combined = world;
                combined.append(matrix);
                ctx.set_context_transform(&combined);
            }

            if is_degenerate(&data.shape) {
                ctx.stats.degenerate_skipped += 1;
            } else {
                draw_data(ctx, data)?;
                ctx.stats.shapes_drawn += 1;
            }

            if data.matrix.is_some() {
                ctx.set_context_transform(&world);
            }
        }
        Ok(())
    }
}

fn draw_data(ctx: &mut DrawContext<'_>, data: &GraphicsData) -> StageResult<()> {
    let fill = &data.fill_style;
    let line = &data.line_style;
    let alpha = ctx.world_alpha;

    match &data.shape {
        Shape::Polygon(polygon) => {
            ctx.canvas.begin_path();
            let mut points = polygon.points.iter();
            if let Some(first) = points.next() {
                ctx.canvas.move_to(first.x, first.y);
            }
            for point in points {
                ctx.canvas.line_to(point.x, point.y);
            }
            if polygon.close_stroke {
                ctx.canvas.close_path();
            }
            if fill.visible {
                apply_fill(ctx, fill, alpha);
                ctx.canvas.fill()?;
            }
            if line.visible {
                apply_stroke(ctx, line, alpha);
                ctx.canvas.stroke()?;
            }
        }
        Shape::Rectangle(rect) => {
            if fill.visible {
                apply_fill(ctx, fill, alpha);
                ctx.canvas.fill_rect(rect.x, rect.y, rect.width, rect.height)?;
            }
            if line.visible {
                let inset = line.width / 2.0;
                apply_stroke(ctx, line, alpha);
                ctx.canvas.stroke_rect(
                    rect.x + inset,
                    rect.y + inset,
                    rect.width - line.width,
                    rect.height - line.width,
                )?;
            }
        }
        Shape::Circle(circle) => {
            ctx.canvas.begin_path();
            ctx.canvas.arc(circle.x, circle.y, circle.radius, 0.0, TAU);
            ctx.canvas.close_path();
            if fill.visible {
                apply_fill(ctx, fill, alpha);
                ctx.canvas.fill()?;
            }
            if line.visible {
                if (line.alignment - 0.5).abs() > f64::EPSILON {
                    let offset = line.width * (line.alignment - 0.5);
                    ctx.canvas.begin_path();
                    ctx.canvas
                        .arc(circle.x, circle.y, circle.radius + offset, 0.0, TAU);
                    ctx.canvas.close_path();
                }
                apply_stroke(ctx, line, alpha);
                ctx.canvas.stroke()?;
            }
        }
        Shape::Line(polyline) => {
            if line.visible {
                ctx.canvas.begin_path();
                trace_line(&mut *ctx.canvas, &polyline.points, polyline.curve);
                apply_stroke(ctx, line, alpha);
                ctx.canvas.stroke()?;
            }
        }
        Shape::Area(area) => {
            if fill.visible {
                ctx.canvas.begin_path();
                trace_area(&mut *ctx.canvas, &area.points, area.curve);
                apply_fill(ctx, fill, alpha);
                ctx.canvas.fill()?;
            }
        }
    }
    Ok(())
}

fn apply_fill(ctx: &mut DrawContext<'_>, fill: &FillStyle, world_alpha: f64) {
    let color = apply_tint(fill.color, ctx.tint);
    let paint = fill
        .texture
        .as_ref()
        .and_then(|texture| ctx.tint_cache.get_or_tint(texture.base_texture(), color))
        .map_or_else(
            || Paint::solid_hex(color, 1.0),
            |image| Paint::Pattern {
                image,
                matrix: fill.matrix,
            },
        );
    ctx.canvas.set_global_alpha(fill.alpha * world_alpha);
    ctx.canvas.set_fill_style(paint);
}

fn apply_stroke(ctx: &mut DrawContext<'_>, line: &LineStyle, world_alpha: f64) {
    let color = apply_tint(line.color, ctx.tint);
    ctx.canvas.set_global_alpha(line.alpha * world_alpha);
    ctx.canvas.set_stroke_style(Paint::solid_hex(color, 1.0));
    ctx.canvas.set_line_width(line.width);
    ctx.canvas.set_line_dash(&line.dash);
}

/// Shapes that would draw nothing, or draw garbage.
fn is_degenerate(shape: &Shape) -> bool {
    match shape {
        Shape::Rectangle(rect) => {
            let bad = ![rect.x, rect.y, rect.width, rect.height]
                .iter()
                .all(|v| v.is_finite());
            if bad {
                warn!(?rect, "skip rectangle with non-finite geometry");
            }
            bad || rect.is_degenerate()
        }
        Shape::Circle(circle) => {
            let bad = ![circle.x, circle.y, circle.radius]
                .iter()
                .all(|v| v.is_finite());
            if bad {
                warn!(?circle, "skip circle with non-finite geometry");
            }
            bad || circle.radius <= 0.0
        }
        Shape::Polygon(polygon) => {
            let bad = !polygon.points.iter().all(|p| p.is_finite());
            if bad {
                warn!(points = polygon.points.len(), "skip polygon with non-finite points");
            }
            bad || polygon.points.len() < 2
        }
        Shape::Line(line) => line.points.iter().filter(|p| p.is_finite()).count() < 2,
        Shape::Area(area) => area.points.iter().filter(|p| p.is_finite()).count() < 2,
    }
}

/// Adds the outline of every shape in `graphics` to the current path, for
/// use as a clip region.
pub(crate) fn trace_graphics_outline(
    ctx: &mut DrawContext<'_>,
    graphics: &Graphics,
    world: &Matrix,
) {
    for data in graphics.geometry().graphics_data() {
        if is_degenerate(&data.shape) {
            continue;
        }
        match &data.matrix {
            Some(matrix) => {
                let mut combined = *world;
                combined.append(matrix);
                ctx.set_context_transform(&combined);
            }
            None => ctx.set_context_transform(world),
        }
        trace_shape(&mut *ctx.canvas, &data.shape);
    }
}

fn trace_shape(canvas: &mut dyn Canvas2d, shape: &Shape) {
    match shape {
        Shape::Polygon(polygon) => {
            let mut points = polygon.points.iter();
            if let Some(first) = points.next() {
                canvas.move_to(first.x, first.y);
            }
            for point in points {
                canvas.line_to(point.x, point.y);
            }
            canvas.close_path();
        }
        Shape::Rectangle(rect) => canvas.rect(rect.x, rect.y, rect.width, rect.height),
        Shape::Circle(circle) => {
            canvas.move_to(circle.x + circle.radius, circle.y);
            canvas.arc(circle.x, circle.y, circle.radius, 0.0, TAU);
            canvas.close_path();
        }
        Shape::Line(line) => trace_line(canvas, &line.points, line.curve),
        Shape::Area(area) => trace_area(canvas, &area.points, area.curve),
    }
}

#[cfg(test)]
mod tests {
    use super::is_degenerate;
    use crate::math::{Circle, Point, Polygon, Rectangle, Shape};

    #[test]
    fn degenerate_shapes_are_detected() {
        assert!(is_degenerate(&Shape::Rectangle(Rectangle::new(0.0, 0.0, 0.0, 5.0))));
        assert!(is_degenerate(&Shape::Circle(Circle::new(0.0, 0.0, 0.0))));
        assert!(is_degenerate(&Shape::Polygon(Polygon::new(vec![Point::new(
            1.0, 1.0
        )]))));
        assert!(is_degenerate(&Shape::Polygon(Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 1.0),
        ]))));
        assert!(!is_degenerate(&Shape::Rectangle(Rectangle::new(
            0.0, 0.0, 1.0, 1.0
        ))));
    }
}
