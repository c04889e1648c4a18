use crate::error::StageResult;
use crate::math::{Bounds, Matrix};
use crate::render::{Canvas2d, Color, DrawContext, Paint};
use crate::scene::Drawable;
use crate::text::{Text, TextAlign, TextStyle, fill_gradient};

impl Drawable for Text {
    fn add_content_bounds(&self, world: &Matrix, bounds: &mut Bounds) {
        self.add_bounds(world, bounds);
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> StageResult<()> {
        if self.text().is_empty() {
            return Ok(());
        }
        self.remeasure(&mut *ctx.canvas, ctx.font_cache);
        let Some(metrics) = self.metrics() else {
            return Ok(());
        };
        let style = self.style();

        ctx.apply_world_transform();
        ctx.canvas.set_global_alpha(ctx.world_alpha);
        ctx.canvas.set_font(&metrics.font);

        let origin_x = -self.anchor.x * metrics.width;
        let origin_y = -self.anchor.y * metrics.height;
        let thickness = style.stroke_thickness;
        let stroking = thickness > 0.0;

        if stroking {
            ctx.canvas.set_stroke_style(Paint::solid_hex(style.stroke, 1.0));
            ctx.canvas.set_line_width(thickness);
        }
        let filling = match style.fill.as_slice() {
            [] => false,
            [color] => {
                ctx.canvas.set_fill_style(Paint::solid_hex(*color, 1.0));
                true
            }
            _ => match fill_gradient(style, metrics) {
                Some(gradient) => {
                    ctx.canvas.set_fill_style(Paint::LinearGradient {
                        x0: gradient.x0 + origin_x,
                        y0: gradient.y0 + origin_y,
                        x1: gradient.x1 + origin_x,
                        y1: gradient.y1 + origin_y,
                        stops: gradient
                            .stops
                            .iter()
                            .map(|(offset, color)| (*offset, Color::from_hex(*color)))
                            .collect(),
                    });
                    true
                }
                None => false,
            },
        };

        let ascent = metrics.font_metrics.ascent;
        for (index, line) in metrics.lines.iter().enumerate() {
            let line_width = metrics.line_widths.get(index).copied().unwrap_or(0.0);
            let align_offset = match style.align {
                TextAlign::Left => 0.0,
                TextAlign::Center => (metrics.max_line_width - line_width) / 2.0,
                TextAlign::Right => metrics.max_line_width - line_width,
            };
            let x = origin_x + thickness / 2.0 + align_offset;
            let y = origin_y + thickness / 2.0 + index as f64 * metrics.line_height + ascent;

            if stroking {
                draw_letter_spacing(&mut *ctx.canvas, style, line, x, y, true)?;
            }
            if filling {
                draw_letter_spacing(&mut *ctx.canvas, style, line, x, y, false)?;
            }
        }
        ctx.stats.texts_drawn += 1;
        Ok(())
    }
}

/// Draws `text` glyph by glyph when letter spacing is set, advancing by the
/// width the glyph contributes to the rest of the line.
fn draw_letter_spacing(
    canvas: &mut dyn Canvas2d,
    style: &TextStyle,
    text: &str,
    x: f64,
    y: f64,
    stroke: bool,
) -> StageResult<()> {
    if style.letter_spacing == 0.0 {
        return paint_glyphs(canvas, text, x, y, stroke);
    }

    let mut position = x;
    let mut previous_width = canvas.measure_text(text).width;
    for (offset, glyph) in text.char_indices() {
        let end = offset + glyph.len_utf8();
        paint_glyphs(canvas, &text[offset..end], position, y, stroke)?;
        let current_width = canvas.measure_text(&text[end..]).width;
        position += previous_width - current_width + style.letter_spacing;
        previous_width = current_width;
    }
    Ok(())
}

fn paint_glyphs(
    canvas: &mut dyn Canvas2d,
    glyphs: &str,
    x: f64,
    y: f64,
    stroke: bool,
) -> StageResult<()> {
    if stroke {
        canvas.stroke_text(glyphs, x, y)
    } else {
        canvas.fill_text(glyphs, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::draw_letter_spacing;
    use crate::render::{CanvasCommand, RecordingCanvas};
    use crate::text::TextStyle;

    #[test]
    fn letter_spacing_draws_each_glyph() {
        let mut canvas = RecordingCanvas::new(100, 100).expect("canvas");
        let mut style = TextStyle::default();
        style.letter_spacing = 2.0;
        draw_letter_spacing(&mut canvas, &style, "ab", 0.0, 10.0, false).expect("draw");

        let fills: Vec<_> = canvas
            .commands()
            .iter()
            .filter(|command| matches!(command, CanvasCommand::FillText { .. }))
            .collect();
        assert_eq!(fills.len(), 2);
    }
}
