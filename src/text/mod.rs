//! Styled multi-line text: layout, measurement and fill gradients.

mod metrics;
mod style;

pub use metrics::{FontMetrics, FontMetricsCache, TextMeasure, TextMeasurer, TextMetrics};
pub use style::{FontStyle, TextAlign, TextGradient, TextStyle, WhiteSpace};

use crate::math::{Bounds, Matrix, Point, Rectangle};

/// Text content of a scene node.
///
/// Layout is computed lazily against a [`TextMeasurer`]; until the first
/// measurement the node has an empty size.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    text: String,
    style: TextStyle,
    pub anchor: Point,
    metrics: Option<TextMetrics>,
    dirty: bool,
}

impl Text {
    #[must_use]
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            anchor: Point::ORIGIN,
            metrics: None,
            dirty: true,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Point::new(x, y);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.dirty = true;
        }
    }

    #[must_use]
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Mutable style access; always invalidates the layout.
    pub fn style_mut(&mut self) -> &mut TextStyle {
        self.dirty = true;
        &mut self.style
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
        self.dirty = true;
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&TextMetrics> {
        self.metrics.as_ref()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn update_metrics<M: TextMeasurer + ?Sized>(
        &mut self,
        measurer: &mut M,
        cache: &mut FontMetricsCache,
    ) -> &TextMetrics {
        let metrics = match self.metrics.take() {
            Some(metrics) if !self.dirty => metrics,
            _ => TextMetrics::measure(&self.text, &self.style, measurer, cache),
        };
        self.dirty = false;
        self.metrics.insert(metrics)
    }

    /// Measures again even when nothing changed; the measurer's font
    /// environment may have.
    pub fn remeasure<M: TextMeasurer + ?Sized>(
        &mut self,
        measurer: &mut M,
        cache: &mut FontMetricsCache,
    ) -> &TextMetrics {
        self.dirty = true;
        self.update_metrics(measurer, cache)
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        self.metrics
            .as_ref()
            .map_or((0.0, 0.0), |metrics| (metrics.width, metrics.height))
    }

    /// Anchored layout box in local space.
    #[must_use]
    pub fn local_rect(&self) -> Rectangle {
        let (width, height) = self.size();
        Rectangle::new(
            -self.anchor.x * width,
            -self.anchor.y * height,
            width,
            height,
        )
    }

    #[must_use]
    pub fn contains_local_point(&self, point: Point) -> bool {
        let rect = self.local_rect();
        point.x >= rect.x
            && point.x < rect.x + rect.width
            && point.y >= rect.y
            && point.y < rect.y + rect.height
    }

    pub fn add_bounds(&self, world: &Matrix, bounds: &mut Bounds) {
        let rect = self.local_rect();
        if rect.is_degenerate() {
            return;
        }
        let pad = self.style.padding;
        bounds.add_frame(
            world,
            rect.x - pad,
            rect.y - pad,
            rect.right() + pad,
            rect.bottom() + pad,
        );
    }
}

/// Linear gradient in the text box's local space, stops as `(offset, color)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<(f64, u32)>,
}

/// Gradient for a multi-color fill; `None` for solid or empty fills.
///
/// Vertical gradients repeat per line so every line gets the full color
/// run; offsets are clamped to stay monotonic.
#[must_use]
pub fn fill_gradient(style: &TextStyle, metrics: &TextMetrics) -> Option<GradientSpec> {
    let colors = &style.fill;
    if colors.len() < 2 {
        return None;
    }

    let explicit = |index: usize| style.fill_gradient_stops.get(index).copied();
    let width = metrics.width;
    let height = metrics.height;

    match style.fill_gradient_type {
        TextGradient::LinearVertical => {
            let mut stops = Vec::with_capacity(colors.len() * metrics.lines.len().max(1));
            if height <= 0.0 {
                return Some(GradientSpec {
                    x0: width / 2.0,
                    y0: 0.0,
                    x1: width / 2.0,
                    y1: height,
                    stops,
                });
            }
            let text_height = metrics.font_metrics.font_size + style.stroke_thickness;
            let line_span = text_height / height;
            let mut current = 0.0_f64;

            for line in 0..metrics.lines.len().max(1) {
                let line_top = metrics.line_height * line as f64;
                for (index, color) in colors.iter().enumerate() {
                    let local = explicit(index).unwrap_or(index as f64 / colors.len() as f64);
                    let global = line_top / height + local * line_span;
                    let clamped = global.max(current).min(1.0);
                    stops.push((clamped, *color));
                    current = clamped;
                }
            }

            Some(GradientSpec {
                x0: width / 2.0,
                y0: 0.0,
                x1: width / 2.0,
                y1: height,
                stops,
            })
        }
        TextGradient::LinearHorizontal => {
            let total = colors.len() as f64 + 1.0;
            let stops = colors
                .iter()
                .enumerate()
                .map(|(index, color)| {
                    let offset = explicit(index).unwrap_or((index as f64 + 1.0) / total);
                    (offset.clamp(0.0, 1.0), *color)
                })
                .collect();

            Some(GradientSpec {
                x0: 0.0,
                y0: height / 2.0,
                x1: width,
                y1: height / 2.0,
                stops,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FontMetricsCache, Text, TextMeasure, TextMeasurer, TextStyle, fill_gradient};
    use crate::math::Point;
    use crate::text::TextGradient;

    struct Fixed;

    impl TextMeasurer for Fixed {
        fn set_font(&mut self, _font: &str) {}

        fn measure_text(&mut self, text: &str) -> TextMeasure {
            TextMeasure {
                width: text.chars().count() as f64 * 10.0,
                ascent: 8.0,
                descent: 2.0,
            }
        }
    }

    #[test]
    fn unmeasured_text_has_no_size() {
        let text = Text::new("hello", TextStyle::default());
        assert_eq!(text.size(), (0.0, 0.0));
        assert!(!text.contains_local_point(Point::new(0.0, 0.0)));
    }

    #[test]
    fn anchor_shifts_hit_box() {
        let mut text = Text::new("abcd", TextStyle::new("Arial", 10.0, 0)).with_anchor(0.5, 1.0);
        let _ = text.update_metrics(&mut Fixed, &mut FontMetricsCache::new());
        assert!(text.contains_local_point(Point::new(-19.0, -1.0)));
        assert!(!text.contains_local_point(Point::new(21.0, -1.0)));
    }

    #[test]
    fn vertical_gradient_repeats_per_line() {
        let mut style = TextStyle::new("Arial", 10.0, 0);
        style.fill = vec![0xFF0000, 0x0000FF];
        let mut text = Text::new("a\nb", style.clone());
        let metrics = text
            .update_metrics(&mut Fixed, &mut FontMetricsCache::new())
            .clone();
        let gradient = fill_gradient(&style, &metrics).expect("gradient");

        assert_eq!(gradient.stops.len(), 4);
        assert_eq!(gradient.stops[0], (0.0, 0xFF0000));
        assert_eq!(gradient.stops[2], (0.5, 0xFF0000));
        let offsets: Vec<f64> = gradient.stops.iter().map(|stop| stop.0).collect();
        assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn horizontal_gradient_spreads_evenly() {
        let mut style = TextStyle::new("Arial", 10.0, 0);
        style.fill = vec![0xFF0000, 0x00FF00, 0x0000FF];
        style.fill_gradient_type = TextGradient::LinearHorizontal;
        let mut text = Text::new("abc", style.clone());
        let metrics = text
            .update_metrics(&mut Fixed, &mut FontMetricsCache::new())
            .clone();
        let gradient = fill_gradient(&style, &metrics).expect("gradient");
        let offsets: Vec<f64> = gradient.stops.iter().map(|stop| stop.0).collect();
        assert_eq!(offsets, vec![0.25, 0.5, 0.75]);
        assert_eq!(gradient.x1, 30.0);
    }
}
