use indexmap::IndexMap;
use tracing::trace;

use super::style::TextStyle;

/// Glyph run measured against the active font.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMeasure {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

/// Anything able to size a run of text in a CSS font.
pub trait TextMeasurer {
    fn set_font(&mut self, font: &str);
    fn measure_text(&mut self, text: &str) -> TextMeasure;
}

/// Vertical metrics of one font string.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontMetrics {
    pub ascent: f64,
    pub descent: f64,
    pub font_size: f64,
}

/// Sample covering both tall capitals and descenders.
const METRICS_STRING: &str = "|\u{c9}q\u{c5}";

/// Per-font vertical metrics, keyed by the font shorthand.
#[derive(Debug, Clone, Default)]
pub struct FontMetricsCache {
    fonts: IndexMap<String, FontMetrics>,
}

impl FontMetricsCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
    }

    pub fn get_or_measure<M: TextMeasurer + ?Sized>(
        &mut self,
        font: &str,
        fallback_size: f64,
        measurer: &mut M,
    ) -> FontMetrics {
        if let Some(metrics) = self.fonts.get(font) {
            return *metrics;
        }

        measurer.set_font(font);
        let sample = measurer.measure_text(METRICS_STRING);
        let mut metrics = FontMetrics {
            ascent: sample.ascent,
            descent: sample.descent,
            font_size: sample.ascent + sample.descent,
        };
        if !(metrics.font_size > 0.0) {
            metrics = FontMetrics {
                ascent: fallback_size,
                descent: 0.0,
                font_size: fallback_size,
            };
        }
        trace!(font, ascent = metrics.ascent, descent = metrics.descent, "measure font");
        self.fonts.insert(font.to_owned(), metrics);
        metrics
    }
}

/// Layout of a block of text under one style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetrics {
    pub text: String,
    pub font: String,
    pub width: f64,
    pub height: f64,
    pub lines: Vec<String>,
    pub line_widths: Vec<f64>,
    /// Distance between consecutive baselines, leading included.
    pub line_height: f64,
    pub max_line_width: f64,
    pub font_metrics: FontMetrics,
}

impl TextMetrics {
    pub fn measure<M: TextMeasurer + ?Sized>(
        text: &str,
        style: &TextStyle,
        measurer: &mut M,
        cache: &mut FontMetricsCache,
    ) -> Self {
        let font = style.to_font_string();
        let font_metrics = cache.get_or_measure(&font, style.font_size, measurer);
        measurer.set_font(&font);

        let laid_out = if style.word_wrap {
            word_wrap(text, style, measurer)
        } else {
            text.to_owned()
        };
        let lines: Vec<String> = split_lines(&laid_out).map(str::to_owned).collect();

        let line_widths: Vec<f64> = lines
            .iter()
            .map(|line| measure_line(line, style.letter_spacing, measurer))
            .collect();
        let max_line_width = line_widths.iter().copied().fold(0.0, f64::max);

        let width = max_line_width + style.stroke_thickness;
        let line_height = if style.line_height > 0.0 {
            style.line_height
        } else {
            font_metrics.font_size + style.stroke_thickness
        };
        let line_count = lines.len().max(1) as f64;
        let height = line_height.max(font_metrics.font_size + style.stroke_thickness)
            + (line_count - 1.0) * (line_height + style.leading);

        Self {
            text: text.to_owned(),
            font,
            width,
            height,
            lines,
            line_widths,
            line_height: line_height + style.leading,
            max_line_width,
            font_metrics,
        }
    }
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn measure_line<M: TextMeasurer + ?Sized>(
    line: &str,
    letter_spacing: f64,
    measurer: &mut M,
) -> f64 {
    let chars = line.chars().count();
    let spacing = if chars > 1 {
        (chars - 1) as f64 * letter_spacing
    } else {
        0.0
    };
    measurer.measure_text(line).width + spacing
}

fn token_width<M: TextMeasurer + ?Sized>(
    token: &str,
    letter_spacing: f64,
    measurer: &mut M,
) -> f64 {
    measurer.measure_text(token).width + token.chars().count() as f64 * letter_spacing
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Space,
    Word,
}

fn tokenize(paragraph: &str) -> Vec<(TokenKind, &str)> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<TokenKind> = None;

    for (index, ch) in paragraph.char_indices() {
        let kind = if ch == ' ' || ch == '\t' {
            TokenKind::Space
        } else {
            TokenKind::Word
        };
        match current {
            Some(previous) if previous == kind => {}
            Some(previous) => {
                tokens.push((previous, &paragraph[start..index]));
                start = index;
                current = Some(kind);
            }
            None => current = Some(kind),
        }
    }
    if let Some(kind) = current {
        tokens.push((kind, &paragraph[start..]));
    }
    tokens
}

/// Greedy wrap at `word_wrap_width`, splitting over-long words into
/// characters when `break_words` is set.
fn word_wrap<M: TextMeasurer + ?Sized>(
    text: &str,
    style: &TextStyle,
    measurer: &mut M,
) -> String {
    let max_width = style.word_wrap_width;
    let collapse_spaces = style.collapses_spaces();
    let paragraphs: Vec<String> = if style.collapses_newlines() {
        vec![split_lines(text).collect::<Vec<_>>().join(" ")]
    } else {
        split_lines(text).map(str::to_owned).collect()
    };

    let mut out_lines: Vec<String> = Vec::new();
    for paragraph in &paragraphs {
        let mut line = String::new();
        let mut width = 0.0;

        for (kind, raw) in tokenize(paragraph) {
            let token = if kind == TokenKind::Space && collapse_spaces {
                " "
            } else {
                raw
            };
            let redundant_space = line.is_empty() || line.ends_with(' ');
            if kind == TokenKind::Space && collapse_spaces && redundant_space {
                continue;
            }

            let token_w = token_width(token, style.letter_spacing, measurer);
            if width + token_w <= max_width {
                line.push_str(token);
                width += token_w;
                continue;
            }

            if kind == TokenKind::Space {
                if !collapse_spaces {
                    line.push_str(token);
                    width += token_w;
                }
                continue;
            }

            if !line.is_empty() {
                push_line(&mut out_lines, &mut line, collapse_spaces);
                width = 0.0;
            }

            if token_w > max_width && style.break_words {
                for ch in token.chars() {
                    let mut buf = [0_u8; 4];
                    let glyph: &str = ch.encode_utf8(&mut buf);
                    let glyph_w = token_width(glyph, style.letter_spacing, measurer);
                    if width + glyph_w > max_width && !line.is_empty() {
                        push_line(&mut out_lines, &mut line, collapse_spaces);
                        width = 0.0;
                    }
                    line.push(ch);
                    width += glyph_w;
                }
            } else {
                line.push_str(token);
                width = token_w;
            }
        }

        push_line(&mut out_lines, &mut line, collapse_spaces);
    }

    out_lines.join("\n")
}

fn push_line(lines: &mut Vec<String>, line: &mut String, trim_trailing: bool) {
    let finished = std::mem::take(line);
    if trim_trailing {
        lines.push(finished.trim_end_matches(' ').to_owned());
    } else {
        lines.push(finished);
    }
}

#[cfg(test)]
mod tests {
    use super::{FontMetricsCache, TextMeasure, TextMeasurer, TextMetrics};
    use crate::text::{TextStyle, WhiteSpace};

    /// 10px per char, ascent 8, descent 2.
    struct Fixed {
        measured: usize,
    }

    impl TextMeasurer for Fixed {
        fn set_font(&mut self, _font: &str) {}

        fn measure_text(&mut self, text: &str) -> TextMeasure {
            self.measured += 1;
            TextMeasure {
                width: text.chars().count() as f64 * 10.0,
                ascent: 8.0,
                descent: 2.0,
            }
        }
    }

    #[test]
    fn multi_line_height_and_spacing() {
        let mut style = TextStyle::new("Arial", 10.0, 0x000000);
        style.letter_spacing = 1.0;
        style.leading = 2.0;
        let mut cache = FontMetricsCache::new();
        let metrics = TextMetrics::measure("abc\nde", &style, &mut Fixed { measured: 0 }, &mut cache);

        assert_eq!(metrics.lines, vec!["abc".to_owned(), "de".to_owned()]);
        assert_eq!(metrics.line_widths, vec![32.0, 21.0]);
        assert_eq!(metrics.width, 32.0);
        assert_eq!(metrics.line_height, 12.0);
        assert_eq!(metrics.height, 10.0 + 12.0);
    }

    #[test]
    fn font_metrics_are_cached_per_font() {
        let style = TextStyle::new("Arial", 10.0, 0x000000);
        let mut cache = FontMetricsCache::new();
        let mut measurer = Fixed { measured: 0 };
        let _ = TextMetrics::measure("a", &style, &mut measurer, &mut cache);
        // font sample + one line
        assert_eq!(measurer.measured, 2);
        let _ = TextMetrics::measure("a", &style, &mut measurer, &mut cache);
        assert_eq!(cache.len(), 1);
        assert_eq!(measurer.measured, 3);
    }

    #[test]
    fn word_wrap_breaks_on_spaces() {
        let mut style = TextStyle::new("Arial", 10.0, 0x000000);
        style.word_wrap = true;
        style.word_wrap_width = 50.0;
        style.white_space = WhiteSpace::Normal;
        let mut cache = FontMetricsCache::new();
        let metrics =
            TextMetrics::measure("abc de fghi", &style, &mut Fixed { measured: 0 }, &mut cache);
        assert_eq!(metrics.lines, vec!["abc".to_owned(), "de".to_owned(), "fghi".to_owned()]);
    }

    #[test]
    fn break_words_splits_long_tokens() {
        let mut style = TextStyle::new("Arial", 10.0, 0x000000);
        style.word_wrap = true;
        style.break_words = true;
        style.word_wrap_width = 30.0;
        let mut cache = FontMetricsCache::new();
        let metrics =
            TextMetrics::measure("abcdefg", &style, &mut Fixed { measured: 0 }, &mut cache);
        assert_eq!(
            metrics.lines,
            vec!["abc".to_owned(), "def".to_owned(), "g".to_owned()]
        );
    }
}
