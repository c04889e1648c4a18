use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        }
    }
}

/// Direction of a multi-color fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextGradient {
    /// Top to bottom, repeated for every line.
    LinearVertical,
    /// Left to right across the whole block.
    LinearHorizontal,
}

/// How whitespace and newlines are treated when wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhiteSpace {
    /// Collapse spaces and newlines.
    Normal,
    /// Keep spaces and newlines.
    Pre,
    /// Collapse spaces, keep newlines.
    PreLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_style")]
    pub font_style: FontStyle,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
    /// One color for a solid fill, several for a gradient. Empty disables
    /// the fill pass.
    #[serde(default = "default_fill")]
    pub fill: Vec<u32>,
    #[serde(default = "default_fill_gradient_type")]
    pub fill_gradient_type: TextGradient,
    /// Explicit 0..1 stop offsets, one per fill color.
    #[serde(default)]
    pub fill_gradient_stops: Vec<f64>,
    #[serde(default)]
    pub stroke: u32,
    #[serde(default)]
    pub stroke_thickness: f64,
    #[serde(default)]
    pub letter_spacing: f64,
    #[serde(default)]
    pub word_wrap: bool,
    #[serde(default = "default_word_wrap_width")]
    pub word_wrap_width: f64,
    #[serde(default)]
    pub break_words: bool,
    #[serde(default = "default_align")]
    pub align: TextAlign,
    /// Line height in pixels; `0` derives it from the font size.
    #[serde(default)]
    pub line_height: f64,
    #[serde(default)]
    pub leading: f64,
    #[serde(default)]
    pub padding: f64,
    #[serde(default = "default_white_space")]
    pub white_space: WhiteSpace,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_style: default_font_style(),
            font_weight: default_font_weight(),
            fill: default_fill(),
            fill_gradient_type: default_fill_gradient_type(),
            fill_gradient_stops: Vec::new(),
            stroke: 0,
            stroke_thickness: 0.0,
            letter_spacing: 0.0,
            word_wrap: false,
            word_wrap_width: default_word_wrap_width(),
            break_words: false,
            align: default_align(),
            line_height: 0.0,
            leading: 0.0,
            padding: 0.0,
            white_space: default_white_space(),
        }
    }
}

impl TextStyle {
    #[must_use]
    pub fn new(font_family: impl Into<String>, font_size: f64, fill: u32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            fill: vec![fill],
            ..Self::default()
        }
    }

    /// CSS font shorthand, e.g. `normal normal bold 12px Arial`.
    #[must_use]
    pub fn to_font_string(&self) -> String {
        let families = self
            .font_family
            .split(',')
            .map(str::trim)
            .filter(|family| !family.is_empty())
            .map(|family| {
                let unquoted = family.trim_matches(|c| c == '"' || c == '\'');
                if is_generic_family(unquoted) {
                    unquoted.to_owned()
                } else {
                    format!("\"{unquoted}\"")
                }
            })
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{} normal {} {}px {}",
            self.font_style.as_css(),
            self.font_weight,
            self.font_size,
            families
        )
    }

    #[must_use]
    pub fn collapses_spaces(&self) -> bool {
        matches!(self.white_space, WhiteSpace::Normal | WhiteSpace::PreLine)
    }

    #[must_use]
    pub fn collapses_newlines(&self) -> bool {
        self.white_space == WhiteSpace::Normal
    }
}

fn is_generic_family(family: &str) -> bool {
    matches!(
        family,
        "serif" | "sans-serif" | "monospace" | "cursive" | "fantasy" | "system-ui"
    )
}

fn default_font_family() -> String {
    "Arial".to_owned()
}

fn default_font_size() -> f64 {
    26.0
}

fn default_font_style() -> FontStyle {
    FontStyle::Normal
}

fn default_font_weight() -> String {
    "normal".to_owned()
}

fn default_fill() -> Vec<u32> {
    vec![0x000000]
}

fn default_fill_gradient_type() -> TextGradient {
    TextGradient::LinearVertical
}

fn default_word_wrap_width() -> f64 {
    100.0
}

fn default_align() -> TextAlign {
    TextAlign::Left
}

fn default_white_space() -> WhiteSpace {
    WhiteSpace::Pre
}

#[cfg(test)]
mod tests {
    use super::TextStyle;

    #[test]
    fn font_string_quotes_named_families_only() {
        let style = TextStyle::new("Inter, sans-serif", 12.0, 0xFFFFFF);
        assert_eq!(
            style.to_font_string(),
            "normal normal normal 12px \"Inter\",sans-serif"
        );
    }
}
