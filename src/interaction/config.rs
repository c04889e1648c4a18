use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{StageError, StageResult};
use crate::interaction::InputCapabilities;

/// Interaction manager settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    #[serde(default)]
    pub capabilities: InputCapabilities,
    /// Deliver move events only to nodes under the pointer.
    #[serde(default)]
    pub move_when_inside: bool,
    /// Quiet time that ends a wheel zoom gesture.
    #[serde(default = "default_wheel_gesture_end_ms")]
    pub wheel_gesture_end_ms: u64,
    /// Cursor mode to CSS cursor value.
    #[serde(default = "default_cursor_styles")]
    pub cursor_styles: IndexMap<String, String>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            capabilities: InputCapabilities::default(),
            move_when_inside: false,
            wheel_gesture_end_ms: default_wheel_gesture_end_ms(),
            cursor_styles: default_cursor_styles(),
        }
    }
}

impl InteractionConfig {
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: InputCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn with_move_when_inside(mut self, move_when_inside: bool) -> Self {
        self.move_when_inside = move_when_inside;
        self
    }

    #[must_use]
    pub fn with_wheel_gesture_end_ms(mut self, wheel_gesture_end_ms: u64) -> Self {
        self.wheel_gesture_end_ms = wheel_gesture_end_ms;
        self
    }

    #[must_use]
    pub fn with_cursor_style(mut self, mode: impl Into<String>, css: impl Into<String>) -> Self {
        self.cursor_styles.insert(mode.into(), css.into());
        self
    }

    pub fn validate(&self) -> StageResult<()> {
        if self.wheel_gesture_end_ms == 0 {
            return Err(StageError::InvalidData(
                "wheel gesture end must be > 0 ms".to_owned(),
            ));
        }
        if let Some((mode, _)) = self
            .cursor_styles
            .iter()
            .find(|(mode, css)| mode.is_empty() || css.is_empty())
        {
            return Err(StageError::InvalidData(format!(
                "cursor style for mode `{mode}` must be a non-empty mode and value"
            )));
        }
        Ok(())
    }
}

fn default_wheel_gesture_end_ms() -> u64 {
    150
}

fn default_cursor_styles() -> IndexMap<String, String> {
    IndexMap::from([
        ("default".to_owned(), "inherit".to_owned()),
        ("pointer".to_owned(), "pointer".to_owned()),
    ])
}
