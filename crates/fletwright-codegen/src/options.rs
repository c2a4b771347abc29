//! Generator options.

use serde::{Deserialize, Serialize};

/// Default stem for button handler names.
pub const DEFAULT_HANDLER_PREFIX: &str = "handle_click";

/// Default image source when an image element has no content.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://picsum.photos/200";

/// Title used by the minimal document.
pub const DEFAULT_TITLE: &str = "Generated Flet App";

/// Options for Flet code generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Window title set on the page. When unset, the full document leaves
    /// Flet's default title alone.
    pub title: Option<String>,
    /// Stem for generated button handler names (`<prefix>_0`, `<prefix>_1`, ...).
    pub handler_prefix: String,
    /// Image source used when an image element has no content.
    pub placeholder_image: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            title: None,
            handler_prefix: DEFAULT_HANDLER_PREFIX.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_handler_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.handler_prefix = prefix.into();
        self
    }
}
