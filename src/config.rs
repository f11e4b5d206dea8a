//! Presentation settings for the changelog window

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Default color of section headers (teal).
pub const DEFAULT_HEADER_COLOR: Color = Color::Rgb(0x60, 0xD0, 0xD0);

/// Default color of highlighted entries (blue).
pub const DEFAULT_HIGHLIGHT_COLOR: Color = Color::Rgb(0x60, 0x60, 0xFF);

/// Presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Window title
    #[serde(default = "default_label")]
    pub label: String,

    /// Color used for section headers and the window border
    #[serde(default = "default_header_color")]
    pub header_color: Color,

    /// Color applied by `add_highlight`
    #[serde(default = "default_highlight_color")]
    pub highlight_color: Color,
}

fn default_label() -> String {
    "Changelog".to_string()
}

const fn default_header_color() -> Color {
    DEFAULT_HEADER_COLOR
}

const fn default_highlight_color() -> Color {
    DEFAULT_HIGHLIGHT_COLOR
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label: default_label(),
            header_color: default_header_color(),
            highlight_color: default_highlight_color(),
        }
    }
}
