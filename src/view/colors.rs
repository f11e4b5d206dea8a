//! Color palette for the changelog window
//!
//! Muted chrome so the configurable header and highlight colors stand out.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

// Chrome
pub const BORDER_TYPE: BorderType = BorderType::Rounded;
pub const SELECTED: Color = Color::Rgb(100, 180, 220);
pub const SURFACE_HIGHLIGHT: Color = Color::Rgb(50, 55, 70);

// Text
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 230);
pub const TEXT_DIM: Color = Color::Rgb(130, 135, 150);
pub const TEXT_MUTED: Color = Color::Rgb(90, 95, 110);

// Modal
pub const MODAL_BG: Color = Color::Rgb(25, 27, 35);
pub const BUTTON_BG: Color = Color::Rgb(35, 40, 50);
