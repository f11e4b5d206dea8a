//! Terminal rendering of the changelog window
//!
//! The model in [`crate::changelog`] decides *what* is shown; this module
//! draws it with ratatui and maps key and mouse input back onto the model.
//! Hosts call [`Changelog::evaluate_open_state`] once per frame, then
//! [`render_changelog`] while the window is open.

mod colors;
mod input;
mod layout;
mod render;

pub use input::{Hit, handle_key, handle_mouse, hit_test};
pub use layout::{Row, RowKind, WindowLayout, body_rows, build_rows, window_layout};
pub use render::{BUTTON_LABEL, render_changelog};

use crate::changelog::Changelog;

/// Focusable element of the window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Header of the section with this version index.
    Section(usize),
    /// The acknowledgement button.
    #[default]
    Button,
}

/// Per-window view state kept by the host between frames.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// First visible body row.
    pub scroll: usize,
    /// Focused element.
    pub selected: Selection,
}

impl ViewState {
    /// View state for a freshly opened window: scrolled to the top with the
    /// newest section focused.
    #[must_use]
    pub fn for_changelog(changelog: &Changelog) -> Self {
        let selected = changelog
            .section_count()
            .checked_sub(1)
            .map_or(Selection::Button, Selection::Section);
        Self {
            scroll: 0,
            selected,
        }
    }

    /// Focus order: section headers newest first, then the button.
    #[must_use]
    fn focus_order(changelog: &Changelog) -> Vec<Selection> {
        changelog
            .sections_newest_first()
            .map(|(index, _)| Selection::Section(index))
            .chain(std::iter::once(Selection::Button))
            .collect()
    }
}
