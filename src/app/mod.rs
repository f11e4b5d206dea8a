//! Demo host application state and logic
//!
//! A minimal host that embeds the changelog window the way a real
//! application would: evaluate the open state every frame, draw the window on
//! top of its own screen while open, and route input to it first.

mod event;

pub use event::{Event, Handler};

use crate::changelog::Changelog;
use crate::view::{self, ViewState};
use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;
use tracing::debug;

/// Demo host state
#[derive(Debug)]
pub struct App {
    /// The embedded changelog window
    pub changelog: Changelog,
    /// View state of the changelog window
    pub view: ViewState,
    /// Whether the main loop should exit
    pub should_quit: bool,
    /// Area of the last drawn frame, used for mouse hit-testing
    pub frame_area: Rect,
    was_open: bool,
}

impl App {
    /// Create the host around a populated changelog.
    #[must_use]
    pub fn new(changelog: Changelog) -> Self {
        let view = ViewState::for_changelog(&changelog);
        Self {
            changelog,
            view,
            should_quit: false,
            frame_area: Rect::default(),
            was_open: false,
        }
    }

    /// Per-frame open check. Resets the view when the window (re)opens.
    pub fn pre_frame(&mut self) -> bool {
        let open = self.changelog.evaluate_open_state();
        if open && !self.was_open {
            debug!("Changelog window opened");
            self.view = ViewState::for_changelog(&self.changelog);
        }
        self.was_open = open;
        open
    }

    /// Ask the changelog to show again even though everything was read.
    pub const fn reopen_changelog(&mut self) {
        self.changelog.set_force_open(true);
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.changelog.is_open()
            && view::handle_key(&mut self.changelog, &mut self.view, code, self.frame_area)
        {
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') => self.reopen_changelog(),
            _ => {}
        }
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.changelog.is_open() {
            view::handle_mouse(&mut self.changelog, &mut self.view, mouse, self.frame_area);
        }
    }
}
