//! Key and mouse handling for the changelog window.
//!
//! Hit-testing recomputes the same layout the renderer used, so no geometry
//! needs to be kept between frames.

use super::layout::{RowKind, body_rows, max_scroll, window_layout};
use super::{Selection, ViewState};
use crate::changelog::Changelog;
use ratatui::crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

const WHEEL_STEP: usize = 3;

/// What lies under a screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Header of the section with this version index.
    Header(usize),
    /// An entry line of the section with this version index.
    Entry(usize),
    /// The acknowledgement button.
    Button,
    /// Inside the window but on nothing interactive.
    Window,
    /// Outside the window.
    Outside,
}

/// Find what was drawn at `(x, y)` for a window rendered into `frame_area`.
#[must_use]
pub fn hit_test(
    changelog: &Changelog,
    view: &ViewState,
    frame_area: Rect,
    x: u16,
    y: u16,
) -> Hit {
    let layout = window_layout(frame_area);
    if !rect_contains(layout.window, x, y) {
        return Hit::Outside;
    }
    if rect_contains(layout.button, x, y) {
        return Hit::Button;
    }
    if !rect_contains(layout.body, x, y) {
        return Hit::Window;
    }

    let (rows, _) = body_rows(changelog, view, layout.body);
    let scroll = view
        .scroll
        .min(max_scroll(rows.len(), usize::from(layout.body.height)));
    let row = scroll.saturating_add(usize::from(y - layout.body.y));

    match rows.get(row).map(|row| row.kind) {
        Some(RowKind::Header(index)) => Hit::Header(index),
        Some(RowKind::Entry(index)) => Hit::Entry(index),
        Some(RowKind::Spacer) | None => Hit::Window,
    }
}

/// Handle a key press while the window is open.
///
/// Returns `true` if the key was consumed.
pub fn handle_key(
    changelog: &mut Changelog,
    view: &mut ViewState,
    code: KeyCode,
    frame_area: Rect,
) -> bool {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            move_selection(changelog, view, -1, frame_area);
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            move_selection(changelog, view, 1, frame_area);
        }
        KeyCode::Enter | KeyCode::Char(' ') => activate(changelog, view),
        KeyCode::Char('u') => changelog.acknowledge(),
        KeyCode::Char('y') => {
            if let Selection::Section(index) = view.selected {
                changelog.export_section(index);
            }
        }
        KeyCode::PageUp => {
            let page = usize::from(window_layout(frame_area).body.height).max(1);
            view.scroll = view.scroll.saturating_sub(page);
        }
        KeyCode::PageDown => {
            let page = usize::from(window_layout(frame_area).body.height).max(1);
            scroll_by(changelog, view, frame_area, page);
        }
        KeyCode::Home | KeyCode::Char('g') => view.scroll = 0,
        KeyCode::End | KeyCode::Char('G') => scroll_by(changelog, view, frame_area, usize::MAX),
        _ => return false,
    }
    true
}

/// Handle a mouse event while the window is open.
///
/// Left click toggles headers and presses the button, right click on a
/// header exports that section, and the wheel scrolls the body. Returns
/// `true` if the event was consumed.
pub fn handle_mouse(
    changelog: &mut Changelog,
    view: &mut ViewState,
    mouse: MouseEvent,
    frame_area: Rect,
) -> bool {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match hit_test(changelog, view, frame_area, mouse.column, mouse.row) {
                Hit::Header(index) => {
                    view.selected = Selection::Section(index);
                    changelog.toggle_section(index);
                }
                Hit::Button => {
                    view.selected = Selection::Button;
                    changelog.acknowledge();
                }
                Hit::Entry(_) | Hit::Window | Hit::Outside => return false,
            }
            true
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if let Hit::Header(index) =
                hit_test(changelog, view, frame_area, mouse.column, mouse.row)
            {
                debug!(index, "Exporting changelog section");
                changelog.export_section(index);
                return true;
            }
            false
        }
        MouseEventKind::ScrollUp => {
            view.scroll = view.scroll.saturating_sub(WHEEL_STEP);
            true
        }
        MouseEventKind::ScrollDown => {
            scroll_by(changelog, view, frame_area, WHEEL_STEP);
            true
        }
        _ => false,
    }
}

fn activate(changelog: &mut Changelog, view: &ViewState) {
    match view.selected {
        Selection::Section(index) => changelog.toggle_section(index),
        Selection::Button => changelog.acknowledge(),
    }
}

fn move_selection(changelog: &Changelog, view: &mut ViewState, delta: isize, frame_area: Rect) {
    let order = ViewState::focus_order(changelog);
    let current = order
        .iter()
        .position(|item| *item == view.selected)
        .unwrap_or(0);
    let next = current
        .saturating_add_signed(delta)
        .min(order.len().saturating_sub(1));

    if let Some(selected) = order.get(next) {
        view.selected = *selected;
    }
    scroll_to_selection(changelog, view, frame_area);
}

fn scroll_by(changelog: &Changelog, view: &mut ViewState, frame_area: Rect, amount: usize) {
    let body = window_layout(frame_area).body;
    let (rows, _) = body_rows(changelog, view, body);
    let max_offset = max_scroll(rows.len(), usize::from(body.height));
    view.scroll = view.scroll.saturating_add(amount).min(max_offset);
}

fn scroll_to_selection(changelog: &Changelog, view: &mut ViewState, frame_area: Rect) {
    let Selection::Section(index) = view.selected else {
        return;
    };

    let body = window_layout(frame_area).body;
    let (rows, _) = body_rows(changelog, view, body);
    let Some(row) = rows
        .iter()
        .position(|row| row.kind == RowKind::Header(index))
    else {
        return;
    };

    let visible = usize::from(body.height).max(1);
    if row < view.scroll {
        view.scroll = row;
    } else if row >= view.scroll.saturating_add(visible) {
        view.scroll = row.saturating_sub(visible.saturating_sub(1));
    }
}

const fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}
