//! Geometry and line layout for the changelog window.
//!
//! Rendering and mouse hit-testing both go through these functions so clicks
//! map onto exactly what was drawn, without storing layout state between
//! frames.

use super::{Selection, ViewState, colors};
use crate::changelog::{Changelog, Entry};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest the window grows, in columns.
pub const MAX_WIDTH: u16 = 100;
/// Narrowest the window shrinks before it is clipped by the frame.
pub const MIN_WIDTH: u16 = 40;
/// Shortest the window shrinks before it is clipped by the frame.
pub const MIN_HEIGHT: u16 = 10;
/// Columns per indent unit.
pub const INDENT_WIDTH: usize = 2;

const BULLET: &str = "\u{2022} ";
const EXPANDED_MARKER: &str = "\u{25bc} ";
const COLLAPSED_MARKER: &str = "\u{25b6} ";

/// Screen areas of the changelog window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    /// Outer window, including the border.
    pub window: Rect,
    /// Scrollable list of sections.
    pub body: Rect,
    /// The acknowledgement button.
    pub button: Rect,
}

/// What a body row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Header of the section with this version index.
    Header(usize),
    /// Line (possibly a wrapped continuation) of an entry in this section.
    Entry(usize),
    /// Blank separator.
    Spacer,
}

/// One laid-out body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Styled text of the row.
    pub line: Line<'static>,
    /// What the row belongs to.
    pub kind: RowKind,
}

/// Compute the window areas for a frame: half the frame, centered.
#[must_use]
pub fn window_layout(area: Rect) -> WindowLayout {
    let width = (area.width / 2)
        .clamp(MIN_WIDTH, MAX_WIDTH)
        .min(area.width);
    let height = (area.height / 2).max(MIN_HEIGHT).min(area.height);

    let window = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let inner_x = window.x.saturating_add(1);
    let inner_y = window.y.saturating_add(1);
    let inner_width = window.width.saturating_sub(2);
    let inner_height = window.height.saturating_sub(2);

    let body = Rect {
        x: inner_x,
        y: inner_y,
        width: inner_width,
        height: inner_height.saturating_sub(2),
    };

    let button_width = inner_width / 3;
    let button = Rect {
        x: inner_x.saturating_add(button_width),
        y: inner_y.saturating_add(inner_height.saturating_sub(1)),
        width: button_width,
        height: u16::from(inner_height > 0),
    };

    WindowLayout {
        window,
        body,
        button,
    }
}

/// Lay out the body for `body`, reserving a scrollbar column when the rows overflow.
///
/// Returns the rows and the width they were wrapped to.
#[must_use]
pub fn body_rows(changelog: &Changelog, view: &ViewState, body: Rect) -> (Vec<Row>, u16) {
    let rows = build_rows(changelog, view, body.width);
    if body.width != 0 && rows.len() > usize::from(body.height) {
        let reserved = body.width.saturating_sub(1);
        return (build_rows(changelog, view, reserved), reserved);
    }
    (rows, body.width)
}

/// Largest valid scroll offset for `total` rows in a viewport of `visible` rows.
#[must_use]
pub const fn max_scroll(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

/// Lay out every section, newest first, wrapped to `width` columns.
#[must_use]
pub fn build_rows(changelog: &Changelog, view: &ViewState, width: u16) -> Vec<Row> {
    if width == 0 {
        return Vec::new();
    }

    let width = usize::from(width);
    let mut rows = Vec::new();

    for (index, section) in changelog.sections_newest_first() {
        if !rows.is_empty() {
            rows.push(Row {
                line: Line::from(""),
                kind: RowKind::Spacer,
            });
        }

        let expanded = changelog.is_section_expanded(index);
        let marker = if expanded {
            EXPANDED_MARKER
        } else {
            COLLAPSED_MARKER
        };

        let mut header_style = Style::default()
            .fg(changelog.header_color())
            .add_modifier(Modifier::BOLD);
        if view.selected == Selection::Section(index) {
            header_style = header_style.bg(colors::SURFACE_HIGHLIGHT);
        }

        for text in wrap_with_prefix(marker, "  ", &section.title, width) {
            rows.push(Row {
                line: Line::from(Span::styled(text, header_style)),
                kind: RowKind::Header(index),
            });
        }

        if !expanded {
            continue;
        }

        for entry in &section.entries {
            let style = Style::default().fg(entry.color.unwrap_or(colors::TEXT_PRIMARY));
            for text in wrap_entry(entry, width) {
                rows.push(Row {
                    line: Line::from(Span::styled(text, style)),
                    kind: RowKind::Entry(index),
                });
            }
        }
    }

    rows
}

fn wrap_entry(entry: &Entry, width: usize) -> Vec<String> {
    let indent = INDENT_WIDTH.saturating_mul(usize::from(entry.level).saturating_add(1));
    let first_prefix = format!("{}{BULLET}", " ".repeat(indent));
    let subsequent_prefix = " ".repeat(indent.saturating_add(display_width(BULLET)));
    wrap_with_prefix(&first_prefix, &subsequent_prefix, &entry.text, width)
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Greedy word wrap where the first line starts with `first_prefix` and the
/// rest with `subsequent_prefix`. Words longer than a line are split.
fn wrap_with_prefix(
    first_prefix: &str,
    subsequent_prefix: &str,
    content: &str,
    width: usize,
) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let first_available = width.saturating_sub(display_width(first_prefix));
    let subsequent_available = width.saturating_sub(display_width(subsequent_prefix));
    if first_available == 0 || subsequent_available == 0 {
        return chunk_into_width(&prefixed(first_prefix, content), width);
    }

    if content.trim().is_empty() {
        return vec![first_prefix.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    let mut is_first_line = true;

    for word in content.split_whitespace() {
        let mut remaining = word;

        while !remaining.is_empty() {
            let available = if is_first_line {
                first_available
            } else {
                subsequent_available
            };
            let remaining_width = display_width(remaining);

            if current.is_empty() {
                if remaining_width <= available {
                    current.push_str(remaining);
                    current_width = remaining_width;
                    break;
                }

                let (chunk, rest) = split_at_width(remaining, available);
                let prefix = if is_first_line {
                    first_prefix
                } else {
                    subsequent_prefix
                };
                out.push(prefixed(prefix, chunk));
                is_first_line = false;
                remaining = rest;
                continue;
            }

            if current_width
                .saturating_add(1)
                .saturating_add(remaining_width)
                <= available
            {
                current.push(' ');
                current.push_str(remaining);
                current_width = current_width
                    .saturating_add(1)
                    .saturating_add(remaining_width);
                break;
            }

            let prefix = if is_first_line {
                first_prefix
            } else {
                subsequent_prefix
            };
            out.push(prefixed(prefix, &current));
            current.clear();
            current_width = 0;
            is_first_line = false;
        }
    }

    if !current.is_empty() {
        let prefix = if is_first_line {
            first_prefix
        } else {
            subsequent_prefix
        };
        out.push(prefixed(prefix, &current));
    }

    out
}

fn prefixed(prefix: &str, content: &str) -> String {
    let mut out = String::with_capacity(prefix.len().saturating_add(content.len()));
    out.push_str(prefix);
    out.push_str(content);
    out
}

/// Split after at most `max_width` columns, always taking at least one character.
fn split_at_width(s: &str, max_width: usize) -> (&str, &str) {
    let mut used = 0usize;
    for (idx, ch) in s.char_indices() {
        let next = used.saturating_add(ch.width().unwrap_or(0));
        if idx > 0 && next > max_width {
            return s.split_at(idx);
        }
        used = next;
    }
    (s, "")
}

fn chunk_into_width(mut s: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();

    while !s.is_empty() {
        let (chunk, rest) = split_at_width(s, width);
        out.push(chunk.to_string());
        s = rest;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn row_texts(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|row| row.line.to_string()).collect()
    }

    #[test]
    fn test_window_layout_centers_half_frame() {
        let layout = window_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.window, Rect::new(30, 10, 60, 20));
        assert_eq!(layout.body, Rect::new(31, 11, 58, 16));
        assert_eq!(layout.button, Rect::new(50, 28, 19, 1));
    }

    #[test]
    fn test_window_layout_caps_width() {
        let layout = window_layout(Rect::new(0, 0, 400, 40));
        assert_eq!(layout.window.width, MAX_WIDTH);
    }

    #[test]
    fn test_window_layout_clips_to_small_frames() {
        let area = Rect::new(0, 0, 30, 6);
        let layout = window_layout(area);
        assert_eq!(layout.window, area);
    }

    #[test]
    fn test_build_rows_newest_first_with_entries() -> Result<(), Box<dyn std::error::Error>> {
        let mut changelog = Changelog::new("Changelog", MemoryStore::with_version(0));
        changelog.start_section("1.0").add_entry("old", 0)?;
        changelog
            .start_section("1.1")
            .add_entry("new", 0)?
            .add_entry("detail", 1)?;
        changelog.evaluate_open_state();

        let rows = build_rows(&changelog, &ViewState::default(), 40);
        assert_eq!(
            row_texts(&rows),
            vec![
                "\u{25bc} 1.1",
                "  \u{2022} new",
                "    \u{2022} detail",
                "",
                "\u{25bc} 1.0",
                "  \u{2022} old",
            ]
        );
        assert_eq!(rows[0].kind, RowKind::Header(1));
        assert_eq!(rows[5].kind, RowKind::Entry(0));
        Ok(())
    }

    #[test]
    fn test_build_rows_hides_collapsed_entries() -> Result<(), Box<dyn std::error::Error>> {
        let mut changelog = Changelog::new("Changelog", MemoryStore::with_version(2));
        changelog.start_section("1.0").add_entry("old", 0)?;
        changelog.start_section("1.1").add_entry("new", 0)?;
        changelog.evaluate_open_state();

        let rows = build_rows(&changelog, &ViewState::default(), 40);
        assert_eq!(
            row_texts(&rows),
            vec!["\u{25bc} 1.1", "  \u{2022} new", "", "\u{25b6} 1.0"]
        );
        Ok(())
    }

    #[test]
    fn test_build_rows_colors_highlights() -> Result<(), Box<dyn std::error::Error>> {
        let mut changelog = Changelog::new("Changelog", MemoryStore::with_version(0));
        changelog
            .start_section("1.0")
            .add_highlight("loud", 0)?
            .add_entry("quiet", 0)?;
        changelog.evaluate_open_state();

        let rows = build_rows(&changelog, &ViewState::default(), 40);
        assert_eq!(
            rows[1].line.spans[0].style.fg,
            Some(changelog.highlight_color())
        );
        assert_eq!(rows[2].line.spans[0].style.fg, Some(colors::TEXT_PRIMARY));
        Ok(())
    }

    #[test]
    fn test_build_rows_empty_width_is_empty() {
        let mut changelog = Changelog::new("Changelog", MemoryStore::with_version(0));
        changelog.start_section("1.0");
        assert!(build_rows(&changelog, &ViewState::default(), 0).is_empty());
    }

    #[test]
    fn test_wrap_entry_aligns_continuation_under_text() {
        let entry = Entry::plain("one two three four", 0);
        assert_eq!(
            wrap_entry(&entry, 12),
            vec![
                "  \u{2022} one two".to_string(),
                "    three".to_string(),
                "    four".to_string(),
            ]
        );
    }

    #[test]
    fn test_wrap_with_prefix_chunks_long_word() {
        let wrapped = wrap_with_prefix("- ", "  ", "abcdefghijklmnop", 8);
        assert_eq!(
            wrapped,
            vec![
                "- abcdef".to_string(),
                "  ghijkl".to_string(),
                "  mnop".to_string()
            ]
        );
    }

    #[test]
    fn test_wrap_with_prefix_chunks_when_width_smaller_than_prefix() {
        let wrapped = wrap_with_prefix("    - ", "      ", "abc", 4);
        assert_eq!(
            wrapped,
            vec!["    ".to_string(), "- ab".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_wrap_with_prefix_empty_content_keeps_prefix() {
        assert_eq!(wrap_with_prefix("- ", "  ", "   ", 10), vec!["- ".to_string()]);
    }

    #[test]
    fn test_split_at_width_does_not_split_utf8() {
        assert_eq!(split_at_width("\u{e9}\u{e9}", 1), ("\u{e9}", "\u{e9}"));
        assert_eq!(split_at_width("abc", 0), ("a", "bc"));
    }

    #[test]
    fn test_split_at_width_counts_wide_characters_as_two_columns() {
        assert_eq!(
            split_at_width("\u{6f22}\u{5b57}\u{6f22}", 4),
            ("\u{6f22}\u{5b57}", "\u{6f22}")
        );
        assert_eq!(split_at_width("\u{6f22}", 1), ("\u{6f22}", ""));
    }

    #[test]
    fn test_build_rows_wide_text_stays_inside_width() -> Result<(), Box<dyn std::error::Error>> {
        let mut changelog = Changelog::new("Changelog", MemoryStore::with_version(0));
        changelog.start_section("2.0").add_entry(
            "\u{5909}\u{66f4}\u{5c65}\u{6b74}\u{306e}\u{8868}\u{793a}\u{3092}\u{6539}\u{5584}\u{3057}\u{307e}\u{3057}\u{305f}\u{3002}\u{7d30}\u{304b}\u{3044}\u{4fee}\u{6b63}",
            0,
        )?;
        changelog.evaluate_open_state();

        let rows = build_rows(&changelog, &ViewState::default(), 20);
        assert!(rows.len() > 2);
        for row in &rows {
            assert!(row.line.width() <= 20, "row too wide: {}", row.line);
        }
        Ok(())
    }

    #[test]
    fn test_max_scroll() {
        assert_eq!(max_scroll(10, 4), 6);
        assert_eq!(max_scroll(3, 4), 0);
    }
}
