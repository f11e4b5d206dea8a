//! Changelog window rendering.

use super::layout::{body_rows, max_scroll, window_layout};
use super::{Selection, ViewState, colors};
use crate::changelog::Changelog;
use ratatui::layout::{Alignment, Rect};
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Label of the acknowledgement button.
pub const BUTTON_LABEL: &str = "Understood";

/// Render the changelog window over whatever is already in the frame.
///
/// Clamps `view.scroll` to the current content so input handlers see the
/// offset that was actually drawn.
pub fn render_changelog(frame: &mut Frame<'_>, changelog: &Changelog, view: &mut ViewState) {
    let layout = window_layout(frame.area());

    let block = Block::default()
        .title(format!(" {} ", changelog.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(changelog.header_color()))
        .border_type(colors::BORDER_TYPE)
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, layout.window);
    frame.render_widget(block, layout.window);

    let (rows, _) = body_rows(changelog, view, layout.body);
    let visible_height = usize::from(layout.body.height);
    let total_rows = rows.len();
    let max_offset = max_scroll(total_rows, visible_height);
    view.scroll = view.scroll.min(max_offset);
    let scroll_pos = u16::try_from(view.scroll).unwrap_or(u16::MAX);

    let lines: Vec<Line<'static>> = rows.into_iter().map(|row| row.line).collect();
    let paragraph = Paragraph::new(lines)
        .scroll((scroll_pos, 0))
        .style(Style::default().fg(colors::TEXT_PRIMARY));
    frame.render_widget(paragraph, layout.body);

    if total_rows > visible_height {
        render_scrollbar(frame, layout.body, view.scroll, max_offset, visible_height);
    }

    render_button(frame, layout.button, view.selected == Selection::Button);
}

fn render_scrollbar(
    frame: &mut Frame<'_>,
    body: Rect,
    scroll: usize,
    max_offset: usize,
    visible_height: usize,
) {
    if body.width == 0 || body.height == 0 {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some("\u{2591}"))
        .track_style(Style::default().fg(colors::TEXT_MUTED))
        .thumb_style(Style::default().fg(colors::TEXT_PRIMARY));

    let mut scrollbar_state = ScrollbarState::new(max_offset.saturating_add(1))
        .position(scroll)
        .viewport_content_length(visible_height);

    frame.render_stateful_widget(scrollbar, body, &mut scrollbar_state);
}

fn render_button(frame: &mut Frame<'_>, area: Rect, focused: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let style = if focused {
        Style::default()
            .fg(colors::SELECTED)
            .bg(colors::SURFACE_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::TEXT_DIM).bg(colors::BUTTON_BG)
    };

    let button = Paragraph::new(BUTTON_LABEL)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(button, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn buffer_to_string(buf: &Buffer) -> String {
        let mut result = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                result.push_str(buf[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }

    fn sample_changelog(last_version: usize) -> Result<Changelog, Box<dyn std::error::Error>> {
        let mut changelog = Changelog::new("What's New", MemoryStore::with_version(last_version));
        changelog
            .start_section("Version 1.0")
            .add_entry("Initial release.", 0)?;
        changelog
            .start_section("Version 1.1")
            .add_highlight("Shiny new window.", 0)?
            .add_entry("Detail about it.", 1)?;
        changelog.evaluate_open_state();
        Ok(changelog)
    }

    #[test]
    fn test_render_changelog_draws_title_sections_and_button()
    -> Result<(), Box<dyn std::error::Error>> {
        let changelog = sample_changelog(0)?;
        let mut view = ViewState::for_changelog(&changelog);

        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|frame| render_changelog(frame, &changelog, &mut view))?;

        let content = buffer_to_string(terminal.backend().buffer());
        assert!(content.contains("What's New"));
        assert!(content.contains("Version 1.1"));
        assert!(content.contains("Shiny new window."));
        assert!(content.contains("Initial release."));
        assert!(content.contains(BUTTON_LABEL));
        Ok(())
    }

    #[test]
    fn test_render_changelog_newest_section_is_drawn_first()
    -> Result<(), Box<dyn std::error::Error>> {
        let changelog = sample_changelog(0)?;
        let mut view = ViewState::default();

        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|frame| render_changelog(frame, &changelog, &mut view))?;

        let content = buffer_to_string(terminal.backend().buffer());
        let newest = content.find("Version 1.1").ok_or("newest section missing")?;
        let oldest = content.find("Version 1.0").ok_or("oldest section missing")?;
        assert!(newest < oldest);
        Ok(())
    }

    #[test]
    fn test_render_changelog_clamps_scroll() -> Result<(), Box<dyn std::error::Error>> {
        let changelog = sample_changelog(0)?;
        let mut view = ViewState {
            scroll: 500,
            selected: Selection::Button,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|frame| render_changelog(frame, &changelog, &mut view))?;

        assert_eq!(view.scroll, 0);
        Ok(())
    }

    #[test]
    fn test_render_changelog_survives_tiny_frames() -> Result<(), Box<dyn std::error::Error>> {
        let changelog = sample_changelog(0)?;
        let mut view = ViewState::default();

        let mut terminal = Terminal::new(TestBackend::new(3, 2))?;
        terminal.draw(|frame| render_changelog(frame, &changelog, &mut view))?;
        Ok(())
    }
}
