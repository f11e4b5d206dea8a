//! Terminal User Interface for the demo host

use crate::app::{App, Event, Handler};
use crate::view;
use anyhow::Result;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use tracing::info;

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to, or restored.
pub fn run(mut app: App, tick_rate_ms: u64) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = Handler::new(tick_rate_ms);
    let result = run_loop(&mut terminal, &mut app, &event_handler);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &Handler,
) -> Result<()> {
    info!("Entering main loop");

    loop {
        draw(terminal, app)?;

        match event_handler.next()? {
            Event::Key(key) => app.handle_key(key.code, key.modifiers),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Tick | Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    info!("Leaving main loop");
    Ok(())
}

/// Evaluate the changelog and draw one frame.
///
/// # Errors
///
/// Returns an error if the backend fails to draw.
pub fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    app.pre_frame();
    terminal.draw(|frame| render(frame, app))?;
    Ok(())
}

/// Render the host screen and, when open, the changelog window over it.
pub fn render(frame: &mut Frame<'_>, app: &mut App) {
    app.frame_area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let body = vec![
        Line::from("This is a host application embedding the changelog window."),
        Line::from(""),
        Line::from(format!(
            "{} release note sections registered.",
            app.changelog.section_count()
        )),
    ];
    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" whatsnew ").borders(Borders::ALL));
    frame.render_widget(paragraph, chunks[0]);

    let status = if app.changelog.is_open() {
        " [\u{2191}\u{2193}]select [Enter]toggle [u]nderstood [y]ank "
    } else {
        " [c]hangelog [q]uit "
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            status,
            Style::default().fg(Color::Gray),
        )))
        .style(Style::default().bg(Color::DarkGray)),
        chunks[1],
    );

    if app.changelog.is_open() {
        view::render_changelog(frame, &app.changelog, &mut app.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::Changelog;
    use crate::store::MemoryStore;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut result = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                result.push_str(buf[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }

    fn app_with(last_version: usize) -> Result<App, Box<dyn std::error::Error>> {
        let mut changelog = Changelog::new("Release Notes", MemoryStore::with_version(last_version));
        changelog.start_section("Version 1.0").add_entry("hello", 0)?;
        Ok(App::new(changelog))
    }

    #[test]
    fn test_draw_shows_window_when_unread() -> Result<(), Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        let mut app = app_with(0)?;

        draw(&mut terminal, &mut app)?;

        let text = buffer_text(&terminal);
        assert!(text.contains("Release Notes"));
        assert!(text.contains("hello"));
        assert_eq!(app.frame_area, ratatui::layout::Rect::new(0, 0, 100, 30));
        Ok(())
    }

    #[test]
    fn test_draw_hides_window_when_read() -> Result<(), Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        let mut app = app_with(1)?;

        draw(&mut terminal, &mut app)?;

        let text = buffer_text(&terminal);
        assert!(!text.contains("Release Notes"));
        assert!(text.contains("[c]hangelog"));
        Ok(())
    }
}
