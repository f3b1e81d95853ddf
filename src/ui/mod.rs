//! Dashboard rendering.
//!
//! # Layout
//! ```text
//! +------------------------------------------+
//! | HEADER: ● live  tick 42  brier 0.213     |
//! +---------------------+--------------------+
//! | TICKS               | WORKSPACE          |
//! |  Tick 1: ...        |  [ {...} ]         |
//! |  Tick 2: None       +--------------------+
//! |                     | NARRATIVE          |
//! +---------------------+--------------------+
//! | CHART: brier per tick                    |
//! +------------------------------------------+
//! | FOOTER: q quit · every 2.0s · 3 ok       |
//! +------------------------------------------+
//! ```

pub mod chart;
pub mod footer;
pub mod header;
pub mod panels;
pub mod tick_list;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

pub const BORDER_COLOR: Color = Color::DarkGray;
pub const TITLE_COLOR: Color = Color::Cyan;

/// Render the whole dashboard into the frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area);
        return;
    }

    // Body keeps at least 5 rows; MIN_HEIGHT guarantees the bounds are ordered
    let chart_height = (area.height * 2 / 5).clamp(5, area.height - 7);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Header
            Constraint::Min(4),               // Ticks + workspace
            Constraint::Length(chart_height), // Chart
            Constraint::Length(1),            // Footer
        ])
        .split(area);

    header::render(frame, rows[0], app);
    render_body(frame, rows[1], app);
    chart::render(frame, rows[2], app);
    footer::render(frame, rows[3], app);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    tick_list::render(frame, columns[0], app);

    // Narrative takes what it needs up to 8 rows, the workspace the rest
    let narrative_height = (app.narrative.len() as u16 + 2).clamp(3, 8);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(narrative_height)])
        .split(columns[1]);

    panels::render_workspace(frame, right[0], app);
    panels::render_narrative(frame, right[1], app);
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::styled(
            "terminal too small",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!("need at least {}x{}", MIN_WIDTH, MIN_HEIGHT)),
    ]);

    let y_offset = area.height.saturating_sub(2) / 2;
    let centered = Rect::new(area.x, area.y + y_offset, area.width, area.height.min(2));
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), centered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_too_small_message() {
        let app = App::new(&DashConfig::default());
        let screen = draw(&app, 30, 8);
        assert!(screen.contains("terminal too small"));
    }

    #[test]
    fn test_minimum_size_renders_panels() {
        let app = App::new(&DashConfig::default());
        let screen = draw(&app, MIN_WIDTH, MIN_HEIGHT);
        assert!(!screen.contains("terminal too small"));
        assert!(screen.contains("Ticks"));
    }
}
