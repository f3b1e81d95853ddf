//! Footer row: key hints, poll cadence, and the last error if any.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

use crate::app::App;

/// `2000ms` → `2.0s`, `500ms` → `500ms`.
pub fn format_interval(interval: Duration) -> String {
    let ms = interval.as_millis();
    if ms >= 1000 {
        format!("{:.1}s", interval.as_secs_f64())
    } else {
        format!("{}ms", ms)
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("q quit", dim),
        Span::styled(format!(" · every {}", format_interval(app.poll_interval)), dim),
        Span::styled(
            format!(" · {} ok / {} failed", app.successful_polls, app.failed_polls),
            dim,
        ),
    ];

    if let Some(error) = &app.last_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
