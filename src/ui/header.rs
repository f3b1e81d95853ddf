//! Header row: poll status, run tick, current metric value, backend URL.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use chrono::{DateTime, Local, Utc};

use crate::app::{App, PollStatus};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render ticks advance every 100ms; the spinner steps every other tick.
fn spinner_frame(tick_count: u64) -> &'static str {
    SPINNER_FRAMES[((tick_count / 2) % SPINNER_FRAMES.len() as u64) as usize]
}

/// Time of the last successful poll on the local clock.
pub fn format_updated(updated: DateTime<Utc>) -> String {
    updated.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Status indicator text and color.
pub fn status_indicator(app: &App) -> (String, Color) {
    match app.status() {
        PollStatus::Waiting => (format!("{} waiting", spinner_frame(app.tick_count)), Color::Yellow),
        PollStatus::Live => ("● live".to_string(), Color::Green),
        PollStatus::Stale => ("○ stale".to_string(), Color::Red),
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (status, status_color) = status_indicator(app);
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled(
            "noema",
            Style::default().fg(super::TITLE_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(status, Style::default().fg(status_color)),
    ];

    if let Some(tick) = app.run_tick {
        spans.push(Span::styled("  tick ", dim));
        spans.push(Span::raw(tick.to_string()));
    }

    if let Some(value) = app.current_metric() {
        spans.push(Span::styled(format!("  {} ", app.metric_name), dim));
        spans.push(Span::raw(format!("{:.3}", value)));
    }

    if let Some(updated) = app.last_updated {
        spans.push(Span::styled("  updated ", dim));
        spans.push(Span::raw(format_updated(updated)));
    }

    spans.push(Span::styled(format!("  {}", app.base_url), dim));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
