//! Tick list panel: one line per trace, newest at the bottom.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::App;

/// The last `rows` items, so the newest tick stays visible.
pub fn visible_window<T>(items: &[T], rows: usize) -> &[T] {
    &items[items.len().saturating_sub(rows)..]
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(super::BORDER_COLOR))
        .title(Span::styled(
            format!(" Ticks ({}) ", app.tick_labels.len()),
            Style::default().fg(super::TITLE_COLOR),
        ));

    let rows = area.height.saturating_sub(2) as usize;
    // Labels are built one per trace, so both windows cover the same ticks
    let labels = visible_window(&app.tick_labels, rows);
    let traces = visible_window(&app.traces, rows);

    let items: Vec<ListItem> = labels
        .iter()
        .zip(traces)
        .map(|(label, trace)| {
            let style = if trace.broadcast.is_none() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(label.as_str()).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
