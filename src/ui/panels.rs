//! Workspace and narrative panels.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, PollStatus};
use crate::models::single_line;

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(super::BORDER_COLOR))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(super::TITLE_COLOR),
        ))
}

/// Pretty-printed workspace JSON, clipped to the panel.
pub fn render_workspace(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block("Workspace");

    if app.status() == PollStatus::Waiting {
        let hint = Paragraph::new("waiting for first poll…")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let paragraph = Paragraph::new(app.workspace_text.as_str()).block(block);
    frame.render_widget(paragraph, area);
}

/// Most recent narrative lines; older lines drop off the top.
pub fn render_narrative(frame: &mut Frame, area: Rect, app: &App) {
    let rows = area.height.saturating_sub(2) as usize;
    let skip = app.narrative.len().saturating_sub(rows);

    let items: Vec<ListItem> = app.narrative[skip..]
        .iter()
        .map(|line| ListItem::new(single_line(line)))
        .collect();

    frame.render_widget(List::new(items).block(panel_block("Narrative")), area);
}
