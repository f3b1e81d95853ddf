//! Metric chart: one green line over all ticks.
//!
//! Both axes are fixed to `[0, 1]`. Point `i` of `n` sits at
//! `x = i / max(1, n - 1)`, so the series always spans the full width;
//! values outside `[0, 1]` are clipped by the bounds.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;

pub const LINE_COLOR: Color = Color::Rgb(0x2b, 0x8a, 0x3e);

/// Map a series to chart coordinates.
pub fn chart_points(values: &[f64]) -> Vec<(f64, f64)> {
    let span = values.len().saturating_sub(1).max(1) as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64 / span, *value))
        .collect()
}

/// X-axis labels: the first and last tick numbers on screen.
fn x_labels(app: &App) -> Vec<Span<'static>> {
    match (app.traces.first(), app.traces.last()) {
        (Some(first), Some(last)) => vec![
            Span::raw(format!("tick {}", first.tick)),
            Span::raw(format!("tick {}", last.tick)),
        ],
        _ => vec![Span::raw(""), Span::raw("")],
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let points = chart_points(&app.chart_values);
    let axis_style = Style::default().fg(Color::Gray);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(LINE_COLOR))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(super::BORDER_COLOR))
                .title(Span::styled(
                    format!(" {} per tick ", app.metric_name),
                    Style::default().fg(super::TITLE_COLOR),
                )),
        )
        .x_axis(Axis::default().style(axis_style).bounds([0.0, 1.0]).labels(x_labels(app)))
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 1.0])
                .labels(vec![Span::raw("0.0"), Span::raw("0.5"), Span::raw("1.0")]),
        );

    frame.render_widget(chart, area);
}
