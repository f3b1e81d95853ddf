//! Render tests against ratatui's TestBackend.
//!
//! Each test draws the full dashboard and inspects the buffer row by row.

mod common;

use common::{test_app, SnapshotBuilder};
use noema_dash::app::AppMessage;
use noema_dash::ui::{self, chart::LINE_COLOR};
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
use serde_json::json;

fn draw(app: &noema_dash::app::App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal.draw(|f| ui::render(f, app)).expect("draw");
    terminal.backend().buffer().clone()
}

fn rows(buffer: &Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn screen_contains(buffer: &Buffer, needle: &str) -> bool {
    rows(buffer).iter().any(|row| row.contains(needle))
}

/// Foreground color of the first cell where `needle` starts on screen.
fn fg_at(buffer: &Buffer, needle: &str) -> Option<Color> {
    let width = buffer.area.width as usize;
    let wanted: Vec<String> = needle.chars().map(|c| c.to_string()).collect();

    buffer.content().chunks(width).find_map(|row| {
        row.windows(wanted.len())
            .find(|cells| cells.iter().zip(&wanted).all(|(cell, c)| cell.symbol() == c.as_str()))
            .map(|cells| cells[0].fg)
    })
}

#[test]
fn test_waiting_before_first_poll() {
    let app = test_app();
    let buffer = draw(&app, 100, 30);

    assert!(screen_contains(&buffer, "waiting"));
    assert!(screen_contains(&buffer, "waiting for first poll"));
    assert!(screen_contains(&buffer, "Ticks (0)"));
}

#[test]
fn test_tick_list_shows_labels_in_order() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(3)
            .trace(1, Some("saw red ball"), 0.3)
            .trace(2, None, 0.2)
            .trace(3, Some("reached for ball"), 0.1)
            .build(),
    );

    let buffer = draw(&app, 100, 30);
    let rows = rows(&buffer);

    let find = |needle: &str| rows.iter().position(|r| r.contains(needle));
    let first = find("Tick 1: saw red ball").expect("tick 1 rendered");
    let second = find("Tick 2: None").expect("tick 2 rendered");
    let third = find("Tick 3: reached for ball").expect("tick 3 rendered");

    assert!(first < second && second < third);
    assert!(screen_contains(&buffer, "Ticks (3)"));
}

#[test]
fn test_workspace_pretty_printed() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(1)
            .workspace(json!({"summary": "red ball"}))
            .build(),
    );

    let buffer = draw(&app, 100, 30);

    assert!(screen_contains(&buffer, "Workspace"));
    assert!(screen_contains(&buffer, "\"summary\": \"red ball\""));
    assert!(!screen_contains(&buffer, "waiting for first poll"));
}

#[test]
fn test_header_shows_live_tick_and_metric() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(42)
            .metric("brier", 0.2134)
            .trace(42, Some("x"), 0.2)
            .build(),
    );

    let buffer = draw(&app, 120, 30);
    let header = &rows(&buffer)[0];

    assert!(header.contains("live"), "header was {:?}", header);
    assert!(header.contains("tick 42"));
    assert!(header.contains("brier 0.213"));
}

#[test]
fn test_failure_after_success_keeps_data_and_goes_stale() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(1)
            .trace(1, Some("still here"), 0.5)
            .build(),
    );
    app.handle_message(AppMessage::RefreshFailed {
        error: "Backend timed out".to_string(),
        retryable: true,
    });

    let buffer = draw(&app, 120, 30);

    assert!(screen_contains(&buffer, "stale"));
    assert!(screen_contains(&buffer, "Tick 1: still here"));
    assert!(screen_contains(&buffer, "Backend timed out"));
    assert!(screen_contains(&buffer, "1 ok / 1 failed"));
}

#[test]
fn test_narrative_panel() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(2)
            .narrative("I noticed a ball")
            .narrative("I chose to wait")
            .build(),
    );

    let buffer = draw(&app, 100, 30);

    assert!(screen_contains(&buffer, "Narrative"));
    assert!(screen_contains(&buffer, "I noticed a ball"));
    assert!(screen_contains(&buffer, "I chose to wait"));
}

#[test]
fn test_chart_draws_green_line() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(4)
            .trace(1, None, 0.9)
            .trace(2, None, 0.6)
            .trace(3, None, 0.3)
            .trace(4, None, 0.1)
            .build(),
    );

    let buffer = draw(&app, 100, 30);

    assert!(screen_contains(&buffer, "brier per tick"));
    assert!(screen_contains(&buffer, "tick 1"));
    assert!(buffer.content().iter().any(|cell| cell.fg == LINE_COLOR));
}

#[test]
fn test_empty_chart_has_no_line() {
    let app = test_app();
    let buffer = draw(&app, 100, 30);

    assert!(screen_contains(&buffer, "brier per tick"));
    assert!(!buffer.content().iter().any(|cell| cell.fg == LINE_COLOR));
}

#[test]
fn test_too_small_terminal() {
    let app = test_app();
    let buffer = draw(&app, 39, 20);

    assert!(screen_contains(&buffer, "terminal too small"));
    assert!(!screen_contains(&buffer, "Ticks"));
}

#[test]
fn test_renders_across_sizes() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(50)
            .trace(1, Some("a"), 0.5)
            .trace(2, Some("b"), 0.4)
            .build(),
    );

    for (width, height) in [(40, 12), (80, 24), (200, 60)] {
        let buffer = draw(&app, width, height);
        assert!(screen_contains(&buffer, "Ticks"), "no tick list at {}x{}", width, height);
    }
}

#[test]
fn test_newest_tick_visible_with_long_history() {
    let mut builder = SnapshotBuilder::new().tick(50);
    for tick in 1..=50 {
        builder = builder.trace(tick, Some("step"), 0.5);
    }
    let mut app = test_app();
    app.apply_snapshot(builder.build());

    let buffer = draw(&app, 80, 24);

    assert!(screen_contains(&buffer, "Tick 50: step"), "newest tick scrolled out");
    assert!(!screen_contains(&buffer, "Tick 1: step"));
    assert!(screen_contains(&buffer, "Ticks (50)"));
}

#[test]
fn test_multiline_summaries_keep_one_row_per_tick() {
    let mut builder = SnapshotBuilder::new().tick(40);
    for tick in 1..=40 {
        builder = builder.trace(tick, Some("line one\nline two"), 0.5);
    }
    let mut app = test_app();
    app.apply_snapshot(builder.build());

    let buffer = draw(&app, 100, 30);

    assert!(screen_contains(&buffer, "Tick 40: line one line two"));
    assert!(!rows(&buffer).iter().any(|row| row.contains("│line two")));
}

#[test]
fn test_multiline_narrative_keeps_newest_line() {
    let mut builder = SnapshotBuilder::new().tick(1);
    for i in 1..=10 {
        builder = builder.narrative(&format!("note {}\nmore", i));
    }
    let mut app = test_app();
    app.apply_snapshot(builder.build());

    let buffer = draw(&app, 100, 30);

    assert!(screen_contains(&buffer, "note 10 more"));
}

#[test]
fn test_out_of_range_values_still_draw() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(2)
            .trace(1, None, 0.2)
            .trace(2, None, 1.5)
            .build(),
    );

    let buffer = draw(&app, 100, 30);

    assert!(buffer.content().iter().any(|cell| cell.fg == LINE_COLOR));
    assert!(screen_contains(&buffer, "brier per tick"));
}

#[test]
fn test_only_empty_broadcasts_are_dimmed() {
    let mut app = test_app();
    app.apply_snapshot(
        SnapshotBuilder::new()
            .tick(2)
            .trace(1, Some("None"), 0.1)
            .trace(2, None, 0.2)
            .build(),
    );

    let buffer = draw(&app, 100, 30);

    assert_eq!(fg_at(&buffer, "Tick 2: None"), Some(Color::DarkGray));
    assert_ne!(fg_at(&buffer, "Tick 1: None"), Some(Color::DarkGray));
    assert!(fg_at(&buffer, "Tick 1: None").is_some());
}
