//! Dashboard application state.
//!
//! `App` owns what is on screen. The poller feeds it [`AppMessage`]s and the
//! render loop draws it; nothing else mutates it.

mod messages;

pub use messages::AppMessage;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::DashConfig;
use crate::models::{RunSnapshot, TickTrace};

/// Health of the poll loop as shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// No poll has finished yet
    Waiting,
    /// The last poll succeeded
    Live,
    /// The last poll failed; data on screen (if any) is from an earlier poll
    Stale,
}

pub struct App {
    pub base_url: String,
    /// Metric plotted in the chart
    pub metric_name: String,
    pub poll_interval: Duration,
    /// Tick the run reported in its state, `None` before the first poll
    pub run_tick: Option<u64>,
    pub run_metrics: BTreeMap<String, f64>,
    pub traces: Vec<TickTrace>,
    /// One label per trace, rebuilt on every snapshot
    pub tick_labels: Vec<String>,
    pub workspace_text: String,
    pub narrative: Vec<String>,
    pub chart_values: Vec<f64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub successful_polls: u64,
    pub failed_polls: u64,
    /// Consecutive failures since the last success
    pub failure_streak: u32,
    /// Render-loop tick counter for the spinner
    pub tick_count: u64,
    pub needs_redraw: bool,
    pub should_quit: bool,
    terminal_width: u16,
    terminal_height: u16,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    pub fn new(config: &DashConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            base_url: config.base_url.clone(),
            metric_name: config.metric.clone(),
            poll_interval: config.poll_interval,
            run_tick: None,
            run_metrics: BTreeMap::new(),
            traces: Vec::new(),
            tick_labels: Vec::new(),
            workspace_text: String::new(),
            narrative: Vec::new(),
            chart_values: Vec::new(),
            last_updated: None,
            last_error: None,
            successful_polls: 0,
            failed_polls: 0,
            failure_streak: 0,
            tick_count: 0,
            needs_redraw: true,
            should_quit: false,
            terminal_width: 80,
            terminal_height: 24,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance the render-loop counter. Only the waiting spinner animates.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.status() == PollStatus::Waiting {
            self.mark_dirty();
        }
    }

    pub fn status(&self) -> PollStatus {
        if self.last_error.is_some() {
            PollStatus::Stale
        } else if self.last_updated.is_some() {
            PollStatus::Live
        } else {
            PollStatus::Waiting
        }
    }

    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::SnapshotLoaded(snapshot) => self.apply_snapshot(*snapshot),
            AppMessage::RefreshFailed { error, retryable } => {
                self.failed_polls += 1;
                self.failure_streak = self.failure_streak.saturating_add(1);
                if self.failure_streak == 1 {
                    info!("Backend poll failing: {} (retryable: {})", error, retryable);
                }
                self.last_error = Some(error);
            }
            AppMessage::Quit => self.quit(),
        }
        self.mark_dirty();
    }

    /// Replace the displayed data with `snapshot`.
    ///
    /// The tick list is rebuilt from scratch, never appended to.
    pub fn apply_snapshot(&mut self, snapshot: RunSnapshot) {
        if self.failure_streak > 0 {
            info!("Backend poll recovered after {} failures", self.failure_streak);
        }
        debug!(tick = snapshot.state.tick, traces = snapshot.traces.len(), "Applying snapshot");

        self.tick_labels = snapshot.tick_labels();
        self.chart_values = snapshot.metric_series(&self.metric_name);
        self.workspace_text = snapshot.state.workspace_pretty();
        self.run_tick = Some(snapshot.state.tick);
        self.run_metrics = snapshot.state.metrics;
        self.traces = snapshot.traces;
        self.narrative = snapshot.narrative;
        self.last_updated = Some(snapshot.fetched_at);
        self.last_error = None;
        self.failure_streak = 0;
        self.successful_polls += 1;
    }

    /// Latest value of the plotted metric as reported by the run state.
    pub fn current_metric(&self) -> Option<f64> {
        self.run_metrics.get(&self.metric_name).copied()
    }

    pub fn update_terminal_dimensions(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.mark_dirty();
    }

    pub fn terminal_width(&self) -> u16 {
        self.terminal_width
    }

    pub fn terminal_height(&self) -> u16 {
        self.terminal_height
    }
}
