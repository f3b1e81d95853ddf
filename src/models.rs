//! Wire records served by the run API.
//!
//! These mirror the JSON bodies of `/api/run/state` and `/api/run/traces`.
//! Everything is read-only: the dashboard never sends these back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric name plotted when none is configured.
pub const DEFAULT_METRIC: &str = "brier";

/// Collapse line breaks into single spaces so text fits one list row.
pub fn single_line(text: &str) -> String {
    text.split(|c: char| c == '\r' || c == '\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A piece of information that competed for (and won) the workspace broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coalition {
    /// One-line summary shown in the tick list
    pub summary: String,
    #[serde(default)]
    pub full_text: String,
    #[serde(default)]
    pub salience: f64,
    /// Process that produced the coalition (perception, planner, ...)
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub confidence: f64,
}

/// Summary of one iteration of the run's control loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickTrace {
    pub tick: u64,
    /// Winning coalition, or `None` when nothing was broadcast this tick
    #[serde(default)]
    pub broadcast: Option<Coalition>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

impl TickTrace {
    /// Label used in the tick list: `Tick 3: <summary>` or `Tick 3: None`.
    ///
    /// Always a single line, whatever the summary contains.
    pub fn label(&self) -> String {
        match &self.broadcast {
            Some(b) => format!("Tick {}: {}", self.tick, single_line(&b.summary)),
            None => format!("Tick {}: None", self.tick),
        }
    }

    /// Value of a metric on this tick, `0.0` when the tick did not report it.
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).copied().unwrap_or(0.0)
    }
}

/// Current state of the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    #[serde(default)]
    pub tick: u64,
    /// Coalitions currently held in the workspace. Kept as raw JSON since the
    /// dashboard only pretty-prints it.
    #[serde(default)]
    pub workspace: Vec<serde_json::Value>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

impl RunState {
    /// Workspace as JSON indented by two spaces.
    pub fn workspace_pretty(&self) -> String {
        // Serializing a Vec<Value> cannot fail
        serde_json::to_string_pretty(&self.workspace).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Everything fetched by one poll of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSnapshot {
    pub state: RunState,
    pub traces: Vec<TickTrace>,
    /// Most recent narrative lines, oldest first
    pub narrative: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

impl RunSnapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(state: RunState, traces: Vec<TickTrace>, narrative: Vec<String>) -> Self {
        Self {
            state,
            traces,
            narrative,
            fetched_at: Utc::now(),
        }
    }

    /// Tick list labels in trace order.
    pub fn tick_labels(&self) -> Vec<String> {
        self.traces.iter().map(TickTrace::label).collect()
    }

    /// Series of one metric across all traces, missing values as `0.0`.
    pub fn metric_series(&self, name: &str) -> Vec<f64> {
        self.traces.iter().map(|t| t.metric(name)).collect()
    }
}
