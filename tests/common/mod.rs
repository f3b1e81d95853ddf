//! Common test utilities for integration tests.
//!
//! Fixtures for run payloads plus helpers that mount them on a wiremock
//! server the way the run server would serve them.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! mount_run(&server, state_json(3), traces_json(3)).await;
//! ```

#![allow(dead_code)]

use noema_dash::app::App;
use noema_dash::config::DashConfig;
use noema_dash::models::{Coalition, RunSnapshot, RunState, TickTrace};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run state JSON at `tick` with a single workspace coalition.
pub fn state_json(tick: u64) -> Value {
    json!({
        "tick": tick,
        "workspace": [
            {"summary": "red ball ahead", "salience": 0.8, "source": "perception"}
        ],
        "metrics": {"brier": 0.2, "ece": 0.1, "wrong_high_conf": 0.0}
    })
}

/// `count` traces. Every third tick has no broadcast; brier rises 0.1 per tick.
pub fn traces_json(count: u64) -> Value {
    let traces: Vec<Value> = (1..=count)
        .map(|tick| {
            let broadcast = if tick % 3 == 0 {
                Value::Null
            } else {
                json!({"summary": format!("thought {}", tick), "salience": 0.5})
            };
            json!({
                "tick": tick,
                "broadcast": broadcast,
                "metrics": {"brier": (tick as f64) / 10.0}
            })
        })
        .collect();
    Value::Array(traces)
}

/// Mount state and traces endpoints; the narrative endpoint is left unmounted.
pub async fn mount_run(server: &MockServer, state: Value, traces: Value) {
    Mock::given(method("GET"))
        .and(path("/api/run/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(state))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/run/traces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(traces))
        .mount(server)
        .await;
}

pub async fn mount_narrative(server: &MockServer, lines: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/api/run/narrative"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(lines)))
        .mount(server)
        .await;
}

pub fn coalition(summary: &str) -> Coalition {
    Coalition {
        summary: summary.to_string(),
        full_text: String::new(),
        salience: 0.5,
        source: "test".to_string(),
        confidence: 0.5,
    }
}

pub fn trace(tick: u64, summary: Option<&str>, brier: f64) -> TickTrace {
    TickTrace {
        tick,
        broadcast: summary.map(coalition),
        metrics: BTreeMap::from([("brier".to_string(), brier)]),
    }
}

/// Builder for snapshots used by render and report tests.
#[derive(Default)]
pub struct SnapshotBuilder {
    tick: u64,
    workspace: Vec<Value>,
    metrics: BTreeMap<String, f64>,
    traces: Vec<TickTrace>,
    narrative: Vec<String>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    pub fn workspace(mut self, item: Value) -> Self {
        self.workspace.push(item);
        self
    }

    pub fn metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn trace(mut self, tick: u64, summary: Option<&str>, brier: f64) -> Self {
        self.traces.push(trace(tick, summary, brier));
        self
    }

    pub fn narrative(mut self, line: &str) -> Self {
        self.narrative.push(line.to_string());
        self
    }

    pub fn build(self) -> RunSnapshot {
        RunSnapshot::new(
            RunState {
                tick: self.tick,
                workspace: self.workspace,
                metrics: self.metrics,
            },
            self.traces,
            self.narrative,
        )
    }
}

/// An app with no log file and the default settings.
pub fn test_app() -> App {
    App::new(&DashConfig::default().with_log_file(None))
}
