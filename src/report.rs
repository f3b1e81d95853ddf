//! Static HTML report of a run snapshot.
//!
//! A self-contained page with the run's metrics table and the broadcast
//! timeline, for sharing a run without the dashboard.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::RunSnapshot;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Escape text for use in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the report page.
pub fn render_report(snapshot: &RunSnapshot) -> String {
    let mut metric_rows = String::new();
    for (name, value) in &snapshot.state.metrics {
        let _ = write!(
            metric_rows,
            "<tr><td>{}</td><td>{:.3}</td></tr>",
            escape_html(name),
            value
        );
    }

    let mut timeline = String::new();
    for label in snapshot.tick_labels() {
        let _ = write!(timeline, "<li>{}</li>", escape_html(&label));
    }

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset='utf-8' />
<title>Noema Report</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
section {{ margin-bottom: 2rem; }}
table {{ border-collapse: collapse; }}
th, td {{ border: 1px solid #ccc; padding: 0.5rem; }}
</style>
</head>
<body>
<h1>Noema Run Report</h1>
<p>Tick {tick}, captured {captured}</p>
<section>
<h2>Metrics</h2>
<table><tr><th>Metric</th><th>Value</th></tr>{metric_rows}</table>
</section>
<section>
<h2>Broadcast Timeline</h2>
<ul>{timeline}</ul>
</section>
</body>
</html>
"#,
        tick = snapshot.state.tick,
        captured = snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
        metric_rows = metric_rows,
        timeline = timeline,
    )
}

/// Render the report and write it to `path`, replacing any existing file.
pub fn save_report(snapshot: &RunSnapshot, path: &Path) -> Result<PathBuf, ReportError> {
    std::fs::write(path, render_report(snapshot)).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coalition, RunState, TickTrace};
    use std::collections::BTreeMap;

    fn snapshot() -> RunSnapshot {
        RunSnapshot::new(
            RunState {
                tick: 2,
                workspace: Vec::new(),
                metrics: BTreeMap::from([
                    ("ece".to_string(), 0.12345),
                    ("brier".to_string(), 0.25),
                ]),
            },
            vec![
                TickTrace {
                    tick: 1,
                    broadcast: Some(Coalition {
                        summary: "<look> & see".to_string(),
                        full_text: String::new(),
                        salience: 1.0,
                        source: "perception".to_string(),
                        confidence: 0.5,
                    }),
                    metrics: BTreeMap::new(),
                },
                TickTrace {
                    tick: 2,
                    broadcast: None,
                    metrics: BTreeMap::new(),
                },
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_metrics_sorted_with_three_decimals() {
        let html = render_report(&snapshot());
        let brier = html.find("<td>brier</td><td>0.250</td>").unwrap();
        let ece = html.find("<td>ece</td><td>0.123</td>").unwrap();
        assert!(brier < ece);
    }

    #[test]
    fn test_timeline_escaped() {
        let html = render_report(&snapshot());
        assert!(html.contains("<li>Tick 1: &lt;look&gt; &amp; see</li>"));
        assert!(html.contains("<li>Tick 2: None</li>"));
    }
}
