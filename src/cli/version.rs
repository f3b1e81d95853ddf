//! `--version` and `--help` output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
noema-dash - terminal dashboard for a Noema run

USAGE:
    noema-dash [OPTIONS]

OPTIONS:
    --url <URL>               Run API base URL [env: NOEMA_DASH_URL]
    --interval-ms <MS>        Poll interval in milliseconds [env: NOEMA_DASH_INTERVAL_MS]
    --metric <NAME>           Metric to chart [env: NOEMA_DASH_METRIC]
    --narrative-limit <N>     Narrative lines to fetch per poll
    --log-file <PATH>         Log destination [env: NOEMA_DASH_LOG]
    --report <PATH>           Write an HTML report of one snapshot and exit
    -V, --version             Print version
    -h, --help                Print this help
";

pub fn version_line() -> String {
    format!("noema-dash {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert!(version_line().starts_with("noema-dash "));
    }

    #[test]
    fn test_usage_lists_every_flag() {
        for flag in ["--url", "--interval-ms", "--metric", "--narrative-limit", "--log-file", "--report"] {
            assert!(USAGE.contains(flag), "usage is missing {}", flag);
        }
    }
}
