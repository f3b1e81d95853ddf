//! Command-line argument parsing.
//!
//! Flags take their value from the next argument (`--url http://...`).
//! Unknown flags are rejected rather than ignored so a typo does not
//! silently point the dashboard at the default backend.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    parse_millis, ConfigError, DashConfig, ENV_INTERVAL_MS, ENV_LOG, ENV_METRIC, ENV_URL,
};

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub interval_ms: Option<u64>,
    pub metric: Option<String>,
    pub narrative_limit: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl CliOverrides {
    /// Whether a flag was given that replaces the environment variable `var`.
    fn shadows(&self, var: &str) -> bool {
        match var {
            ENV_URL => self.url.is_some(),
            ENV_INTERVAL_MS => self.interval_ms.is_some(),
            ENV_METRIC => self.metric.is_some(),
            ENV_LOG => self.log_file.is_some(),
            _ => false,
        }
    }

    /// Final configuration: defaults, then the environment, then these flags.
    pub fn resolve(self) -> Result<DashConfig, ConfigError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Same as [`CliOverrides::resolve`] with an injectable variable source.
    ///
    /// Variables shadowed by a flag are never read, so a malformed value
    /// there cannot block a valid flag.
    pub fn resolve_with<F>(self, lookup: F) -> Result<DashConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = DashConfig::from_lookup(|name| {
            if self.shadows(name) {
                None
            } else {
                lookup(name)
            }
        })?;
        Ok(self.apply(config))
    }

    /// Layer these overrides on top of `config`.
    pub fn apply(self, mut config: DashConfig) -> DashConfig {
        if let Some(url) = self.url {
            config = config.with_base_url(url);
        }
        if let Some(ms) = self.interval_ms {
            config = config.with_poll_interval(Duration::from_millis(ms));
        }
        if let Some(metric) = self.metric {
            config = config.with_metric(metric);
        }
        if let Some(limit) = self.narrative_limit {
            config = config.with_narrative_limit(limit);
        }
        if let Some(path) = self.log_file {
            config = config.with_log_file(Some(path));
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    /// Fetch one snapshot, write an HTML report to the path, exit
    Report {
        path: PathBuf,
        overrides: CliOverrides,
    },
    /// Run the dashboard (default)
    RunTui(CliOverrides),
    /// Arguments could not be parsed; the message explains why
    Invalid(String),
}

/// Parse command-line arguments, program name first.
///
/// # Examples
///
/// ```
/// use noema_dash::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["noema-dash".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut report: Option<PathBuf> = None;
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" | "--interval-ms" | "--metric" | "--narrative-limit" | "--log-file"
            | "--report" => {
                let Some(value) = args.next() else {
                    return CliCommand::Invalid(format!("{} needs a value", arg));
                };
                if let Err(message) = apply_flag(&arg, value, &mut overrides, &mut report) {
                    return CliCommand::Invalid(message);
                }
            }
            other => return CliCommand::Invalid(format!("unknown argument '{}'", other)),
        }
    }

    match report {
        Some(path) => CliCommand::Report { path, overrides },
        None => CliCommand::RunTui(overrides),
    }
}

fn apply_flag(
    flag: &str,
    value: String,
    overrides: &mut CliOverrides,
    report: &mut Option<PathBuf>,
) -> Result<(), String> {
    match flag {
        "--url" => overrides.url = Some(value),
        "--interval-ms" => {
            let ms = parse_millis(&value)
                .ok_or_else(|| format!("--interval-ms expects a positive number, got '{}'", value))?;
            overrides.interval_ms = Some(ms);
        }
        "--metric" => overrides.metric = Some(value),
        "--narrative-limit" => {
            let limit = value
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("--narrative-limit expects a number, got '{}'", value))?;
            overrides.narrative_limit = Some(limit);
        }
        "--log-file" => overrides.log_file = Some(PathBuf::from(value)),
        "--report" => *report = Some(PathBuf::from(value)),
        _ => unreachable!("flag list in parse_args and apply_flag diverged"),
    }
    Ok(())
}
