//! Logging initialization.
//!
//! Logs go to stderr so `validate --format json` and `synth` keep stdout
//! machine-readable. `-v` flags raise the level of this tool's own targets
//! only; dependencies stay at `warn` unless `GRAFANA_WORKSPACE_LOG_LEVEL`
//! supplies a full filter.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_LEVEL_ENV: &str = "GRAFANA_WORKSPACE_LOG_LEVEL";

/// Targets whose level follows the verbosity flags.
const CRATE_TARGETS: [&str; 2] = ["grafana_workspace", "grafana_workspace_core"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON, one object per event, with the enclosing
    /// workspace span attached.
    Json,
}

/// Level applied to this tool's targets for a `-v` count.
#[must_use]
pub const fn verbosity_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directives for a `-v` count: `warn` globally, with the crate
/// targets raised to the requested level.
#[must_use]
pub fn default_directives(verbosity: u8) -> String {
    let level = verbosity_level(verbosity);
    if verbosity == 0 {
        return level.to_string();
    }
    std::iter::once("warn".to_string())
        .chain(CRATE_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .or_else(|_| EnvFilter::try_new(default_directives(verbosity)))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Resolves `--color` against the terminal and `NO_COLOR`.
const fn ansi_enabled(color: ColorChoice, stderr_is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Auto => stderr_is_terminal && !no_color,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Installs the global tracing subscriber.
///
/// Uses `try_init()`, so a second call (e.g. from tests) is a no-op.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = build_filter(verbosity);

    match format {
        LogFormat::Human => {
            let ansi = ansi_enabled(
                color,
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            );
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(ansi)
                .with_target(verbosity >= 2)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
