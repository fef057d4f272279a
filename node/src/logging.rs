//! # Structured Logging
//!
//! `tracing` subscriber setup for the ledger node. Filtering follows the
//! usual `RUST_LOG` directives; the output format is picked once at boot
//! from `HAVEN_LOG_FORMAT` so a deployment can switch to JSON lines
//! without a rebuild.
//!
//! Logs go to stderr. Stdout stays reserved for command output (`status`
//! prints the queried body there).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the log output format.
const FORMAT_ENV: &str = "HAVEN_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for terminals.
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

impl LogFormat {
    /// Reads `HAVEN_LOG_FORMAT`. Anything other than `json` (including an
    /// unset variable) selects the pretty format.
    pub fn from_env() -> Self {
        match std::env::var(FORMAT_ENV) {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Installs the global subscriber. Call once, before any spans open;
/// a second call panics.
///
/// `default_directives` applies when `RUST_LOG` is unset. The node passes
/// its own crates at info, e.g. `haven_node=info,haven_ledger=info`.
pub fn init_logging(default_directives: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).compact())
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_current_span(false))
                .init();
        }
    }

    tracing::debug!(?format, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_format_variable_means_pretty() {
        // Serial-safe: only reads the variable when it is absent.
        if std::env::var(FORMAT_ENV).is_err() {
            assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
        }
    }
}
