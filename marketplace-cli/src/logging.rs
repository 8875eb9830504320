//! Tracing subscriber setup.

use clap::ValueEnum;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable, multi-line
    Pretty,
    /// Single line per event
    Compact,
    /// JSON for log shippers
    Json,
}

/// Level used when `RUST_LOG` is unset
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// command output.
pub fn init(format: LogFormat, verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(verbose);

    // try_init: a second call (e.g. from tests) keeps the first subscriber
    let _ = match format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry.with(layer.json().flatten_event(true)).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false, false), "info");
        assert_eq!(default_level(true, false), "debug");
        assert_eq!(default_level(false, true), "error");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(LogFormat::Compact, false, true);
        init(LogFormat::Json, false, true);
    }
}
