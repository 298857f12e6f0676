use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset. Anomalies are reported on stdout, so
/// diagnostics stay quiet unless asked for.
const DEFAULT_FILTER: &str = "warn";

/// Initialize the logging system with environment-based filtering.
///
/// Diagnostics go to stderr, stdout carries the report:
/// - compact human-readable lines when stderr is a terminal
/// - flattened JSON events otherwise, for CI log collectors
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);

    if io::stderr().is_terminal() {
        builder.compact().init();
    } else {
        builder.json().flatten_event(true).init();
    }
}
