//! Diagnostic logging to stderr.
//!
//! Library crates log through the `log` facade; the subscriber installed here
//! bridges those records so they share one formatter.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable overriding the log filter.
pub(crate) const LOG_VAR: &str = "SUITEGEN_LOG";

fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)))
}

/// Install the subscriber. `SUITEGEN_LOG` wins over `--verbose`.
///
/// A subscriber installed earlier stays in place.
pub(crate) fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    if subscriber.try_init().is_err() {
        tracing::debug!("logging already initialised");
    }
}
