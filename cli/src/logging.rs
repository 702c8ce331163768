//! Logging initialization: logs go to stderr (or a file), never to stdout.
//!
//! Stdout carries only command output (replies, NDJSON events, tool results) so it can be piped.
//! Reads `RUST_LOG` (filter) and `LOG_FILE` (path) from the environment, e.g. via `.env`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::log_format::SpanPathFormat;

/// Installs the global subscriber.
///
/// - **RUST_LOG**: filter, e.g. `relay=debug`. Default `warn`, or `relay=debug,cli=debug,warn`
///   with `verbose`.
/// - **LOG_FILE**: when set, logs are appended to that file instead of stderr.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default = if verbose {
        "relay=debug,cli=debug,warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let layer = tracing_subscriber::fmt::layer()
            .event_format(SpanPathFormat::new())
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).try_init()?;
        tracing::info!(path = %path, "relay logging to file");
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .event_format(SpanPathFormat::new())
            .with_writer(std::io::stderr)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).try_init()?;
    }
    Ok(())
}
