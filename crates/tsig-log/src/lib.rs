//! Console logging for the tile generator.
//!
//! Installs a `tracing` subscriber that writes to stderr, leaving stdout for
//! command output such as the shape list. Records emitted through the `log`
//! facade are forwarded as well.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor a level is given.
pub const DEFAULT_FILTER: &str = "info";

/// Resolve the filter string: explicit level if non-empty, else the default.
pub fn filter_directive(level: Option<&str>) -> &str {
    match level.map(str::trim) {
        Some(level) if !level.is_empty() => level,
        _ => DEFAULT_FILTER,
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`.
///
/// ```no_run
/// tsig_log::init_logging(Some("debug"));
/// ```
pub fn init_logging(level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
