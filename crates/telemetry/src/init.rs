// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "NODESTAT_LOG";

/// Initializes the global `tracing` subscriber for structured JSON logging.
///
/// Logs go to stderr so that snapshot output on stdout stays machine-readable.
/// Event fields such as `event = "lag_class_changed"` are flattened into the
/// top-level JSON object. The filter is read from `NODESTAT_LOG`, then
/// `RUST_LOG`, falling back to `default_directive`.
pub fn init_tracing(default_directive: &str) -> Result<(), anyhow::Error> {
    let fmt_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());
    let subscriber = Registry::default()
        .with(env_filter(default_directive))
        .with(fmt_layer);
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive))
}
