// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured status metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn status_metrics() -> &'static dyn StatusMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics derived while folding node status events.
pub trait StatusMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for applied events, labeled by event kind.
    fn inc_events_applied(&self, kind: &'static str);
    /// Sets the gauge tracking whether the node is reachable.
    fn set_connected(&self, connected: bool);
    /// Sets the gauge for the node's local block height.
    fn set_block_height(&self, height: u64);
    /// Sets the gauge for the replication lag in blocks.
    /// `None` marks the lag as unknown.
    fn set_replication_lag(&self, lag: Option<i64>);
    /// Sets a gauge vector to indicate the current lag class.
    fn set_lag_class(&self, class: &str);
    /// Sets the gauge for a sync estimate in seconds, labeled by estimator.
    /// `None` clears the estimate.
    fn set_sync_estimate(&self, estimator: &'static str, seconds: Option<f64>);
    /// Increments the counter for requests rejected with 401.
    fn inc_auth_failures(&self);
    /// Increments the counter for sampler registry resets.
    fn inc_sampler_resets(&self);
    /// Observes the duration of a single event fold.
    fn observe_fold_duration(&self, duration_secs: f64);
}
impl StatusMetricsSink for NopSink {
    fn inc_events_applied(&self, _kind: &'static str) {}
    fn set_connected(&self, _connected: bool) {}
    fn set_block_height(&self, _height: u64) {}
    fn set_replication_lag(&self, _lag: Option<i64>) {}
    fn set_lag_class(&self, _class: &str) {}
    fn set_sync_estimate(&self, _estimator: &'static str, _seconds: Option<f64>) {}
    fn inc_auth_failures(&self) {}
    fn inc_sampler_resets(&self) {}
    fn observe_fold_duration(&self, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: StatusMetricsSink + ErrorMetricsSink {}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where T: StatusMetricsSink + ErrorMetricsSink {}
