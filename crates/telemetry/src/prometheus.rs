// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_gauge, register_gauge_vec, register_histogram,
    register_int_counter, register_int_counter_vec, Encoder, Gauge, GaugeVec, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

// --- Metric Statics ---
// We use OnceCell to hold the metric collectors. They will be initialized
// exactly once by the `install` function.

static NODE_CONNECTED: OnceCell<Gauge> = OnceCell::new();
static NODE_BLOCK_HEIGHT: OnceCell<Gauge> = OnceCell::new();
static REPLICATION_LAG_BLOCKS: OnceCell<Gauge> = OnceCell::new();
static REPLICATION_LAG_CLASS: OnceCell<GaugeVec> = OnceCell::new();
static SYNC_ESTIMATE_SECONDS: OnceCell<GaugeVec> = OnceCell::new();
static EVENTS_APPLIED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static AUTH_FAILURES_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static SAMPLER_RESETS_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static FOLD_DURATION_SECONDS: OnceCell<Histogram> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Helper macro to reduce boilerplate for getting a metric from OnceCell.
/// This will panic if `install()` has not been called, which is intentional
/// as it indicates a critical application setup error.
macro_rules! get_metric {
    ($metric:ident) => {
        $metric
            .get()
            .expect("Prometheus sink not initialized. Call telemetry::prometheus::install() first.")
    };
}

#[allow(clippy::expect_used)]
impl StatusMetricsSink for PrometheusSink {
    fn inc_events_applied(&self, kind: &'static str) {
        get_metric!(EVENTS_APPLIED_TOTAL)
            .with_label_values(&[kind])
            .inc();
    }
    fn set_connected(&self, connected: bool) {
        get_metric!(NODE_CONNECTED).set(if connected { 1.0 } else { 0.0 });
    }
    fn set_block_height(&self, height: u64) {
        get_metric!(NODE_BLOCK_HEIGHT).set(height as f64);
    }
    fn set_replication_lag(&self, lag: Option<i64>) {
        get_metric!(REPLICATION_LAG_BLOCKS).set(lag.map_or(f64::NAN, |lag| lag as f64));
    }
    fn set_lag_class(&self, class: &str) {
        for candidate in &["green", "yellow", "red"] {
            get_metric!(REPLICATION_LAG_CLASS)
                .with_label_values(&[candidate])
                .set(if *candidate == class { 1.0 } else { 0.0 });
        }
    }
    fn set_sync_estimate(&self, estimator: &'static str, seconds: Option<f64>) {
        get_metric!(SYNC_ESTIMATE_SECONDS)
            .with_label_values(&[estimator])
            .set(seconds.unwrap_or(f64::NAN));
    }
    fn inc_auth_failures(&self) {
        get_metric!(AUTH_FAILURES_TOTAL).inc();
    }
    fn inc_sampler_resets(&self) {
        get_metric!(SAMPLER_RESETS_TOTAL).inc();
    }
    fn observe_fold_duration(&self, duration_secs: f64) {
        get_metric!(FOLD_DURATION_SECONDS).observe(duration_secs);
    }
}

#[allow(clippy::expect_used)]
impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        get_metric!(ERRORS_TOTAL)
            .with_label_values(&[kind, variant])
            .inc();
    }
}

/// Initializes all Prometheus metrics collectors and returns a static reference to the sink.
/// This function must be called only once at application startup.
#[allow(clippy::expect_used)]
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    NODE_CONNECTED
        .set(register_gauge!(
            "nodestat_node_connected",
            "1 while the transport reaches the node, 0 after a disconnect."
        )?)
        .expect("static already initialized");
    NODE_BLOCK_HEIGHT
        .set(register_gauge!(
            "nodestat_node_block_height",
            "Last block height reported by the node."
        )?)
        .expect("static already initialized");
    REPLICATION_LAG_BLOCKS
        .set(register_gauge!(
            "nodestat_replication_lag_blocks",
            "Blocks between the generator height and the node height."
        )?)
        .expect("static already initialized");
    REPLICATION_LAG_CLASS
        .set(register_gauge_vec!(
            "nodestat_replication_lag_class",
            "Current replication lag class (1 if active, 0 otherwise).",
            &["class"]
        )?)
        .expect("static already initialized");
    SYNC_ESTIMATE_SECONDS
        .set(register_gauge_vec!(
            "nodestat_sync_estimate_seconds",
            "Estimated seconds until the node has caught up, NaN when unavailable.",
            &["estimator"]
        )?)
        .expect("static already initialized");
    EVENTS_APPLIED_TOTAL
        .set(register_int_counter_vec!(
            "nodestat_events_applied_total",
            "Total events folded into the status record.",
            &["kind"]
        )?)
        .expect("static already initialized");
    AUTH_FAILURES_TOTAL
        .set(register_int_counter!(
            "nodestat_auth_failures_total",
            "Total requests rejected with HTTP 401."
        )?)
        .expect("static already initialized");
    SAMPLER_RESETS_TOTAL
        .set(register_int_counter!(
            "nodestat_sampler_resets_total",
            "Total discards of the sync-rate samplers."
        )?)
        .expect("static already initialized");
    FOLD_DURATION_SECONDS
        .set(register_histogram!(
            "nodestat_fold_duration_seconds",
            "Latency of folding a single event.",
            exponential_buckets(0.000_001, 2.0, 16)?
        )?)
        .expect("static already initialized");
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "nodestat_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?)
        .expect("static already initialized");

    static SINK: PrometheusSink = PrometheusSink;
    Ok(&SINK)
}

/// Encodes every registered metric family in the Prometheus text format.
pub fn gather_text() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buf = Vec::with_capacity(1 << 14);
    encoder.encode(&metric_families, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
