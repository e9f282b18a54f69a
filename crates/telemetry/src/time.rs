// Path: crates/telemetry/src/time.rs
use crate::sinks::StatusMetricsSink;
use std::time::Instant;

/// Records the time between its creation and drop as a fold duration.
pub struct Timer<'a> {
    sink: &'a dyn StatusMetricsSink,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn StatusMetricsSink) -> Self {
        Self {
            sink,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_fold_duration(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingSink {
        durations: Mutex<Vec<f64>>,
    }

    impl StatusMetricsSink for RecordingSink {
        fn inc_events_applied(&self, _kind: &'static str) {}
        fn set_connected(&self, _connected: bool) {}
        fn set_block_height(&self, _height: u64) {}
        fn set_replication_lag(&self, _lag: Option<i64>) {}
        fn set_lag_class(&self, _class: &str) {}
        fn set_sync_estimate(&self, _estimator: &'static str, _seconds: Option<f64>) {}
        fn inc_auth_failures(&self) {}
        fn inc_sampler_resets(&self) {}
        fn observe_fold_duration(&self, duration_secs: f64) {
            self.durations.lock().unwrap().push(duration_secs);
        }
    }

    #[test]
    fn test_timer_observes_on_drop() {
        let sink = RecordingSink::default();
        {
            let _timer = Timer::new(&sink);
            assert!(sink.durations.lock().unwrap().is_empty());
        }
        let durations = sink.durations.lock().unwrap();
        assert_eq!(durations.len(), 1);
        assert!(durations[0] >= 0.0);
    }
}
