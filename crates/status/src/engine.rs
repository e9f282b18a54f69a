// Path: crates/status/src/engine.rs

use crate::clock::{Clock, SystemClock};
use crate::samplers::SamplerRegistry;
use crate::session::SessionReducer;
use crate::status::StatusReducer;
use nodestat_telemetry::sinks::StatusMetricsSink;
use nodestat_telemetry::time::Timer;
use nodestat_types::app::{CoreEvent, SessionState, StatusRecord};
use nodestat_types::config::StatusConfig;
use nodestat_types::error::ConfigError;
use serde::Serialize;
use std::sync::Arc;

/// The immutable state exposed after each event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub status: Arc<StatusRecord>,
    pub session: Arc<SessionState>,
}

/// Applies events one at a time to the status and session slices.
///
/// The engine owns every piece of mutable state, including the sync
/// samplers. `apply` never blocks and never fails.
#[derive(Debug)]
pub struct StatusEngine {
    status_reducer: StatusReducer,
    session_reducer: SessionReducer,
    status: Arc<StatusRecord>,
    session: Arc<SessionState>,
    sink: &'static dyn StatusMetricsSink,
    events_applied: u64,
}

impl StatusEngine {
    /// Builds an engine on the monotonic system clock.
    pub fn new(config: &StatusConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(config: &StatusConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        Ok(Self {
            status_reducer: StatusReducer::new(config, clock)?,
            session_reducer: SessionReducer,
            status: Arc::new(StatusRecord::default()),
            session: Arc::new(SessionState::default()),
            sink: nodestat_telemetry::status_metrics(),
            events_applied: 0,
        })
    }

    /// Overrides the metrics sink picked up at construction.
    pub fn with_sink(mut self, sink: &'static dyn StatusMetricsSink) -> Self {
        self.sink = sink;
        self
    }

    /// Folds one event and returns the resulting snapshot. Slices the event
    /// does not change keep their previous allocation.
    pub fn apply(&mut self, event: &CoreEvent) -> EngineSnapshot {
        let _timer = Timer::new(self.sink);
        let had_samplers = self.samplers().is_initialized();

        let status = self.status_reducer.reduce(&self.status, event);
        if status != *self.status {
            self.status = Arc::new(status);
        }
        let session = self.session_reducer.reduce(&self.session, event);
        if session != *self.session {
            self.session = Arc::new(session);
        }

        self.events_applied += 1;
        let samplers_discarded = had_samplers && !self.samplers().is_initialized();
        self.record_metrics(event, samplers_discarded);
        tracing::trace!(
            target: "engine",
            event = event.kind(),
            seq = self.events_applied,
            "Applied event"
        );

        self.snapshot()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            status: self.status.clone(),
            session: self.session.clone(),
        }
    }

    pub fn status(&self) -> &StatusRecord {
        &self.status
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn samplers(&self) -> &SamplerRegistry {
        self.status_reducer.samplers()
    }

    /// Number of events applied since construction.
    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    fn record_metrics(&self, event: &CoreEvent, samplers_discarded: bool) {
        self.sink.inc_events_applied(event.kind());
        match event {
            CoreEvent::StatusUpdate { .. } => {
                let status = &self.status;
                self.sink.set_connected(status.connected);
                self.sink.set_block_height(status.block_height);
                self.sink
                    .set_replication_lag(status.replication_lag.and_then(|l| l.known()));
                if let Some(class) = status.replication_lag_class {
                    self.sink.set_lag_class(class.as_str());
                }
                let estimates = &status.sync_estimates;
                self.sink
                    .set_sync_estimate("snapshot", estimates.snapshot_seconds);
                self.sink
                    .set_sync_estimate("replica_lag", estimates.replica_lag_seconds);
            }
            e if e.ends_sampling() => {
                self.sink.set_connected(self.status.connected);
                if samplers_discarded {
                    self.sink.inc_sampler_resets();
                }
                self.sink.set_sync_estimate("snapshot", None);
                self.sink.set_sync_estimate("replica_lag", None);
            }
            e if e.is_unauthorized() => self.sink.inc_auth_failures(),
            _ => {}
        }
    }
}
