// Path: crates/status/src/status/sync.rs

//! Time-to-catch-up estimates.
//!
//! While a snapshot downloads, the estimate is the remaining bytes divided by
//! the download speed. Otherwise it is the replica lag divided by the speed
//! at which the lag closes, shown only while the lag is shrinking. A speed
//! that is `NaN` (too few samples), infinite, or zero never yields an
//! estimate.

use crate::samplers::SamplerRegistry;
use nodestat_types::app::{CoreEvent, SnapshotProgress, SyncEstimates};

/// Folds one event into the sync estimates.
///
/// `snapshot` is the snapshot already resolved by the snapshot field reducer,
/// so a size reported only once is still usable.
pub fn sync_estimates(
    prev: &SyncEstimates,
    event: &CoreEvent,
    registry: &mut SamplerRegistry,
    snapshot: Option<&SnapshotProgress>,
) -> SyncEstimates {
    match event {
        CoreEvent::StatusUpdate { param } => {
            let samplers = registry.get_or_init();
            let mut estimates = SyncEstimates::default();

            if let Some(snapshot) = snapshot.filter(|s| s.in_progress) {
                let speed = samplers.snapshot.sample(snapshot.downloaded as f64);
                estimates.snapshot_seconds = usable(speed).and_then(|speed| {
                    let size = snapshot.size? as f64;
                    let remaining = (size - snapshot.downloaded as f64) / speed;
                    Some(remaining).filter(|s| s.is_finite() && *s >= 0.0)
                });
            } else if let Some(lag) = param.replica_lag() {
                let lag = lag as f64;
                let speed = samplers.replica_lag.sample(lag);
                estimates.replica_lag_seconds = usable(speed)
                    .map(|speed| -lag / speed)
                    .filter(|d| d.is_finite() && *d > 0.0);
            }

            estimates
        }
        e if e.ends_sampling() => {
            registry.reset();
            SyncEstimates::default()
        }
        _ => *prev,
    }
}

fn usable(speed: f64) -> Option<f64> {
    Some(speed).filter(|s| s.is_finite() && *s != 0.0)
}
