// Path: crates/status/src/samplers.rs

use crate::clock::Clock;
use crate::rate::DeltaSampler;
use nodestat_types::config::SamplerConfig;
use std::sync::Arc;

/// The two estimators feeding the sync-time estimates.
#[derive(Debug, Clone)]
pub struct SyncSamplers {
    /// Bytes downloaded by an in-flight snapshot transfer.
    pub snapshot: DeltaSampler,
    /// Blocks between the generator and the node.
    pub replica_lag: DeltaSampler,
}

impl SyncSamplers {
    fn new(config: &SamplerConfig, clock: &Arc<dyn Clock>) -> Self {
        Self {
            snapshot: DeltaSampler::new(config, clock.clone()),
            replica_lag: DeltaSampler::new(config, clock.clone()),
        }
    }
}

/// Owns the sync samplers and their lifecycle.
///
/// The samplers are built lazily on first use and discarded wholesale by
/// [`reset`](Self::reset), so no sample survives a disconnect or logout.
#[derive(Debug, Clone)]
pub struct SamplerRegistry {
    config: SamplerConfig,
    clock: Arc<dyn Clock>,
    samplers: Option<SyncSamplers>,
}

impl SamplerRegistry {
    pub fn new(config: SamplerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            samplers: None,
        }
    }

    /// Returns the live samplers, creating them if none exist.
    pub fn get_or_init(&mut self) -> &mut SyncSamplers {
        let (config, clock) = (&self.config, &self.clock);
        self.samplers.get_or_insert_with(|| {
            tracing::debug!(target: "samplers", event = "init", "Creating sync samplers");
            SyncSamplers::new(config, clock)
        })
    }

    /// Discards both samplers. Returns whether any existed.
    pub fn reset(&mut self) -> bool {
        let discarded = self.samplers.take().is_some();
        if discarded {
            tracing::debug!(target: "samplers", event = "reset", "Discarded sync samplers");
        }
        discarded
    }

    pub fn is_initialized(&self) -> bool {
        self.samplers.is_some()
    }

    pub fn samplers(&self) -> Option<&SyncSamplers> {
        self.samplers.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration;

    #[test]
    fn test_lazy_init_and_reset() {
        let clock = ManualClock::new();
        let mut registry = SamplerRegistry::new(SamplerConfig::default(), Arc::new(clock.clone()));
        assert!(!registry.is_initialized());
        assert!(!registry.reset());

        registry.get_or_init().snapshot.sample(10.0);
        clock.advance(Duration::from_secs(1));
        registry.get_or_init().snapshot.sample(20.0);
        assert_eq!(registry.samplers().map(|s| s.snapshot.len()), Some(2));
        assert_eq!(registry.samplers().map(|s| s.replica_lag.len()), Some(0));

        assert!(registry.reset());
        assert!(!registry.is_initialized());

        let fresh = registry.get_or_init();
        assert!(fresh.snapshot.is_empty());
        assert!(fresh.snapshot.average().is_nan());
    }

    #[test]
    fn test_old_instances_survive_reset() {
        let clock = ManualClock::new();
        let mut registry = SamplerRegistry::new(SamplerConfig::default(), Arc::new(clock.clone()));
        registry.get_or_init().replica_lag.sample(8.0);
        clock.advance(Duration::from_secs(1));
        registry.get_or_init().replica_lag.sample(6.0);

        let held = registry.samplers().cloned();
        registry.reset();
        assert_eq!(held.and_then(|s| s.replica_lag.rate()), Some(-2.0));
    }
}
