// Path: crates/status/src/status/mod.rs

//! The status derivation engine.
//!
//! [`StatusReducer`] composes the per-field reducers in [`fields`] and the
//! sync estimator in [`sync`] into one [`StatusRecord`] per event. Fields
//! never read each other's new values except `sync_estimates`, which uses
//! the resolved snapshot.

pub mod fields;
pub mod format;
pub mod sync;

use crate::clock::Clock;
use crate::samplers::SamplerRegistry;
use nodestat_types::app::{CoreEvent, StatusRecord};
use nodestat_types::config::StatusConfig;
use nodestat_types::error::ConfigError;
use std::sync::Arc;
use time::UtcOffset;

/// Folds events into [`StatusRecord`]s. Owns the sync samplers.
#[derive(Debug, Clone)]
pub struct StatusReducer {
    test_net_url: String,
    offset: UtcOffset,
    samplers: SamplerRegistry,
}

impl StatusReducer {
    pub fn new(config: &StatusConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            test_net_url: config.test_net_url.clone(),
            offset: config.utc_offset()?,
            samplers: SamplerRegistry::new(config.sampler.clone(), clock),
        })
    }

    /// Derives the next record from `prev` and `event`.
    pub fn reduce(&mut self, prev: &StatusRecord, event: &CoreEvent) -> StatusRecord {
        let snapshot = fields::snapshot(prev.snapshot.as_ref(), event);
        let sync_estimates =
            sync::sync_estimates(&prev.sync_estimates, event, &mut self.samplers, snapshot.as_ref());

        let next = StatusRecord {
            configured: fields::configured(prev.configured, event),
            configured_at: fields::configured_at(&prev.configured_at, event, self.offset),
            build_commit: fields::build_commit(&prev.build_commit, event),
            build_date: fields::build_date(&prev.build_date, event, self.offset),
            production: fields::production(prev.production, event),
            block_height: fields::block_height(prev.block_height, event),
            generator_block_height: fields::generator_block_height(
                prev.generator_block_height,
                event,
            ),
            signer: fields::signer(prev.signer, event),
            generator: fields::generator(prev.generator, event),
            generator_url: fields::generator_url(&prev.generator_url, event),
            generator_access_token: fields::generator_access_token(
                &prev.generator_access_token,
                event,
            ),
            blockchain_id: fields::blockchain_id(&prev.blockchain_id, event),
            network_rpc_version: fields::network_rpc_version(prev.network_rpc_version, event),
            snapshot,
            core_type: fields::core_type(prev.core_type, event),
            replication_lag: fields::replication_lag(prev.replication_lag, event),
            replication_lag_class: fields::replication_lag_class(prev.replication_lag_class, event),
            on_test_net: fields::on_test_net(prev.on_test_net, event, &self.test_net_url),
            connected: fields::connected(prev.connected, event),
            sync_estimates,
        };

        if next.replication_lag_class != prev.replication_lag_class {
            let lag = next
                .replication_lag
                .map(|l| l.to_string())
                .unwrap_or_default();
            tracing::info!(
                target: "status",
                event = "lag_class_changed",
                from = ?prev.replication_lag_class,
                to = ?next.replication_lag_class,
                lag = %lag,
            );
        }
        if prev.connected != next.connected {
            tracing::info!(target: "status", event = "connectivity_changed", connected = next.connected);
        }

        next
    }

    pub fn samplers(&self) -> &SamplerRegistry {
        &self.samplers
    }
}
