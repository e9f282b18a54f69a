// Path: crates/status/src/status/fields.rs

//! Independent per-field reducers.
//!
//! Each function maps `(previous value, event)` to the next value. On a
//! `StatusUpdate` the field is taken from the snapshot, falling back to its
//! default when absent or `null`; every other event leaves the field as it
//! was unless the function says otherwise.

use super::format;
use nodestat_types::app::{
    BlockHeight, CoreEvent, CoreInfo, CoreType, LagClass, ReplicationLag, SnapshotProgress,
};
use time::UtcOffset;

/// Lags below this many blocks are green.
pub const LAG_GREEN_BELOW: i64 = 5;
/// Lags below this many blocks (and at least [`LAG_GREEN_BELOW`]) are yellow.
pub const LAG_YELLOW_BELOW: i64 = 10;

fn on_update<T>(prev: T, event: &CoreEvent, derive: impl FnOnce(&CoreInfo) -> T) -> T {
    match event {
        CoreEvent::StatusUpdate { param } => derive(param),
        _ => prev,
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub fn configured(prev: bool, event: &CoreEvent) -> bool {
    on_update(prev, event, |p| p.is_configured.unwrap_or_default())
}

pub fn configured_at(prev: &str, event: &CoreEvent, offset: UtcOffset) -> String {
    match event {
        CoreEvent::StatusUpdate { param } => {
            format::configured_at(param.configured_at.as_deref().unwrap_or_default(), offset)
        }
        _ => prev.to_string(),
    }
}

pub fn build_commit(prev: &str, event: &CoreEvent) -> String {
    match event {
        CoreEvent::StatusUpdate { param } => {
            format::build_commit(param.build_commit.as_deref().unwrap_or_default())
        }
        _ => prev.to_string(),
    }
}

pub fn build_date(prev: &str, event: &CoreEvent, offset: UtcOffset) -> String {
    match event {
        CoreEvent::StatusUpdate { param } => {
            format::build_date(param.build_date.as_deref().unwrap_or_default(), offset)
        }
        _ => prev.to_string(),
    }
}

pub fn production(prev: bool, event: &CoreEvent) -> bool {
    on_update(prev, event, |p| p.is_production.unwrap_or_default())
}

pub fn block_height(prev: u64, event: &CoreEvent) -> u64 {
    on_update(prev, event, CoreInfo::block_height_or_default)
}

/// A `null` generator height is `Unknown`, never the numeric default.
pub fn generator_block_height(prev: BlockHeight, event: &CoreEvent) -> BlockHeight {
    on_update(prev, event, |p| {
        p.generator_block_height
            .map_or(BlockHeight::Unknown, BlockHeight::Known)
    })
}

pub fn signer(prev: bool, event: &CoreEvent) -> bool {
    on_update(prev, event, |p| p.is_signer.unwrap_or_default())
}

pub fn generator(prev: bool, event: &CoreEvent) -> bool {
    on_update(prev, event, |p| p.is_generator.unwrap_or_default())
}

pub fn generator_url(prev: &str, event: &CoreEvent) -> String {
    on_update(prev.to_string(), event, |p| text(&p.generator_url))
}

pub fn generator_access_token(prev: &str, event: &CoreEvent) -> String {
    on_update(prev.to_string(), event, |p| text(&p.generator_access_token))
}

pub fn blockchain_id(prev: &str, event: &CoreEvent) -> String {
    on_update(prev.to_string(), event, |p| text(&p.blockchain_id))
}

pub fn network_rpc_version(prev: u64, event: &CoreEvent) -> u64 {
    on_update(prev, event, |p| p.network_rpc_version.unwrap_or_default())
}

/// The incoming snapshot, with a missing `size` carried over from the
/// previous one. Cleared together with the samplers, so a transfer after a
/// reconnect never inherits an earlier size.
pub fn snapshot(prev: Option<&SnapshotProgress>, event: &CoreEvent) -> Option<SnapshotProgress> {
    match event {
        CoreEvent::StatusUpdate { param } => param.snapshot.clone().map(|mut next| {
            if next.size.is_none() {
                next.size = prev.and_then(|p| p.size);
            }
            next
        }),
        e if e.ends_sampling() => None,
        _ => prev.cloned(),
    }
}

/// Recomputed from scratch on every update: generator wins over signer.
pub fn core_type(prev: Option<CoreType>, event: &CoreEvent) -> Option<CoreType> {
    on_update(prev, event, |p| {
        Some(if p.is_generator.unwrap_or_default() {
            CoreType::Generator
        } else if p.is_signer.unwrap_or_default() {
            CoreType::Signer
        } else {
            CoreType::Participant
        })
    })
}

pub fn replication_lag(prev: Option<ReplicationLag>, event: &CoreEvent) -> Option<ReplicationLag> {
    on_update(prev, event, |p| {
        Some(
            p.replica_lag()
                .map_or(ReplicationLag::Unknown, ReplicationLag::Known),
        )
    })
}

pub fn replication_lag_class(prev: Option<LagClass>, event: &CoreEvent) -> Option<LagClass> {
    on_update(prev, event, |p| Some(classify_lag(p.replica_lag())))
}

/// Green for `[0, 5)`, yellow for `[5, 10)`, red for everything else,
/// including an unknown lag and a node reporting itself ahead of the
/// generator.
pub fn classify_lag(lag: Option<i64>) -> LagClass {
    match lag {
        Some(lag) if (0..LAG_GREEN_BELOW).contains(&lag) => LagClass::Green,
        Some(lag) if (LAG_GREEN_BELOW..LAG_YELLOW_BELOW).contains(&lag) => LagClass::Yellow,
        _ => LagClass::Red,
    }
}

pub fn on_test_net(prev: bool, event: &CoreEvent, test_net_url: &str) -> bool {
    on_update(prev, event, |p| {
        p.generator_url
            .as_deref()
            .unwrap_or_default()
            .contains(test_net_url)
    })
}

pub fn connected(prev: bool, event: &CoreEvent) -> bool {
    match event {
        CoreEvent::StatusUpdate { .. } => true,
        CoreEvent::Disconnected => false,
        _ => prev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn update(param: CoreInfo) -> CoreEvent {
        CoreEvent::StatusUpdate { param }
    }

    fn heights(local: u64, generator: Option<u64>) -> CoreEvent {
        update(CoreInfo {
            block_height: Some(local),
            generator_block_height: generator,
            ..Default::default()
        })
    }

    #[test]
    fn test_other_events_are_identity() {
        for event in [
            CoreEvent::SessionStarted,
            CoreEvent::SessionEnded,
            CoreEvent::TokenSet {
                token: "t".into(),
            },
        ] {
            assert!(configured(true, &event));
            assert_eq!(block_height(42, &event), 42);
            assert_eq!(generator_url("https://gen", &event), "https://gen");
            assert_eq!(
                generator_block_height(BlockHeight::Unknown, &event),
                BlockHeight::Unknown
            );
            assert_eq!(
                core_type(Some(CoreType::Signer), &event),
                Some(CoreType::Signer)
            );
            assert_eq!(replication_lag_class(None, &event), None);
        }
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let event = update(CoreInfo::default());
        assert!(!configured(true, &event));
        assert_eq!(block_height(42, &event), 0);
        assert_eq!(generator_url("https://gen", &event), "");
        assert_eq!(network_rpc_version(3, &event), 0);
        assert_eq!(build_commit("old", &event), "");
        assert_eq!(configured_at("old", &event, UtcOffset::UTC), "");
        assert_eq!(snapshot(None, &event), None);
    }

    #[test]
    fn test_generator_block_height_null_is_unknown() {
        assert_eq!(
            generator_block_height(BlockHeight::Known(5), &heights(1, None)),
            BlockHeight::Unknown
        );
        assert_eq!(
            generator_block_height(BlockHeight::Unknown, &heights(1, Some(0))),
            BlockHeight::Known(0)
        );
    }

    #[test]
    fn test_core_type_is_not_sticky() {
        let role = |is_generator, is_signer| {
            update(CoreInfo {
                is_generator: Some(is_generator),
                is_signer: Some(is_signer),
                ..Default::default()
            })
        };
        let mut state = None;
        state = core_type(state, &role(true, true));
        assert_eq!(state, Some(CoreType::Generator));
        state = core_type(state, &role(false, true));
        assert_eq!(state, Some(CoreType::Signer));
        state = core_type(state, &role(false, false));
        assert_eq!(state, Some(CoreType::Participant));
        state = core_type(state, &role(true, false));
        assert_eq!(state, Some(CoreType::Generator));
    }

    #[test]
    fn test_replication_lag() {
        assert_eq!(
            replication_lag(None, &heights(90, Some(100))),
            Some(ReplicationLag::Known(10))
        );
        assert_eq!(
            replication_lag(Some(ReplicationLag::Known(1)), &heights(90, None)),
            Some(ReplicationLag::Unknown)
        );
        assert_eq!(
            replication_lag(None, &heights(100, Some(100))),
            Some(ReplicationLag::Known(0))
        );
    }

    #[test]
    fn test_lag_class_thresholds() {
        assert_eq!(classify_lag(Some(0)), LagClass::Green);
        assert_eq!(classify_lag(Some(4)), LagClass::Green);
        assert_eq!(classify_lag(Some(5)), LagClass::Yellow);
        assert_eq!(classify_lag(Some(9)), LagClass::Yellow);
        assert_eq!(classify_lag(Some(10)), LagClass::Red);
        assert_eq!(classify_lag(Some(-1)), LagClass::Red);
        assert_eq!(classify_lag(None), LagClass::Red);
    }

    #[test]
    fn test_snapshot_carries_size() {
        let first = SnapshotProgress {
            in_progress: true,
            downloaded: 100,
            size: Some(1000),
        };
        let event = update(CoreInfo {
            snapshot: Some(SnapshotProgress {
                in_progress: true,
                downloaded: 300,
                size: None,
            }),
            ..Default::default()
        });
        let next = snapshot(Some(&first), &event).unwrap();
        assert_eq!(next.downloaded, 300);
        assert_eq!(next.size, Some(1000));

        assert_eq!(snapshot(Some(&first), &CoreEvent::SessionStarted), Some(first.clone()));
        for reset in [CoreEvent::Disconnected, CoreEvent::SessionEnded] {
            let cleared = snapshot(Some(&first), &reset);
            assert_eq!(cleared, None);
            let resumed = snapshot(cleared.as_ref(), &event).unwrap();
            assert_eq!(resumed.size, None);
        }
    }

    #[test]
    fn test_on_test_net() {
        let url = |u: &str| {
            update(CoreInfo {
                generator_url: Some(u.to_string()),
                ..Default::default()
            })
        };
        assert!(on_test_net(false, &url("https://testnet.chain.com"), "testnet.chain.com"));
        assert!(!on_test_net(true, &url("https://gen.internal"), "testnet.chain.com"));
        assert!(!on_test_net(true, &update(CoreInfo::default()), "testnet.chain.com"));
        assert!(on_test_net(true, &CoreEvent::Disconnected, "testnet.chain.com"));
    }

    #[test]
    fn test_connected() {
        assert!(!connected(true, &CoreEvent::Disconnected));
        assert!(connected(false, &update(CoreInfo::default())));
        assert!(!connected(false, &CoreEvent::SessionStarted));
    }

    proptest! {
        #[test]
        fn prop_lag_class_matches_thresholds(local in 0u64..1_000, generator in proptest::option::of(0u64..1_000)) {
            let class = replication_lag_class(None, &heights(local, generator)).unwrap();
            let expected = match generator.map(|g| g as i64 - local as i64) {
                Some(lag) if (0..5).contains(&lag) => LagClass::Green,
                Some(lag) if (5..10).contains(&lag) => LagClass::Yellow,
                _ => LagClass::Red,
            };
            prop_assert_eq!(class, expected);
        }
    }
}
