// Path: crates/cli/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]
#![forbid(unsafe_code)]

//! Offline tooling for nodestat.
//!
//! The `nodestat` binary is a thin wrapper over [`replay`], which folds a
//! recorded event log through a [`nodestat_status::StatusEngine`] driven by a
//! [`nodestat_status::ManualClock`].

pub mod replay;

pub use replay::{load_config, replay, RecordedEvent, ReplayOptions, ReplayOutcome};
