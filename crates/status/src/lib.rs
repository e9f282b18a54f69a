// Path: crates/status/src/lib.rs
#![forbid(unsafe_code)]
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

//! # nodestat Status Engine
//!
//! Folds status snapshots and session events into a display-ready
//! [`StatusRecord`](nodestat_types::app::StatusRecord) and
//! [`SessionState`](nodestat_types::app::SessionState).
//!
//! ## Architecture
//!
//! - [`rate`]: a sliding-window rate estimator over a scalar series.
//! - [`samplers`]: the two estimators behind the sync-time estimates.
//! - [`status`]: independent per-field reducers composed by [`StatusReducer`].
//! - [`session`]: the token/validity/re-auth state machines.
//! - [`engine`]: owns all of the above and applies one event at a time.
//! - [`actor`]: runs an engine behind an ordered queue for concurrent hosts.
//!
//! The engine performs no I/O. Time comes from an injected [`Clock`].

/// A single-consumer task that serializes event application.
pub mod actor;
/// Injectable time sources.
pub mod clock;
/// The engine composing status and session reducers.
pub mod engine;
/// The sliding-window rate estimator.
pub mod rate;
/// The registry owning the sync-rate estimators.
pub mod samplers;
/// Session and authentication state machines.
pub mod session;
/// Status field reducers.
pub mod status;

pub use actor::{spawn_engine, ActorError, EngineHandle};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{EngineSnapshot, StatusEngine};
pub use rate::{DeltaSampler, Sample};
pub use samplers::{SamplerRegistry, SyncSamplers};
pub use session::SessionReducer;
pub use status::StatusReducer;
