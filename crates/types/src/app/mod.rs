// Path: crates/types/src/app/mod.rs
//! Inbound events and the display-ready records derived from them.

/// The inbound event taxonomy consumed from the transport and session layers.
pub mod events;
/// Human-readable duration formatting for sync estimates.
pub mod humanize;
/// The derived `StatusRecord` and `SessionState` snapshots.
pub mod status;

pub use events::*;
pub use humanize::humanize_duration;
pub use status::*;
