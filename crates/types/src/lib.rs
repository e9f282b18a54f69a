// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # nodestat Types
//!
//! This crate holds the data structures shared by every other crate in the
//! workspace: the inbound event taxonomy, the derived status and session
//! records, configuration objects, and error types.
//!
//! ## Architectural Role
//!
//! `nodestat-types` carries no logic beyond (de)serialization and small
//! display helpers. The derivation itself lives in `nodestat-status`, which
//! keeps this crate a stable leaf dependency for transports and UIs that only
//! need to produce events or read snapshots.

/// Inbound events and the derived status/session records.
pub mod app;
/// Configuration structures (`StatusConfig`, `SamplerConfig`).
pub mod config;
/// Error types for configuration loading and event decoding.
pub mod error;
