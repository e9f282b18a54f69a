// Path: crates/types/src/error/mod.rs
//! Error types for the edges of the status engine.
//!
//! The fold itself never fails; errors only arise while loading
//! configuration or decoding events handed over by a transport.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while loading or validating a `StatusConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The test-network URL substring is empty and would match every URL.
    #[error("test_net_url must not be empty")]
    EmptyTestNetUrl,
    /// The estimator TTL is zero, so no sample would ever be live.
    #[error("sampler.sample_ttl_ms must be greater than zero")]
    ZeroSampleTtl,
    /// The estimator window holds no samples.
    #[error("sampler.max_samples must be at least 2, got {0}")]
    TooFewSamples(usize),
    /// The display offset is outside the representable range.
    #[error("display_utc_offset_minutes out of range: {0}")]
    InvalidUtcOffset(i32),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "CONFIG_PARSE",
            Self::EmptyTestNetUrl => "CONFIG_EMPTY_TEST_NET_URL",
            Self::ZeroSampleTtl => "CONFIG_ZERO_SAMPLE_TTL",
            Self::TooFewSamples(_) => "CONFIG_TOO_FEW_SAMPLES",
            Self::InvalidUtcOffset(_) => "CONFIG_INVALID_UTC_OFFSET",
        }
    }
}

/// Errors raised while decoding an inbound event.
#[derive(Error, Debug)]
pub enum EventDecodeError {
    /// The input was not a valid event document.
    #[error("Invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The input was blank.
    #[error("Empty event")]
    Empty,
}

impl ErrorCode for EventDecodeError {
    fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "EVENT_INVALID_JSON",
            Self::Empty => "EVENT_EMPTY",
        }
    }
}
