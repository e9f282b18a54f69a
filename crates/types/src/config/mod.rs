// Path: crates/types/src/config/mod.rs

//! Configuration for the status engine (`nodestat.toml`).
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::UtcOffset;

fn default_test_net_url() -> String {
    "testnet.chain.com".to_string()
}
fn default_sample_ttl_ms() -> u64 {
    10_000
}
fn default_max_samples() -> usize {
    60
}

/// Configuration supplied when the engine is constructed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    /// Substring of `generator_url` that identifies the test network.
    #[serde(default = "default_test_net_url")]
    pub test_net_url: String,

    /// Window parameters shared by both rate estimators.
    #[serde(default)]
    pub sampler: SamplerConfig,

    /// Offset from UTC, in minutes, used when formatting long timestamps.
    #[serde(default)]
    pub display_utc_offset_minutes: i32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            test_net_url: default_test_net_url(),
            sampler: SamplerConfig::default(),
            display_utc_offset_minutes: 0,
        }
    }
}

impl StatusConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.test_net_url.is_empty() {
            return Err(ConfigError::EmptyTestNetUrl);
        }
        self.sampler.validate()?;
        self.utc_offset()?;
        Ok(())
    }

    /// The display offset as a `time::UtcOffset`.
    pub fn utc_offset(&self) -> Result<UtcOffset, ConfigError> {
        let invalid = || ConfigError::InvalidUtcOffset(self.display_utc_offset_minutes);
        let seconds = self
            .display_utc_offset_minutes
            .checked_mul(60)
            .ok_or_else(invalid)?;
        UtcOffset::from_whole_seconds(seconds).map_err(|_| invalid())
    }
}

/// Window parameters for a sliding-window rate estimator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Samples older than this many milliseconds are ignored when averaging.
    #[serde(default = "default_sample_ttl_ms")]
    pub sample_ttl_ms: u64,
    /// Maximum number of samples retained; the oldest is dropped on overflow.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_ttl_ms: default_sample_ttl_ms(),
            max_samples: default_max_samples(),
        }
    }
}

impl SamplerConfig {
    /// The TTL as a `Duration`.
    pub fn sample_ttl(&self) -> Duration {
        Duration::from_millis(self.sample_ttl_ms)
    }

    /// Checks that the window can ever hold two live samples.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_ttl_ms == 0 {
            return Err(ConfigError::ZeroSampleTtl);
        }
        if self.max_samples < 2 {
            return Err(ConfigError::TooFewSamples(self.max_samples));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = StatusConfig::from_toml_str("").unwrap();
        assert_eq!(config, StatusConfig::default());
        assert_eq!(config.sampler.sample_ttl(), Duration::from_secs(10));
        assert_eq!(config.sampler.max_samples, 60);
    }

    #[test]
    fn test_partial_document() {
        let toml = r#"
            test_net_url = "testnet.example.org"
            display_utc_offset_minutes = -300

            [sampler]
            max_samples = 10
        "#;
        let config = StatusConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.test_net_url, "testnet.example.org");
        assert_eq!(config.sampler.max_samples, 10);
        assert_eq!(config.sampler.sample_ttl_ms, 10_000);
        assert_eq!(config.utc_offset().unwrap().whole_hours(), -5);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            StatusConfig::from_toml_str("test_net_url = \"\""),
            Err(ConfigError::EmptyTestNetUrl)
        ));
        assert!(matches!(
            StatusConfig::from_toml_str("[sampler]\nsample_ttl_ms = 0"),
            Err(ConfigError::ZeroSampleTtl)
        ));
        assert!(matches!(
            StatusConfig::from_toml_str("[sampler]\nmax_samples = 1"),
            Err(ConfigError::TooFewSamples(1))
        ));
        assert!(matches!(
            StatusConfig::from_toml_str("display_utc_offset_minutes = 100000"),
            Err(ConfigError::InvalidUtcOffset(100000))
        ));
        assert!(matches!(
            StatusConfig::from_toml_str("test_net_url = 5"),
            Err(ConfigError::Parse(_))
        ));
    }
}
