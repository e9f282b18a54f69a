// Path: crates/types/src/app/events.rs

use crate::error::EventDecodeError;
use serde::{Deserialize, Deserializer, Serialize};

/// HTTP status code that invalidates the current client token.
pub const HTTP_UNAUTHORIZED: u16 = 401;

/// A unified event type covering everything the status engine reacts to.
/// Status snapshots arrive from the polling transport; the remaining
/// variants come from the session layer or from failed API requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoreEvent {
    /// A periodic status snapshot polled from the node.
    StatusUpdate {
        /// The raw snapshot. Every field is optional.
        param: CoreInfo,
    },
    /// The transport lost its connection to the node.
    Disconnected,
    /// The user logged out.
    SessionEnded,
    /// The user logged in with the current token.
    SessionStarted,
    /// A client token was supplied but not verified yet.
    TokenSet {
        /// The opaque client access token.
        token: String,
    },
    /// An API request to the node failed.
    RequestFailed {
        /// The HTTP status of the failed response.
        http_status: u16,
        /// The node's stable error code, if the response carried one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        /// The node's error message, if the response carried one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl CoreEvent {
    /// Decodes one event from its JSON representation.
    pub fn from_json(input: &str) -> Result<Self, EventDecodeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EventDecodeError::Empty);
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    /// A stable, low-cardinality label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StatusUpdate { .. } => "status_update",
            Self::Disconnected => "disconnected",
            Self::SessionEnded => "session_ended",
            Self::SessionStarted => "session_started",
            Self::TokenSet { .. } => "token_set",
            Self::RequestFailed { .. } => "request_failed",
        }
    }

    /// Returns true for a request failure that revokes the client token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed {
                http_status: HTTP_UNAUTHORIZED,
                ..
            }
        )
    }

    /// Returns true for the events that end the sampling lifetime.
    pub fn ends_sampling(&self) -> bool {
        matches!(self, Self::Disconnected | Self::SessionEnded)
    }
}

/// The status snapshot reported by the node on each poll.
///
/// Field names match the node's API. Absent and `null` fields both decode
/// to `None`; the status reducers substitute their own defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreInfo {
    /// Whether the node has been configured.
    pub is_configured: Option<bool>,
    /// RFC 3339 timestamp of when the node was configured.
    pub configured_at: Option<String>,
    /// The build's source commit, or `"?"` for local builds.
    pub build_commit: Option<String>,
    /// The build time in Unix seconds.
    #[serde(deserialize_with = "string_or_number")]
    pub build_date: Option<String>,
    /// Whether the node runs a production build.
    pub is_production: Option<bool>,
    /// The node's local block height.
    pub block_height: Option<u64>,
    /// The generator's block height, `None` when the generator is unreachable.
    pub generator_block_height: Option<u64>,
    /// Whether the node is a block signer.
    pub is_signer: Option<bool>,
    /// Whether the node is the block generator.
    pub is_generator: Option<bool>,
    /// URL of the generator this node follows.
    pub generator_url: Option<String>,
    /// Access token used to reach the generator.
    pub generator_access_token: Option<String>,
    /// The blockchain identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub blockchain_id: Option<String>,
    /// The network RPC protocol version.
    pub network_rpc_version: Option<u64>,
    /// Progress of an in-flight snapshot download, if any.
    pub snapshot: Option<SnapshotProgress>,
}

impl CoreInfo {
    /// The local block height, defaulting to zero.
    pub fn block_height_or_default(&self) -> u64 {
        self.block_height.unwrap_or_default()
    }

    /// `generator_block_height - block_height`, or `None` when the generator
    /// height is unknown.
    pub fn replica_lag(&self) -> Option<i64> {
        let generator = self.generator_block_height?;
        let local = self.block_height_or_default();
        Some(signed_difference(generator, local))
    }
}

/// Progress of a snapshot transfer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotProgress {
    /// Whether a transfer is running.
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_progress: bool,
    /// Bytes downloaded so far.
    #[serde(default, deserialize_with = "null_as_default")]
    pub downloaded: u64,
    /// Total size in bytes, when known.
    #[serde(default)]
    pub size: Option<u64>,
}

fn signed_difference(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Some node versions report these as JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}
