// Path: crates/types/src/app/status.rs

use super::events::SnapshotProgress;
use super::humanize::humanize_duration;
use serde::{Serialize, Serializer};
use std::fmt;

/// The literal shown wherever a value depends on an unreachable generator.
pub const UNKNOWN_SENTINEL: &str = "???";

/// The role a node plays in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CoreType {
    /// The node produces blocks.
    Generator,
    /// The node signs blocks produced by the generator.
    Signer,
    /// The node only follows the chain.
    Participant,
}

impl fmt::Display for CoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generator => "Generator",
            Self::Signer => "Signer",
            Self::Participant => "Participant",
        };
        f.write_str(name)
    }
}

/// Severity of the replication lag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LagClass {
    /// Fewer than 5 blocks behind.
    Green,
    /// Between 5 and 9 blocks behind.
    Yellow,
    /// 10 or more blocks behind, ahead of the generator, or unknown.
    Red,
}

impl LagClass {
    /// The lowercase label used by the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for LagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block height that may be explicitly unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockHeight {
    /// A reported height.
    Known(u64),
    /// The node reported no height (`null`).
    Unknown,
}

impl BlockHeight {
    /// Returns the height when known.
    pub fn known(&self) -> Option<u64> {
        match self {
            Self::Known(h) => Some(*h),
            Self::Unknown => None,
        }
    }
}

impl Default for BlockHeight {
    fn default() -> Self {
        Self::Known(0)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(h) => write!(f, "{h}"),
            Self::Unknown => f.write_str(UNKNOWN_SENTINEL),
        }
    }
}

impl Serialize for BlockHeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(h) => serializer.serialize_u64(*h),
            Self::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
        }
    }
}

/// Number of blocks the node trails the generator by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicationLag {
    /// `generator_block_height - block_height`. Negative when the node reports
    /// a height above the generator's.
    Known(i64),
    /// The generator height is unavailable.
    Unknown,
}

impl ReplicationLag {
    /// Returns the lag when known.
    pub fn known(&self) -> Option<i64> {
        match self {
            Self::Known(lag) => Some(*lag),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ReplicationLag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(lag) => write!(f, "{lag}"),
            Self::Unknown => f.write_str(UNKNOWN_SENTINEL),
        }
    }
}

impl Serialize for ReplicationLag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(lag) => serializer.serialize_i64(*lag),
            Self::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
        }
    }
}

/// Estimated seconds until the node has caught up. At most one of the two
/// estimates is present, depending on whether a snapshot is downloading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SyncEstimates {
    /// Seconds until the in-flight snapshot finishes downloading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_seconds: Option<f64>,
    /// Seconds until the replication lag closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_lag_seconds: Option<f64>,
}

impl SyncEstimates {
    /// Returns true when no estimate is available.
    pub fn is_empty(&self) -> bool {
        self.snapshot_seconds.is_none() && self.replica_lag_seconds.is_none()
    }

    /// The snapshot estimate formatted for display, e.g. `"3m 20s"`.
    pub fn snapshot_display(&self) -> Option<String> {
        self.snapshot_seconds.map(humanize_duration)
    }

    /// The replica-lag estimate formatted for display.
    pub fn replica_lag_display(&self) -> Option<String> {
        self.replica_lag_seconds.map(humanize_duration)
    }
}

/// The display-ready status of the node, rebuilt after every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusRecord {
    /// Whether the node has been configured.
    pub configured: bool,
    /// Configuration time as a long timestamp, or empty.
    pub configured_at: String,
    /// Build commit, truncated for display.
    pub build_commit: String,
    /// Build time as a long timestamp, or empty.
    pub build_date: String,
    /// Whether the node runs a production build.
    pub production: bool,
    /// The node's block height.
    pub block_height: u64,
    /// The generator's block height.
    pub generator_block_height: BlockHeight,
    /// Whether the node is a block signer.
    pub signer: bool,
    /// Whether the node is the block generator.
    pub generator: bool,
    /// URL of the generator the node follows.
    pub generator_url: String,
    /// Access token used to reach the generator.
    pub generator_access_token: String,
    /// The blockchain identifier.
    pub blockchain_id: String,
    /// The network RPC protocol version.
    pub network_rpc_version: u64,
    /// The last reported snapshot transfer.
    pub snapshot: Option<SnapshotProgress>,
    /// The node's role. `None` until the first status update.
    pub core_type: Option<CoreType>,
    /// Blocks behind the generator. `None` until the first status update.
    pub replication_lag: Option<ReplicationLag>,
    /// Severity of the lag. `None` until the first status update.
    pub replication_lag_class: Option<LagClass>,
    /// Whether the node follows the test network.
    pub on_test_net: bool,
    /// Whether the transport currently reaches the node.
    pub connected: bool,
    /// Time-to-catch-up estimates.
    pub sync_estimates: SyncEstimates,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self {
            configured: false,
            configured_at: String::new(),
            build_commit: String::new(),
            build_date: String::new(),
            production: false,
            block_height: 0,
            generator_block_height: BlockHeight::default(),
            signer: false,
            generator: false,
            generator_url: String::new(),
            generator_access_token: String::new(),
            blockchain_id: String::new(),
            network_rpc_version: 0,
            snapshot: None,
            core_type: None,
            replication_lag: None,
            replication_lag_class: None,
            on_test_net: false,
            connected: true,
            sync_estimates: SyncEstimates::default(),
        }
    }
}

/// Authentication state of the dashboard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// The current client token, empty when none is set.
    pub client_token: String,
    /// Whether the token has been accepted by a login.
    pub valid_token: bool,
    /// Whether the node demanded a (new) client token.
    pub require_client_token: bool,
}
