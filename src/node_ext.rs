//! Node extension commands
//!
//! Methods the pin node serves beyond the reference chain server set.

use pinjson_core::{RegistryBuilder, Result};
use pinjson_macros::Command;
use serde::{Deserialize, Serialize};

/// Dynamically changes the debug logging level.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "debuglevel")]
pub struct DebugLevelCmd {
    /// The debug level(s) to use, either a single level for all subsystems or 'show' to list the available subsystems
    pub level_spec: String,
}

impl DebugLevelCmd {
    pub fn new(level_spec: impl Into<String>) -> Self {
        Self {
            level_spec: level_spec.into(),
        }
    }
}

/// Sub-command of `node`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeSubCmd {
    Connect,
    Remove,
    Disconnect,
}

/// Attempts to add or remove a peer.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "node")]
pub struct NodeCmd {
    /// 'disconnect' to remove all matching non-persistent peers, 'remove' to remove a persistent peer, or 'connect' to connect to a peer
    #[param(usage = "\"connect|remove|disconnect\"")]
    pub sub_cmd: NodeSubCmd,
    /// Either the IP address and port of the peer to operate on, or a valid peer ID
    pub target: String,
    /// 'perm' to make the connected peer a permanent one, 'temp' to try a single connect to a peer
    pub connect_sub_cmd: Option<String>,
}

impl NodeCmd {
    pub fn new(sub_cmd: NodeSubCmd, target: impl Into<String>, connect_sub_cmd: Option<String>) -> Self {
        Self {
            sub_cmd,
            target: target.into(),
            connect_sub_cmd,
        }
    }
}

/// Generates a set number of blocks (simnet or regtest only) and returns a JSON array of their hashes.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "generate")]
pub struct GenerateCmd {
    /// Number of blocks to generate
    pub num_blocks: u32,
}

impl GenerateCmd {
    pub fn new(num_blocks: u32) -> Self {
        Self { num_blocks }
    }
}

/// Generates blocks immediately to a specified address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "generatetoaddress")]
pub struct GenerateToAddressCmd {
    /// Number of blocks to generate
    pub num_blocks: i64,
    /// The address to send the newly generated coins to
    pub address: String,
    /// How many iterations to try
    #[param(default = "1000000")]
    pub max_tries: Option<i64>,
}

impl GenerateToAddressCmd {
    pub fn new(num_blocks: i64, address: impl Into<String>, max_tries: Option<i64>) -> Self {
        Self {
            num_blocks,
            address: address.into(),
            max_tries,
        }
    }
}

/// Get block height and hash of best block in the main chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getbestblock")]
pub struct GetBestBlockCmd;

/// Get the network the server is running on.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getcurrentnet")]
pub struct GetCurrentNetCmd;

/// Returns block headers starting with the first known block hash from the request.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getheaders")]
pub struct GetHeadersCmd {
    /// JSON array of hex-encoded hashes of blocks, newest first
    pub block_locators: Vec<String>,
    /// Block hash to stop including block headers for
    pub hash_stop: String,
}

impl GetHeadersCmd {
    pub fn new(block_locators: Vec<String>, hash_stop: impl Into<String>) -> Self {
        Self {
            block_locators,
            hash_stop: hash_stop.into(),
        }
    }
}

/// Returns the JSON-RPC API version (semver).
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "version")]
pub struct VersionCmd;

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder> {
    builder
        .register::<DebugLevelCmd>()?
        .register::<NodeCmd>()?
        .register::<GenerateCmd>()?
        .register::<GenerateToAddressCmd>()?
        .register::<GetBestBlockCmd>()?
        .register::<GetCurrentNetCmd>()?
        .register::<GetHeadersCmd>()?
        .register::<VersionCmd>()
}
