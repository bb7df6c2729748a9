//! Chain server websocket notifications
//!
//! Notifications are pushed by the server with a `null` id. They are
//! registered with both the websocket-only and notification flags, so a
//! client can tell them apart from commands it may send.
//!
//! ```rust
//! use pinjson::chainsvr_ntfns::BlockConnectedNtfn;
//! use pinjson::core::{Id, RpcVersion};
//!
//! let registry = pinjson::default_registry().unwrap();
//! let ntfn = BlockConnectedNtfn::new("123", 100000, 123456789);
//! let bytes = registry.marshal_cmd(RpcVersion::V1, Id::Null, &ntfn).unwrap();
//! assert_eq!(
//!     bytes,
//!     br#"{"jsonrpc":"1.0","method":"blockconnected","params":["123",100000,123456789],"id":null}"#
//! );
//! ```

use pinjson_core::{RegistryBuilder, Result};
use pinjson_macros::Command;
use serde::{Deserialize, Serialize};

/// Block a relevant transaction was mined in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockDetails {
    pub height: i32,
    pub hash: String,
    /// Position of the transaction within the block
    pub index: i32,
    pub time: i64,
}

/// Signature script of a transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSig {
    pub asm: String,
    pub hex: String,
}

/// Input of a decoded transaction
///
/// Coinbase inputs carry `coinbase` and no outpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vout: Option<u32>,
    #[serde(rename = "scriptSig", skip_serializing_if = "Option::is_none")]
    pub script_sig: Option<ScriptSig>,
    #[serde(rename = "txinwitness", default, skip_serializing_if = "Vec::is_empty")]
    pub witness: Vec<String>,
    pub sequence: u32,
}

/// Output script of a decoded transaction output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPubKeyResult {
    pub asm: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hex: String,
    #[serde(rename = "reqSigs", skip_serializing_if = "Option::is_none")]
    pub req_sigs: Option<i32>,
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
}

/// Output of a decoded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vout {
    /// Amount in BTC
    pub value: f64,
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKeyResult,
}

fn is_zero<T: Default + PartialEq>(n: &T) -> bool {
    *n == T::default()
}

/// Decoded transaction, as carried by `txacceptedverbose`
///
/// `vin` and `vout` are sent as `null` when absent. Zero and empty optional
/// fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxRawResult {
    pub hex: String,
    pub txid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub vsize: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub weight: i32,
    pub version: i32,
    #[serde(rename = "locktime")]
    pub lock_time: u32,
    pub vin: Option<Vec<Vin>>,
    pub vout: Option<Vec<Vout>>,
    #[serde(rename = "blockhash", default, skip_serializing_if = "String::is_empty")]
    pub block_hash: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub confirmations: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub time: i64,
    #[serde(rename = "blocktime", default, skip_serializing_if = "is_zero")]
    pub block_time: i64,
}

/// A block has been connected to the main chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "blockconnected", websocket_only, notification)]
pub struct BlockConnectedNtfn {
    pub hash: String,
    pub height: i32,
    pub time: i64,
}

impl BlockConnectedNtfn {
    pub fn new(hash: impl Into<String>, height: i32, time: i64) -> Self {
        Self {
            hash: hash.into(),
            height,
            time,
        }
    }
}

/// A block has been disconnected from the main chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "blockdisconnected", websocket_only, notification)]
pub struct BlockDisconnectedNtfn {
    pub hash: String,
    pub height: i32,
    pub time: i64,
}

impl BlockDisconnectedNtfn {
    pub fn new(hash: impl Into<String>, height: i32, time: i64) -> Self {
        Self {
            hash: hash.into(),
            height,
            time,
        }
    }
}

/// A block has been connected; carries the serialized header and the matching transactions.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "filteredblockconnected", websocket_only, notification)]
pub struct FilteredBlockConnectedNtfn {
    pub height: i32,
    pub header: String,
    pub subscribed_txs: Vec<String>,
}

impl FilteredBlockConnectedNtfn {
    pub fn new(height: i32, header: impl Into<String>, subscribed_txs: Vec<String>) -> Self {
        Self {
            height,
            header: header.into(),
            subscribed_txs,
        }
    }
}

/// A block has been disconnected; carries the serialized header.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "filteredblockdisconnected", websocket_only, notification)]
pub struct FilteredBlockDisconnectedNtfn {
    pub height: i32,
    pub header: String,
}

impl FilteredBlockDisconnectedNtfn {
    pub fn new(height: i32, header: impl Into<String>) -> Self {
        Self {
            height,
            header: header.into(),
        }
    }
}

/// A transaction paying to a watched address was received.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "recvtx", websocket_only, notification)]
pub struct RecvTxNtfn {
    pub hex_tx: String,
    pub block: Option<BlockDetails>,
}

impl RecvTxNtfn {
    pub fn new(hex_tx: impl Into<String>, block: Option<BlockDetails>) -> Self {
        Self {
            hex_tx: hex_tx.into(),
            block,
        }
    }
}

/// A transaction spending a watched outpoint was received.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "redeemingtx", websocket_only, notification)]
pub struct RedeemingTxNtfn {
    pub hex_tx: String,
    pub block: Option<BlockDetails>,
}

impl RedeemingTxNtfn {
    pub fn new(hex_tx: impl Into<String>, block: Option<BlockDetails>) -> Self {
        Self {
            hex_tx: hex_tx.into(),
            block,
        }
    }
}

/// A rescan has finished.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "rescanfinished", websocket_only, notification)]
pub struct RescanFinishedNtfn {
    pub hash: String,
    pub height: i32,
    pub time: i64,
}

impl RescanFinishedNtfn {
    pub fn new(hash: impl Into<String>, height: i32, time: i64) -> Self {
        Self {
            hash: hash.into(),
            height,
            time,
        }
    }
}

/// A rescan has progressed to the given block.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "rescanprogress", websocket_only, notification)]
pub struct RescanProgressNtfn {
    pub hash: String,
    pub height: i32,
    pub time: i64,
}

impl RescanProgressNtfn {
    pub fn new(hash: impl Into<String>, height: i32, time: i64) -> Self {
        Self {
            hash: hash.into(),
            height,
            time,
        }
    }
}

/// A transaction was accepted into the mempool.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "txaccepted", websocket_only, notification)]
pub struct TxAcceptedNtfn {
    pub tx_id: String,
    /// Total output amount in BTC
    pub amount: f64,
}

impl TxAcceptedNtfn {
    pub fn new(tx_id: impl Into<String>, amount: f64) -> Self {
        Self {
            tx_id: tx_id.into(),
            amount,
        }
    }
}

/// A transaction was accepted into the mempool; carries the decoded transaction.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "txacceptedverbose", websocket_only, notification)]
pub struct TxAcceptedVerboseNtfn {
    pub raw_tx: TxRawResult,
}

impl TxAcceptedVerboseNtfn {
    pub fn new(raw_tx: TxRawResult) -> Self {
        Self { raw_tx }
    }
}

/// A transaction matching the client's loaded filter was accepted into the mempool.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "relevanttxaccepted", websocket_only, notification)]
pub struct RelevantTxAcceptedNtfn {
    pub transaction: String,
}

impl RelevantTxAcceptedNtfn {
    pub fn new(transaction: impl Into<String>) -> Self {
        Self {
            transaction: transaction.into(),
        }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder> {
    builder
        .register::<BlockConnectedNtfn>()?
        .register::<BlockDisconnectedNtfn>()?
        .register::<FilteredBlockConnectedNtfn>()?
        .register::<FilteredBlockDisconnectedNtfn>()?
        .register::<RecvTxNtfn>()?
        .register::<RedeemingTxNtfn>()?
        .register::<RescanFinishedNtfn>()?
        .register::<RescanProgressNtfn>()?
        .register::<TxAcceptedNtfn>()?
        .register::<TxAcceptedVerboseNtfn>()?
        .register::<RelevantTxAcceptedNtfn>()
}
