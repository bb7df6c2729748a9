//! Chain server commands
//!
//! Methods served by the full node over plain HTTP POST. None of them carry
//! usage flags. Auxiliary types here are the structured parameters some of
//! these methods take: raw transaction inputs, funding options and block
//! template requests.

use std::collections::BTreeMap;

use pinjson_core::unions::json_kind;
use pinjson_core::{AllowHighFeesOrMaxFeeRate, DescriptorRange, HashOrHeight, RegistryBuilder, Result};
use pinjson_macros::Command;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sub-command of `addnode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddNodeSubCmd {
    /// Add the peer to the persistent list
    Add,
    /// Remove the peer from the persistent list
    Remove,
    /// Try a single connection
    #[serde(rename = "onetry")]
    OneTry,
}

/// Attempts to add or remove a persistent peer.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "addnode")]
pub struct AddNodeCmd {
    /// IP address and port of the peer to operate on
    pub addr: String,
    /// 'add' to add a persistent peer, 'remove' to remove a persistent peer, or 'onetry' to try a single connection to a peer
    #[param(usage = "\"add|remove|onetry\"")]
    pub sub_cmd: AddNodeSubCmd,
}

impl AddNodeCmd {
    pub fn new(addr: impl Into<String>, sub_cmd: AddNodeSubCmd) -> Self {
        Self {
            addr: addr.into(),
            sub_cmd,
        }
    }
}

/// Outpoint spent by a raw transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionInput {
    pub txid: String,
    pub vout: u32,
}

impl TransactionInput {
    pub fn new(txid: impl Into<String>, vout: u32) -> Self {
        Self {
            txid: txid.into(),
            vout,
        }
    }
}

/// Returns a new transaction spending the provided inputs and sending to the provided addresses.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "createrawtransaction")]
pub struct CreateRawTransactionCmd {
    /// The inputs to the transaction
    #[param(usage = "[{\"txid\":\"value\",\"vout\":n},...]")]
    pub inputs: Vec<TransactionInput>,
    /// JSON object with the destination addresses as keys and amounts as values
    #[param(usage = "{\"address\":amount,...}")]
    pub amounts: BTreeMap<String, f64>,
    /// Locktime value; a non-zero value will also locktime-activate the inputs
    pub lock_time: Option<i64>,
}

impl CreateRawTransactionCmd {
    /// Amounts are in BTC
    pub fn new(
        inputs: Vec<TransactionInput>,
        amounts: BTreeMap<String, f64>,
        lock_time: Option<i64>,
    ) -> Self {
        Self {
            inputs,
            amounts,
            lock_time,
        }
    }
}

/// Change output script type chosen by the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    #[serde(rename = "legacy")]
    Legacy,
    #[serde(rename = "p2sh-segwit")]
    P2shSegwit,
    #[serde(rename = "bech32")]
    Bech32,
}

/// Fee estimation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EstimateSmartFeeMode {
    Unset,
    Economical,
    Conservative,
}

/// Options object of `fundrawtransaction`
///
/// Keys keep the mixed camelCase and snake_case spelling the server
/// expects. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundRawTransactionOpts {
    #[serde(rename = "changeAddress", skip_serializing_if = "Option::is_none")]
    pub change_address: Option<String>,
    #[serde(rename = "changePosition", skip_serializing_if = "Option::is_none")]
    pub change_position: Option<i32>,
    #[serde(rename = "change_type", skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
    #[serde(rename = "includeWatching", skip_serializing_if = "Option::is_none")]
    pub include_watching: Option<bool>,
    #[serde(rename = "lockUnspents", skip_serializing_if = "Option::is_none")]
    pub lock_unspents: Option<bool>,
    /// BTC per kilobyte
    #[serde(rename = "feeRate", skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<f64>,
    #[serde(
        rename = "subtractFeeFromOutputs",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subtract_fee_from_outputs: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaceable: Option<bool>,
    #[serde(rename = "conf_target", skip_serializing_if = "Option::is_none")]
    pub conf_target: Option<i32>,
    #[serde(rename = "estimate_mode", skip_serializing_if = "Option::is_none")]
    pub estimate_mode: Option<EstimateSmartFeeMode>,
}

/// Adds inputs to a transaction until it has enough value to cover its outputs.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "fundrawtransaction")]
pub struct FundRawTransactionCmd {
    /// Hex-encoded raw transaction
    pub hex_tx: String,
    /// Funding options
    pub options: FundRawTransactionOpts,
    /// Whether the transaction hex is a serialized witness transaction
    pub is_witness: Option<bool>,
}

impl FundRawTransactionCmd {
    /// `tx` is the serialized transaction; it is hex-encoded here
    pub fn new(tx: &[u8], options: FundRawTransactionOpts, is_witness: Option<bool>) -> Self {
        Self {
            hex_tx: hex::encode(tx),
            options,
            is_witness,
        }
    }
}

/// Returns a JSON object representing the provided serialized, hex-encoded transaction.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "decoderawtransaction")]
pub struct DecodeRawTransactionCmd {
    /// Serialized, hex-encoded transaction
    pub hex_tx: String,
}

impl DecodeRawTransactionCmd {
    pub fn new(hex_tx: impl Into<String>) -> Self {
        Self { hex_tx: hex_tx.into() }
    }
}

/// Returns a JSON object with information about the provided hex-encoded script.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "decodescript")]
pub struct DecodeScriptCmd {
    /// Hex-encoded script
    pub hex_script: String,
}

impl DecodeScriptCmd {
    pub fn new(hex_script: impl Into<String>) -> Self {
        Self {
            hex_script: hex_script.into(),
        }
    }
}

/// Derives one or more addresses corresponding to an output descriptor.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "deriveaddresses")]
pub struct DeriveAddressesCmd {
    /// The descriptor
    pub descriptor: String,
    /// End or [begin,end] of the range to derive, for ranged descriptors
    #[param(usage = "n|[n,n]")]
    pub range: Option<DescriptorRange>,
}

impl DeriveAddressesCmd {
    pub fn new(descriptor: impl Into<String>, range: Option<DescriptorRange>) -> Self {
        Self {
            descriptor: descriptor.into(),
            range,
        }
    }
}

/// Returns information about manually added (persistent) peers.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getaddednodeinfo")]
pub struct GetAddedNodeInfoCmd {
    /// Specifies whether the returned data is a JSON object including DNS and connection information, or just a list of added peers
    pub dns: bool,
    /// Only return information about this specific peer instead of all added peers
    pub node: Option<String>,
}

impl GetAddedNodeInfoCmd {
    pub fn new(dns: bool, node: Option<String>) -> Self {
        Self { dns, node }
    }
}

/// Returns the hash of the block in the longest block chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getbestblockhash")]
pub struct GetBestBlockHashCmd;

/// Returns information about a block given its hash.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getblock")]
pub struct GetBlockCmd {
    /// The hash of the block
    pub hash: String,
    /// Specifies the block is returned as a hex string (0), a JSON object (1), or a JSON object with full transaction details (2)
    #[param(default = "1")]
    pub verbosity: Option<i32>,
}

impl GetBlockCmd {
    pub fn new(hash: impl Into<String>, verbosity: Option<i32>) -> Self {
        Self {
            hash: hash.into(),
            verbosity,
        }
    }
}

/// Returns information about the current state of the block chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getblockchaininfo")]
pub struct GetBlockChainInfoCmd;

/// Returns the number of blocks in the longest block chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getblockcount")]
pub struct GetBlockCountCmd;

/// Compact block filter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterTypeName {
    Basic,
}

/// Retrieves a compact block filter for the block with the given hash.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getblockfilter")]
pub struct GetBlockFilterCmd {
    /// The hash of the block
    pub block_hash: String,
    /// The type name of the filter
    pub filter_type: Option<FilterTypeName>,
}

impl GetBlockFilterCmd {
    pub fn new(block_hash: impl Into<String>, filter_type: Option<FilterTypeName>) -> Self {
        Self {
            block_hash: block_hash.into(),
            filter_type,
        }
    }
}

/// Returns hash of the block in best block chain at the given height.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getblockhash")]
pub struct GetBlockHashCmd {
    /// The block height
    pub index: i64,
}

impl GetBlockHashCmd {
    pub fn new(index: i64) -> Self {
        Self { index }
    }
}

/// Returns information about a block header given its hash.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getblockheader")]
pub struct GetBlockHeaderCmd {
    /// The hash of the block
    pub hash: String,
    /// Specifies the block header is returned as a JSON object instead of hex-encoded string
    #[param(default = "true")]
    pub verbose: Option<bool>,
}

impl GetBlockHeaderCmd {
    pub fn new(hash: impl Into<String>, verbose: Option<bool>) -> Self {
        Self {
            hash: hash.into(),
            verbose,
        }
    }
}

/// Returns statistics about a block given its hash or height.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getblockstats")]
pub struct GetBlockStatsCmd {
    /// The hash or height of the block
    #[param(usage = "hash|height")]
    pub hash_or_height: HashOrHeight,
    /// Selected statistics
    pub stats: Option<Vec<String>>,
}

impl GetBlockStatsCmd {
    pub fn new(hash_or_height: HashOrHeight, stats: Option<Vec<String>>) -> Self {
        Self {
            hash_or_height,
            stats,
        }
    }
}

/// Size or sigop limit of a block template request
///
/// Either a concrete limit or a boolean asking the server to use (or drop)
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateLimit {
    Int(i64),
    Bool(bool),
}

impl Serialize for TemplateLimit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TemplateLimit::Int(n) => serializer.serialize_i64(*n),
            TemplateLimit::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl TemplateLimit {
    fn from_value(value: Value, field: &str) -> std::result::Result<Option<Self>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(TemplateLimit::Bool(b))),
            Value::Number(n) => n
                .as_i64()
                .map(|n| Some(TemplateLimit::Int(n)))
                .ok_or_else(|| format!("{} must be a bool or int64", field)),
            other => Err(format!(
                "{} must be a bool or int64, got {}",
                field,
                json_kind(&other)
            )),
        }
    }
}

fn sigop_limit<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<TemplateLimit>, D::Error> {
    TemplateLimit::from_value(Value::deserialize(deserializer)?, "sigoplimit").map_err(de::Error::custom)
}

fn size_limit<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<TemplateLimit>, D::Error> {
    TemplateLimit::from_value(Value::deserialize(deserializer)?, "sizelimit").map_err(de::Error::custom)
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Request object of `getblocktemplate` (BIP 22 and BIP 23)
///
/// Empty fields are omitted from the wire form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mode: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,

    // Long polling
    #[serde(rename = "longpollid", skip_serializing_if = "Option::is_none")]
    pub long_poll_id: Option<String>,

    // Template tweaking
    #[serde(
        rename = "sigoplimit",
        default,
        deserialize_with = "sigop_limit",
        skip_serializing_if = "Option::is_none"
    )]
    pub sig_op_limit: Option<TemplateLimit>,
    #[serde(
        rename = "sizelimit",
        default,
        deserialize_with = "size_limit",
        skip_serializing_if = "Option::is_none"
    )]
    pub size_limit: Option<TemplateLimit>,
    #[serde(rename = "maxversion", default, skip_serializing_if = "is_zero")]
    pub max_version: u32,

    // Block proposal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "workid", skip_serializing_if = "Option::is_none")]
    pub work_id: Option<String>,

    // Soft forks the client understands
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
}

/// Returns a block template or proposal for miners.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getblocktemplate")]
pub struct GetBlockTemplateCmd {
    /// Request object which controls the mode and several parameters
    #[param(usage = "{\"mode\":\"value\",\"capabilities\":[\"capability\",...],...}")]
    pub request: Option<TemplateRequest>,
}

impl GetBlockTemplateCmd {
    pub fn new(request: Option<TemplateRequest>) -> Self {
        Self { request }
    }
}

/// Returns a committed filter given its block hash.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getcfilter")]
pub struct GetCFilterCmd {
    /// The hash of the block
    pub hash: String,
    /// The type of filter to return (0=regular)
    pub filter_type: u8,
}

impl GetCFilterCmd {
    pub fn new(hash: impl Into<String>, filter_type: u8) -> Self {
        Self {
            hash: hash.into(),
            filter_type,
        }
    }
}

/// Returns a filter header given its block hash.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getcfilterheader")]
pub struct GetCFilterHeaderCmd {
    /// The hash of the block
    pub hash: String,
    /// The type of filter header to return (0=regular)
    pub filter_type: u8,
}

impl GetCFilterHeaderCmd {
    pub fn new(hash: impl Into<String>, filter_type: u8) -> Self {
        Self {
            hash: hash.into(),
            filter_type,
        }
    }
}

/// Returns information about all known tips in the block tree.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getchaintips")]
pub struct GetChainTipsCmd;

/// Returns statistics about the total number and rate of transactions in the chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getchaintxstats")]
pub struct GetChainTxStatsCmd {
    /// Size of the window in number of blocks
    pub n_blocks: Option<i32>,
    /// The hash of the block that ends the window
    pub block_hash: Option<String>,
}

impl GetChainTxStatsCmd {
    pub fn new(n_blocks: Option<i32>, block_hash: Option<String>) -> Self {
        Self { n_blocks, block_hash }
    }
}

/// Returns the number of active connections to other peers.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getconnectioncount")]
pub struct GetConnectionCountCmd;

/// Analyses a descriptor.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getdescriptorinfo")]
pub struct GetDescriptorInfoCmd {
    /// The descriptor
    pub descriptor: String,
}

impl GetDescriptorInfoCmd {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
        }
    }
}

/// Returns the proof-of-work difficulty as a multiple of the minimum difficulty.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getdifficulty")]
pub struct GetDifficultyCmd;

/// Returns if the server is set to generate coins (mine) or not.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getgenerate")]
pub struct GetGenerateCmd;

/// Returns a recent hashes per second performance measurement while generating coins (mining).
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "gethashespersec")]
pub struct GetHashesPerSecCmd;

/// Returns a JSON object containing various state info.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getinfo")]
pub struct GetInfoCmd;

/// Returns mempool data for the given transaction.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getmempoolentry")]
pub struct GetMempoolEntryCmd {
    /// The hash of the transaction
    pub tx_id: String,
}

impl GetMempoolEntryCmd {
    pub fn new(tx_id: impl Into<String>) -> Self {
        Self { tx_id: tx_id.into() }
    }
}

/// Returns memory pool information.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getmempoolinfo")]
pub struct GetMempoolInfoCmd;

/// Returns a JSON object containing mining-related information.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getmininginfo")]
pub struct GetMiningInfoCmd;

/// Returns a JSON object containing network-related information.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getnetworkinfo")]
pub struct GetNetworkInfoCmd;

/// Returns a JSON object containing network traffic statistics.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getnettotals")]
pub struct GetNetTotalsCmd;

/// Returns the estimated network hashes per second for the block heights provided by the parameters.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getnetworkhashps")]
pub struct GetNetworkHashPsCmd {
    /// The number of blocks, or -1 for blocks since last difficulty change
    #[param(default = "120")]
    pub blocks: Option<i32>,
    /// Perform estimate ending with this height or -1 for current best chain block height
    #[param(default = "-1")]
    pub height: Option<i32>,
}

impl GetNetworkHashPsCmd {
    pub fn new(blocks: Option<i32>, height: Option<i32>) -> Self {
        Self { blocks, height }
    }
}

/// Returns addresses known to the node, for bootstrapping peers.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getnodeaddresses")]
pub struct GetNodeAddressesCmd {
    /// How many addresses to return
    #[param(default = "1")]
    pub count: Option<i32>,
}

impl GetNodeAddressesCmd {
    pub fn new(count: Option<i32>) -> Self {
        Self { count }
    }
}

/// Returns data about each connected network peer as an array of json objects.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getpeerinfo")]
pub struct GetPeerInfoCmd;

/// Returns information about all of the transactions currently in the memory pool.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getrawmempool")]
pub struct GetRawMempoolCmd {
    /// Returns JSON object when true or an array of transaction hashes when false
    #[param(default = "false")]
    pub verbose: Option<bool>,
}

impl GetRawMempoolCmd {
    pub fn new(verbose: Option<bool>) -> Self {
        Self { verbose }
    }
}

/// Returns information about a transaction given its hash.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getrawtransaction")]
pub struct GetRawTransactionCmd {
    /// The hash of the transaction
    pub txid: String,
    /// Specifies the transaction is returned as a JSON object instead of a hex-encoded string
    #[param(default = "0")]
    pub verbose: Option<i32>,
}

impl GetRawTransactionCmd {
    pub fn new(txid: impl Into<String>, verbose: Option<i32>) -> Self {
        Self {
            txid: txid.into(),
            verbose,
        }
    }
}

/// Returns information about an unspent transaction output.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "gettxout")]
pub struct GetTxOutCmd {
    /// The hash of the transaction
    pub txid: String,
    /// The index of the output
    pub vout: u32,
    /// Include the mempool when true
    #[param(default = "true")]
    pub include_mempool: Option<bool>,
}

impl GetTxOutCmd {
    pub fn new(txid: impl Into<String>, vout: u32, include_mempool: Option<bool>) -> Self {
        Self {
            txid: txid.into(),
            vout,
            include_mempool,
        }
    }
}

/// Returns a hex-encoded proof that the given transactions were included in a block.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "gettxoutproof")]
pub struct GetTxOutProofCmd {
    /// The transaction hashes to prove
    pub tx_ids: Vec<String>,
    /// Look for the transactions in this block
    pub block_hash: Option<String>,
}

impl GetTxOutProofCmd {
    pub fn new(tx_ids: Vec<String>, block_hash: Option<String>) -> Self {
        Self { tx_ids, block_hash }
    }
}

/// Returns statistics about the unspent transaction output set.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "gettxoutsetinfo")]
pub struct GetTxOutSetInfoCmd;

/// Returns formatted hash data to work on or checks and submits solved data.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getwork")]
pub struct GetWorkCmd {
    /// Hex-encoded data to check
    pub data: Option<String>,
}

impl GetWorkCmd {
    pub fn new(data: Option<String>) -> Self {
        Self { data }
    }
}

/// Returns a list of all commands or help for a specified command.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "help")]
pub struct HelpCmd {
    /// The command to retrieve help for
    pub command: Option<String>,
}

impl HelpCmd {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }
}

/// Permanently marks a block as invalid, as if it violated a consensus rule.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "invalidateblock")]
pub struct InvalidateBlockCmd {
    /// The hash of the block to invalidate
    pub block_hash: String,
}

impl InvalidateBlockCmd {
    pub fn new(block_hash: impl Into<String>) -> Self {
        Self {
            block_hash: block_hash.into(),
        }
    }
}

/// Queues a ping to be sent to each connected peer.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "ping")]
pub struct PingCmd;

/// Treats a block as if it were received before others with the same work.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "preciousblock")]
pub struct PreciousBlockCmd {
    /// The hash of the block to mark as precious
    pub block_hash: String,
}

impl PreciousBlockCmd {
    pub fn new(block_hash: impl Into<String>) -> Self {
        Self {
            block_hash: block_hash.into(),
        }
    }
}

/// Removes invalidity status of a block and its descendants, reconsidering them for activation.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "reconsiderblock")]
pub struct ReconsiderBlockCmd {
    /// The hash of the block to reconsider
    pub block_hash: String,
}

impl ReconsiderBlockCmd {
    pub fn new(block_hash: impl Into<String>) -> Self {
        Self {
            block_hash: block_hash.into(),
        }
    }
}

/// Returns raw data for transactions involving the passed address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "searchrawtransactions")]
pub struct SearchRawTransactionsCmd {
    /// The address to search for
    pub address: String,
    /// Specifies the transaction is returned as a JSON object instead of hex-encoded string
    #[param(default = "1")]
    pub verbose: Option<i32>,
    /// The number of leading transactions to leave out of the final response
    #[param(default = "0")]
    pub skip: Option<i32>,
    /// The maximum number of transactions to return
    #[param(default = "100")]
    pub count: Option<i32>,
    /// Specify that extra data from previous output will be returned in vin
    #[param(default = "0")]
    pub vin_extra: Option<i32>,
    /// Specifies that the transactions should be returned in reverse chronological order
    #[param(default = "false")]
    pub reverse: Option<bool>,
    /// Only include previous outputs involving these addresses in vin extra data
    pub filter_addrs: Option<Vec<String>>,
}

impl SearchRawTransactionsCmd {
    pub fn new(
        address: impl Into<String>,
        verbose: Option<i32>,
        skip: Option<i32>,
        count: Option<i32>,
        vin_extra: Option<i32>,
        reverse: Option<bool>,
        filter_addrs: Option<Vec<String>>,
    ) -> Self {
        Self {
            address: address.into(),
            verbose,
            skip,
            count,
            vin_extra,
            reverse,
            filter_addrs,
        }
    }
}

/// Submits the serialized, hex-encoded transaction to the local peer and relays it to the network.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "sendrawtransaction")]
pub struct SendRawTransactionCmd {
    /// Serialized, hex-encoded signed transaction
    pub hex_tx: String,
    /// Allow high fees (legacy servers) or the maximum fee rate (newer servers)
    #[param(default = "false", usage = "allowhighfees|maxfeerate")]
    pub fee_setting: Option<AllowHighFeesOrMaxFeeRate>,
}

impl SendRawTransactionCmd {
    /// Legacy form, carrying the boolean "allow high fees" flag
    ///
    /// A missing flag is sent as `false`.
    pub fn new(hex_tx: impl Into<String>, allow_high_fees: Option<bool>) -> Self {
        Self {
            hex_tx: hex_tx.into(),
            fee_setting: Some(AllowHighFeesOrMaxFeeRate::AllowHighFees(
                allow_high_fees.unwrap_or(false),
            )),
        }
    }

    /// Form for servers that take a maximum fee rate instead
    pub fn with_max_fee_rate(hex_tx: impl Into<String>, max_fee_rate: i32) -> Self {
        Self {
            hex_tx: hex_tx.into(),
            fee_setting: Some(AllowHighFeesOrMaxFeeRate::MaxFeeRate(max_fee_rate)),
        }
    }
}

/// Set the server to generate coins (mine) or not.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "setgenerate")]
pub struct SetGenerateCmd {
    /// Use true to enable generation, false to disable it
    pub generate: bool,
    /// The number of processors (cores) to limit generation to or -1 for default
    #[param(default = "-1")]
    pub gen_proc_limit: Option<i32>,
}

impl SetGenerateCmd {
    pub fn new(generate: bool, gen_proc_limit: Option<i32>) -> Self {
        Self {
            generate,
            gen_proc_limit,
        }
    }
}

/// Sign a message with the private key of an address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "signmessagewithprivkey")]
pub struct SignMessageWithPrivKeyCmd {
    /// The private key to sign the message with
    pub priv_key: String,
    /// The message to create a signature of
    pub message: String,
}

impl SignMessageWithPrivKeyCmd {
    pub fn new(priv_key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            priv_key: priv_key.into(),
            message: message.into(),
        }
    }
}

/// Shutdown the server.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "stop")]
pub struct StopCmd;

/// Options object of `submitblock`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBlockOptions {
    /// Must be provided if the server provided a work id with the template
    #[serde(rename = "workid", default, skip_serializing_if = "String::is_empty")]
    pub work_id: String,
}

/// Attempts to submit a new serialized, hex-encoded block to the network.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "submitblock")]
pub struct SubmitBlockCmd {
    /// Serialized, hex-encoded block
    pub hex_block: String,
    /// Optional object with the work id
    #[param(usage = "{\"workid\":\"value\"}")]
    pub options: Option<SubmitBlockOptions>,
}

impl SubmitBlockCmd {
    pub fn new(hex_block: impl Into<String>, options: Option<SubmitBlockOptions>) -> Self {
        Self {
            hex_block: hex_block.into(),
            options,
        }
    }
}

/// Returns the total uptime of the server in seconds.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "uptime")]
pub struct UptimeCmd;

/// Verify an address is valid.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "validateaddress")]
pub struct ValidateAddressCmd {
    /// Bitcoin address to validate
    pub address: String,
}

impl ValidateAddressCmd {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Verifies the block chain database.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "verifychain")]
pub struct VerifyChainCmd {
    /// How thorough the block verification is
    #[param(default = "3")]
    pub check_level: Option<i32>,
    /// The number of blocks to check
    #[param(default = "288")]
    pub check_depth: Option<i32>,
}

impl VerifyChainCmd {
    pub fn new(check_level: Option<i32>, check_depth: Option<i32>) -> Self {
        Self {
            check_level,
            check_depth,
        }
    }
}

/// Verify a signed message.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "verifymessage")]
pub struct VerifyMessageCmd {
    /// The bitcoin address to use for the signature
    pub address: String,
    /// The base-64 encoded signature provided by the signer
    pub signature: String,
    /// The signed message
    pub message: String,
}

impl VerifyMessageCmd {
    pub fn new(
        address: impl Into<String>,
        signature: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            signature: signature.into(),
            message: message.into(),
        }
    }
}

/// Verifies that a proof points to a transaction in a block.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "verifytxoutproof")]
pub struct VerifyTxOutProofCmd {
    /// The hex-encoded proof generated by gettxoutproof
    pub proof: String,
}

impl VerifyTxOutProofCmd {
    pub fn new(proof: impl Into<String>) -> Self {
        Self { proof: proof.into() }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder> {
    builder
        .register::<AddNodeCmd>()?
        .register::<CreateRawTransactionCmd>()?
        .register::<DecodeRawTransactionCmd>()?
        .register::<DecodeScriptCmd>()?
        .register::<DeriveAddressesCmd>()?
        .register::<FundRawTransactionCmd>()?
        .register::<GetAddedNodeInfoCmd>()?
        .register::<GetBestBlockHashCmd>()?
        .register::<GetBlockCmd>()?
        .register::<GetBlockChainInfoCmd>()?
        .register::<GetBlockCountCmd>()?
        .register::<GetBlockFilterCmd>()?
        .register::<GetBlockHashCmd>()?
        .register::<GetBlockHeaderCmd>()?
        .register::<GetBlockStatsCmd>()?
        .register::<GetBlockTemplateCmd>()?
        .register::<GetCFilterCmd>()?
        .register::<GetCFilterHeaderCmd>()?
        .register::<GetChainTipsCmd>()?
        .register::<GetChainTxStatsCmd>()?
        .register::<GetConnectionCountCmd>()?
        .register::<GetDescriptorInfoCmd>()?
        .register::<GetDifficultyCmd>()?
        .register::<GetGenerateCmd>()?
        .register::<GetHashesPerSecCmd>()?
        .register::<GetInfoCmd>()?
        .register::<GetMempoolEntryCmd>()?
        .register::<GetMempoolInfoCmd>()?
        .register::<GetMiningInfoCmd>()?
        .register::<GetNetworkInfoCmd>()?
        .register::<GetNetTotalsCmd>()?
        .register::<GetNetworkHashPsCmd>()?
        .register::<GetNodeAddressesCmd>()?
        .register::<GetPeerInfoCmd>()?
        .register::<GetRawMempoolCmd>()?
        .register::<GetRawTransactionCmd>()?
        .register::<GetTxOutCmd>()?
        .register::<GetTxOutProofCmd>()?
        .register::<GetTxOutSetInfoCmd>()?
        .register::<GetWorkCmd>()?
        .register::<HelpCmd>()?
        .register::<InvalidateBlockCmd>()?
        .register::<PingCmd>()?
        .register::<PreciousBlockCmd>()?
        .register::<ReconsiderBlockCmd>()?
        .register::<SearchRawTransactionsCmd>()?
        .register::<SendRawTransactionCmd>()?
        .register::<SetGenerateCmd>()?
        .register::<SignMessageWithPrivKeyCmd>()?
        .register::<StopCmd>()?
        .register::<SubmitBlockCmd>()?
        .register::<UptimeCmd>()?
        .register::<ValidateAddressCmd>()?
        .register::<VerifyChainCmd>()?
        .register::<VerifyMessageCmd>()?
        .register::<VerifyTxOutProofCmd>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_request_omits_empty_fields() {
        let request = TemplateRequest {
            mode: "template".into(),
            capabilities: vec!["longpoll".into(), "coinbasetxn".into()],
            sig_op_limit: Some(TemplateLimit::Bool(true)),
            size_limit: Some(TemplateLimit::Int(100_000_000)),
            max_version: 2,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"mode":"template","capabilities":["longpoll","coinbasetxn"],"sigoplimit":true,"sizelimit":100000000,"maxversion":2}"#
        );
    }

    #[test]
    fn test_template_request_decode_errors() {
        let err = serde_json::from_str::<TemplateRequest>(r#"{"mode":1}"#);
        assert!(err.is_err());

        let err = serde_json::from_str::<TemplateRequest>(r#"{"sigoplimit":"invalid"}"#).unwrap_err();
        assert!(err.to_string().contains("sigoplimit must be a bool or int64"));

        let err = serde_json::from_str::<TemplateRequest>(r#"{"sizelimit":"invalid"}"#).unwrap_err();
        assert!(err.to_string().contains("sizelimit must be a bool or int64"));
    }

    #[test]
    fn test_template_request_limits_decode() {
        let request: TemplateRequest =
            serde_json::from_value(json!({"sigoplimit": 500, "sizelimit": false})).unwrap();
        assert_eq!(request.sig_op_limit, Some(TemplateLimit::Int(500)));
        assert_eq!(request.size_limit, Some(TemplateLimit::Bool(false)));
        assert_eq!(request.max_version, 0);
    }

    #[test]
    fn test_fund_options_key_spelling() {
        let opts = FundRawTransactionOpts {
            change_type: Some(ChangeType::P2shSegwit),
            conf_target: Some(8),
            estimate_mode: Some(EstimateSmartFeeMode::Economical),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({"change_type": "p2sh-segwit", "conf_target": 8, "estimate_mode": "ECONOMICAL"})
        );
        assert_eq!(serde_json::to_string(&FundRawTransactionOpts::default()).unwrap(), "{}");
    }

    #[test]
    fn test_fund_raw_transaction_hex_encodes() {
        let cmd = FundRawTransactionCmd::new(&[0xde, 0xad, 0xbe, 0xef], Default::default(), None);
        assert_eq!(cmd.hex_tx, "deadbeef");
    }

    #[test]
    fn test_send_raw_transaction_constructors() {
        assert_eq!(
            SendRawTransactionCmd::new("1122", None).fee_setting,
            Some(AllowHighFeesOrMaxFeeRate::AllowHighFees(false))
        );
        assert_eq!(
            SendRawTransactionCmd::with_max_fee_rate("1122", 1234).fee_setting,
            Some(AllowHighFeesOrMaxFeeRate::MaxFeeRate(1234))
        );
    }
}
