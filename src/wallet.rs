//! Wallet server commands
//!
//! Every method here is served by the wallet process and is registered with
//! the wallet-only flag. Amounts are in BTC unless a field says otherwise.

use std::collections::BTreeMap;

use pinjson_core::unions::json_kind;
use pinjson_core::{DescriptorRange, RegistryBuilder, Result, ScriptPubKey, TimestampOrNow};
use pinjson_macros::Command;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chainsvr::{ChangeType, EstimateSmartFeeMode, TransactionInput};

const SATOSHI_PER_BTC: f64 = 100_000_000.0;

/// Add a multisignature address to the wallet.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "addmultisigaddress", wallet_only)]
pub struct AddMultisigAddressCmd {
    /// The number of signatures required
    pub n_required: i32,
    /// Keys and addresses that make up the multisig address
    pub keys: Vec<String>,
    /// DEPRECATED: Unused (the account name is always 'imported')
    pub account: Option<String>,
}

impl AddMultisigAddressCmd {
    pub fn new(n_required: i32, keys: Vec<String>, account: Option<String>) -> Self {
        Self {
            n_required,
            keys,
            account,
        }
    }
}

/// Add a witness address for a script and return the new address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "addwitnessaddress", wallet_only)]
pub struct AddWitnessAddressCmd {
    /// Address of a known script
    pub address: String,
}

impl AddWitnessAddressCmd {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Safely copies the wallet file to the destination.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "backupwallet", wallet_only)]
pub struct BackupWalletCmd {
    /// The destination directory or file
    pub destination: String,
}

impl BackupWalletCmd {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

/// Generate a multisignature address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "createmultisig", wallet_only)]
pub struct CreateMultisigCmd {
    /// The number of signatures required
    pub n_required: i32,
    /// Keys and addresses that make up the multisig address
    pub keys: Vec<String>,
}

impl CreateMultisigCmd {
    pub fn new(n_required: i32, keys: Vec<String>) -> Self {
        Self { n_required, keys }
    }
}

/// Creates and loads a new wallet.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "createwallet", wallet_only)]
pub struct CreateWalletCmd {
    /// The name for the new wallet
    pub wallet_name: String,
    /// Disable the possibility of private keys
    #[param(default = "false")]
    pub disable_private_keys: Option<bool>,
    /// Create a blank wallet with no keys or HD seed
    #[param(default = "false")]
    pub blank: Option<bool>,
    /// Encrypt the wallet with this passphrase
    #[param(default = r#""""#)]
    pub passphrase: Option<String>,
    /// Keep track of coin reuse, and treat dirty and clean coins differently with privacy considerations in mind
    #[param(default = "false")]
    pub avoid_reuse: Option<bool>,
}

impl CreateWalletCmd {
    pub fn new(
        wallet_name: impl Into<String>,
        disable_private_keys: Option<bool>,
        blank: Option<bool>,
        passphrase: Option<String>,
        avoid_reuse: Option<bool>,
    ) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            disable_private_keys,
            blank,
            passphrase,
            avoid_reuse,
        }
    }
}

/// Returns the private key in WIF encoding that controls the provided address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "dumpprivkey", wallet_only)]
pub struct DumpPrivKeyCmd {
    /// The address to return a private key for
    pub address: String,
}

impl DumpPrivKeyCmd {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Encrypts the wallet with the given passphrase.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "encryptwallet", wallet_only)]
pub struct EncryptWalletCmd {
    /// The passphrase to encrypt the wallet with
    pub passphrase: String,
}

impl EncryptWalletCmd {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }
}

/// Estimates the fee per kilobyte needed for a transaction to begin confirmation within the given number of blocks.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "estimatefee", wallet_only)]
pub struct EstimateFeeCmd {
    /// Max number of blocks for a transaction to be confirmed
    pub num_blocks: i64,
}

impl EstimateFeeCmd {
    pub fn new(num_blocks: i64) -> Self {
        Self { num_blocks }
    }
}

/// Estimates the fee rate needed for a transaction to begin confirmation within the given number of blocks.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "estimatesmartfee", wallet_only)]
pub struct EstimateSmartFeeCmd {
    /// Confirmation target in blocks
    pub conf_target: i64,
    /// The fee estimate mode: UNSET, ECONOMICAL or CONSERVATIVE
    #[param(default = r#""CONSERVATIVE""#)]
    pub estimate_mode: Option<EstimateSmartFeeMode>,
}

impl EstimateSmartFeeCmd {
    pub fn new(conf_target: i64, estimate_mode: Option<EstimateSmartFeeMode>) -> Self {
        Self {
            conf_target,
            estimate_mode,
        }
    }
}

/// Estimates the priority a transaction needs to begin confirmation within the given number of blocks.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "estimatepriority", wallet_only)]
pub struct EstimatePriorityCmd {
    /// Max number of blocks for a transaction to be confirmed
    pub num_blocks: i64,
}

impl EstimatePriorityCmd {
    pub fn new(num_blocks: i64) -> Self {
        Self { num_blocks }
    }
}

/// DEPRECATED -- Lookup the account name that some wallet address belongs to.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getaccount", wallet_only)]
pub struct GetAccountCmd {
    /// The address to query the account for
    pub address: String,
}

impl GetAccountCmd {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// DEPRECATED -- Returns the most recent external payment address for an account that has not been seen publicly.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getaccountaddress", wallet_only)]
pub struct GetAccountAddressCmd {
    /// The account of the returned address
    pub account: String,
}

impl GetAccountAddressCmd {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

/// DEPRECATED -- Returns the list of addresses for the given account.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getaddressesbyaccount", wallet_only)]
pub struct GetAddressesByAccountCmd {
    /// The account name to fetch addresses for
    pub account: String,
}

impl GetAddressesByAccountCmd {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

/// Generates and returns information about the given address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getaddressinfo", wallet_only)]
pub struct GetAddressInfoCmd {
    /// The address to get the information of
    pub address: String,
}

impl GetAddressInfoCmd {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Calculates and returns the balance of one or all accounts.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getbalance", wallet_only)]
pub struct GetBalanceCmd {
    /// DEPRECATED -- The account name to query the balance for, or "*" to consider all accounts
    pub account: Option<String>,
    /// Minimum number of block confirmations required before an unspent output's value is included in the balance
    #[param(default = "1")]
    pub min_conf: Option<i32>,
}

impl GetBalanceCmd {
    pub fn new(account: Option<String>, min_conf: Option<i32>) -> Self {
        Self { account, min_conf }
    }
}

/// Returns a JSON object with all balances in BTC.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getbalances", wallet_only)]
pub struct GetBalancesCmd;

/// Generates and returns a new payment address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getnewaddress", wallet_only)]
pub struct GetNewAddressCmd {
    /// DEPRECATED -- Account name the new address will belong to
    pub account: Option<String>,
}

impl GetNewAddressCmd {
    pub fn new(account: Option<String>) -> Self {
        Self { account }
    }
}

/// Generates and returns a new internal payment address for use as a change address in raw transactions.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getrawchangeaddress", wallet_only)]
pub struct GetRawChangeAddressCmd {
    /// Account name for the new internal address
    pub account: Option<String>,
}

impl GetRawChangeAddressCmd {
    pub fn new(account: Option<String>) -> Self {
        Self { account }
    }
}

/// DEPRECATED -- Returns the total amount received by addresses of some account.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getreceivedbyaccount", wallet_only)]
pub struct GetReceivedByAccountCmd {
    /// Account name to query total received amount for
    pub account: String,
    /// Minimum number of block confirmations required before an output's value is included in the total
    #[param(default = "1")]
    pub min_conf: Option<i32>,
}

impl GetReceivedByAccountCmd {
    pub fn new(account: impl Into<String>, min_conf: Option<i32>) -> Self {
        Self {
            account: account.into(),
            min_conf,
        }
    }
}

/// Returns the total amount received by a single address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getreceivedbyaddress", wallet_only)]
pub struct GetReceivedByAddressCmd {
    /// Payment address which received outputs to include in total
    pub address: String,
    /// Minimum number of block confirmations required before an output's value is included in the total
    #[param(default = "1")]
    pub min_conf: Option<i32>,
}

impl GetReceivedByAddressCmd {
    pub fn new(address: impl Into<String>, min_conf: Option<i32>) -> Self {
        Self {
            address: address.into(),
            min_conf,
        }
    }
}

/// Returns a JSON object with details regarding a transaction relevant to this wallet.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "gettransaction", wallet_only)]
pub struct GetTransactionCmd {
    /// Hash of the transaction to query
    pub txid: String,
    /// Also consider transactions involving watched addresses
    #[param(default = "false")]
    pub include_watch_only: Option<bool>,
}

impl GetTransactionCmd {
    pub fn new(txid: impl Into<String>, include_watch_only: Option<bool>) -> Self {
        Self {
            txid: txid.into(),
            include_watch_only,
        }
    }
}

/// Returns global information about the wallet.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getwalletinfo", wallet_only)]
pub struct GetWalletInfoCmd;

/// One entry of an `importmulti` request
///
/// Either `desc` or `scriptPubKey` identifies what to import. Absent keys
/// are omitted from the wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportMultiRequest {
    #[serde(rename = "desc", skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    #[serde(rename = "scriptPubKey", skip_serializing_if = "Option::is_none")]
    pub script_pub_key: Option<ScriptPubKey>,
    /// Creation time of the key, or `now` to skip scanning history
    pub timestamp: TimestampOrNow,
    #[serde(rename = "redeemscript", skip_serializing_if = "Option::is_none")]
    pub redeem_script: Option<String>,
    #[serde(rename = "witnessscript", skip_serializing_if = "Option::is_none")]
    pub witness_script: Option<String>,
    #[serde(rename = "pubkeys", skip_serializing_if = "Option::is_none")]
    pub pub_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    /// Range of a ranged descriptor to import
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DescriptorRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
    #[serde(rename = "watchonly", skip_serializing_if = "Option::is_none")]
    pub watch_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "keypool", skip_serializing_if = "Option::is_none")]
    pub key_pool: Option<bool>,
}

impl ImportMultiRequest {
    /// Import by output descriptor
    pub fn with_descriptor(descriptor: impl Into<String>, timestamp: TimestampOrNow) -> Self {
        Self {
            descriptor: Some(descriptor.into()),
            ..Self::bare(timestamp)
        }
    }

    /// Import by script or address
    pub fn with_script_pub_key(script_pub_key: ScriptPubKey, timestamp: TimestampOrNow) -> Self {
        Self {
            script_pub_key: Some(script_pub_key),
            ..Self::bare(timestamp)
        }
    }

    fn bare(timestamp: TimestampOrNow) -> Self {
        Self {
            descriptor: None,
            script_pub_key: None,
            timestamp,
            redeem_script: None,
            witness_script: None,
            pub_keys: None,
            keys: None,
            range: None,
            internal: None,
            watch_only: None,
            label: None,
            key_pool: None,
        }
    }
}

/// Options of an `importmulti` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMultiOptions {
    /// Rescan the chain after all imports
    pub rescan: bool,
}

/// Import addresses or scripts, with private or public keys, in one call.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "importmulti", wallet_only)]
pub struct ImportMultiCmd {
    /// Data to be imported
    #[param(usage = "[{\"desc\":\"descriptor\",\"timestamp\":n|\"now\",...},...]")]
    pub requests: Vec<ImportMultiRequest>,
    /// Import options
    #[param(usage = "{\"rescan\":bool}")]
    pub options: Option<ImportMultiOptions>,
}

impl ImportMultiCmd {
    pub fn new(requests: Vec<ImportMultiRequest>, options: Option<ImportMultiOptions>) -> Self {
        Self { requests, options }
    }
}

/// Adds a private key (as returned by dumpprivkey) to the wallet.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "importprivkey", wallet_only)]
pub struct ImportPrivKeyCmd {
    /// The WIF-encoded private key
    pub priv_key: String,
    /// Unused (must be unset or 'imported')
    pub label: Option<String>,
    /// Rescan the blockchain (slow) if true
    #[param(default = "true")]
    pub rescan: Option<bool>,
}

impl ImportPrivKeyCmd {
    pub fn new(priv_key: impl Into<String>, label: Option<String>, rescan: Option<bool>) -> Self {
        Self {
            priv_key: priv_key.into(),
            label,
            rescan,
        }
    }
}

/// Fills the key pool as necessary to reach the target size.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "keypoolrefill", wallet_only)]
pub struct KeyPoolRefillCmd {
    /// The minimum number of keys to keep in the key pool
    #[param(default = "100")]
    pub new_size: Option<u32>,
}

impl KeyPoolRefillCmd {
    pub fn new(new_size: Option<u32>) -> Self {
        Self { new_size }
    }
}

/// DEPRECATED -- Returns a JSON object of all accounts and their balances.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listaccounts", wallet_only)]
pub struct ListAccountsCmd {
    /// Minimum number of block confirmations required before an unspent output's value is included in the balance
    #[param(default = "1")]
    pub min_conf: Option<i32>,
}

impl ListAccountsCmd {
    pub fn new(min_conf: Option<i32>) -> Self {
        Self { min_conf }
    }
}

/// Returns a JSON array of groups of addresses which share common ownership.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listaddressgroupings", wallet_only)]
pub struct ListAddressGroupingsCmd;

/// Returns a JSON array of outpoints marked as locked (with lockunspent) for this wallet session.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listlockunspent", wallet_only)]
pub struct ListLockUnspentCmd;

/// DEPRECATED -- Returns a JSON array of objects listing all accounts and the total amount received by each account.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listreceivedbyaccount", wallet_only)]
pub struct ListReceivedByAccountCmd {
    /// Minimum number of block confirmations required before a transaction is considered
    #[param(default = "1")]
    pub min_conf: Option<i32>,
    /// Unused
    #[param(default = "false")]
    pub include_empty: Option<bool>,
    /// Unused
    #[param(default = "false")]
    pub include_watch_only: Option<bool>,
}

impl ListReceivedByAccountCmd {
    pub fn new(min_conf: Option<i32>, include_empty: Option<bool>, include_watch_only: Option<bool>) -> Self {
        Self {
            min_conf,
            include_empty,
            include_watch_only,
        }
    }
}

/// Returns a JSON array of objects listing wallet payment addresses and their total received amounts.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listreceivedbyaddress", wallet_only)]
pub struct ListReceivedByAddressCmd {
    /// Minimum number of block confirmations required before a transaction is considered
    #[param(default = "1")]
    pub min_conf: Option<i32>,
    /// Include addresses with no received funds
    #[param(default = "false")]
    pub include_empty: Option<bool>,
    /// Unused
    #[param(default = "false")]
    pub include_watch_only: Option<bool>,
}

impl ListReceivedByAddressCmd {
    pub fn new(min_conf: Option<i32>, include_empty: Option<bool>, include_watch_only: Option<bool>) -> Self {
        Self {
            min_conf,
            include_empty,
            include_watch_only,
        }
    }
}

/// Returns a JSON array of objects listing details of all wallet transactions after some block.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listsinceblock", wallet_only)]
pub struct ListSinceBlockCmd {
    /// Hash of the parent block of the first block to consider transactions from, or unset to list all transactions
    pub block_hash: Option<String>,
    /// Minimum number of block confirmations of the last block in the result object
    #[param(default = "1")]
    pub target_confirmations: Option<i32>,
    /// Unused
    #[param(default = "false")]
    pub include_watch_only: Option<bool>,
}

impl ListSinceBlockCmd {
    pub fn new(
        block_hash: Option<String>,
        target_confirmations: Option<i32>,
        include_watch_only: Option<bool>,
    ) -> Self {
        Self {
            block_hash,
            target_confirmations,
            include_watch_only,
        }
    }
}

/// Returns a JSON array of objects containing verbose details for wallet transactions.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listtransactions", wallet_only)]
pub struct ListTransactionsCmd {
    /// DEPRECATED -- Unused (must be unset or "*")
    pub account: Option<String>,
    /// Maximum number of transactions to create results from
    #[param(default = "10")]
    pub count: Option<i32>,
    /// Number of transactions to skip before results are created
    #[param(default = "0")]
    pub from: Option<i32>,
    /// Unused
    #[param(default = "false")]
    pub include_watch_only: Option<bool>,
}

impl ListTransactionsCmd {
    pub fn new(
        account: Option<String>,
        count: Option<i32>,
        from: Option<i32>,
        include_watch_only: Option<bool>,
    ) -> Self {
        Self {
            account,
            count,
            from,
            include_watch_only,
        }
    }
}

/// Returns a JSON array of objects representing unlocked unspent outputs controlled by wallet keys.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listunspent", wallet_only)]
pub struct ListUnspentCmd {
    /// Minimum number of block confirmations required before a transaction output is considered
    #[param(default = "1")]
    pub min_conf: Option<i32>,
    /// Maximum number of block confirmations required before a transaction output is excluded
    #[param(default = "9999999")]
    pub max_conf: Option<i32>,
    /// If set, limits the returned details to unspent outputs received by any of these payment addresses
    pub addresses: Option<Vec<String>>,
}

impl ListUnspentCmd {
    pub fn new(min_conf: Option<i32>, max_conf: Option<i32>, addresses: Option<Vec<String>>) -> Self {
        Self {
            min_conf,
            max_conf,
            addresses,
        }
    }
}

/// Loads a wallet from a wallet file or directory.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "loadwallet", wallet_only)]
pub struct LoadWalletCmd {
    /// The wallet directory or .dat file
    pub wallet_name: String,
}

impl LoadWalletCmd {
    pub fn new(wallet_name: impl Into<String>) -> Self {
        Self {
            wallet_name: wallet_name.into(),
        }
    }
}

/// Locks or unlocks an unspent output.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "lockunspent", wallet_only)]
pub struct LockUnspentCmd {
    /// True to unlock outputs, false to lock
    pub unlock: bool,
    /// Outputs to lock or unlock
    #[param(usage = "[{\"txid\":\"value\",\"vout\":n},...]")]
    pub transactions: Vec<TransactionInput>,
}

impl LockUnspentCmd {
    pub fn new(unlock: bool, transactions: Vec<TransactionInput>) -> Self {
        Self { unlock, transactions }
    }
}

/// DEPRECATED -- Move an amount from one account to another.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "move", wallet_only)]
pub struct MoveCmd {
    /// Account to move funds from
    pub from_account: String,
    /// Account to move funds to
    pub to_account: String,
    /// Amount to move in BTC
    pub amount: f64,
    /// Unused
    #[param(default = "1")]
    pub min_conf: Option<i32>,
    /// Unused
    pub comment: Option<String>,
}

impl MoveCmd {
    pub fn new(
        from_account: impl Into<String>,
        to_account: impl Into<String>,
        amount: f64,
        min_conf: Option<i32>,
        comment: Option<String>,
    ) -> Self {
        Self {
            from_account: from_account.into(),
            to_account: to_account.into(),
            amount,
            min_conf,
            comment,
        }
    }
}

/// DEPRECATED -- Authors, signs, and sends a transaction that outputs some amount to a payment address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "sendfrom", wallet_only)]
pub struct SendFromCmd {
    /// Account to pick unspent outputs from
    pub from_account: String,
    /// Address to pay
    pub to_address: String,
    /// Amount to send to the payment address valued in BTC
    pub amount: f64,
    /// Minimum number of block confirmations required before a transaction output is eligible to be spent
    #[param(default = "1")]
    pub min_conf: Option<i32>,
    /// Unused
    pub comment: Option<String>,
    /// Unused
    pub comment_to: Option<String>,
}

impl SendFromCmd {
    pub fn new(
        from_account: impl Into<String>,
        to_address: impl Into<String>,
        amount: f64,
        min_conf: Option<i32>,
        comment: Option<String>,
        comment_to: Option<String>,
    ) -> Self {
        Self {
            from_account: from_account.into(),
            to_address: to_address.into(),
            amount,
            min_conf,
            comment,
            comment_to,
        }
    }
}

/// Authors, signs, and sends a transaction that outputs to many payment addresses.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "sendmany", wallet_only)]
pub struct SendManyCmd {
    /// DEPRECATED -- Account to pick unspent outputs from
    pub from_account: String,
    /// Pairs of payment addresses and the output amount to pay each
    #[param(usage = "{\"address\":amount,...}")]
    pub amounts: BTreeMap<String, f64>,
    /// Minimum number of block confirmations required before a transaction output is eligible to be spent
    #[param(default = "1")]
    pub min_conf: Option<i32>,
    /// Unused
    pub comment: Option<String>,
}

impl SendManyCmd {
    pub fn new(
        from_account: impl Into<String>,
        amounts: BTreeMap<String, f64>,
        min_conf: Option<i32>,
        comment: Option<String>,
    ) -> Self {
        Self {
            from_account: from_account.into(),
            amounts,
            min_conf,
            comment,
        }
    }
}

/// Authors, signs, and sends a transaction that outputs some amount to a payment address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "sendtoaddress", wallet_only)]
pub struct SendToAddressCmd {
    /// Address to pay
    pub address: String,
    /// Amount to send to the payment address valued in BTC
    pub amount: f64,
    /// Unused
    pub comment: Option<String>,
    /// Unused
    pub comment_to: Option<String>,
}

impl SendToAddressCmd {
    pub fn new(
        address: impl Into<String>,
        amount: f64,
        comment: Option<String>,
        comment_to: Option<String>,
    ) -> Self {
        Self {
            address: address.into(),
            amount,
            comment,
            comment_to,
        }
    }
}

/// Sets the account associated with the given address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "setaccount", wallet_only)]
pub struct SetAccountCmd {
    /// The bitcoin address to associate with the account
    pub address: String,
    /// The account to assign the address to
    pub account: String,
}

impl SetAccountCmd {
    pub fn new(address: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            account: account.into(),
        }
    }
}

/// Modify the increment used each time more fee is required for an authored transaction.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "settxfee", wallet_only)]
pub struct SetTxFeeCmd {
    /// The new fee increment valued in BTC per kilobyte
    pub amount: f64,
}

impl SetTxFeeCmd {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

/// Signs a message using the private key of a payment address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "signmessage", wallet_only)]
pub struct SignMessageCmd {
    /// Payment address of private key used to sign the message with
    pub address: String,
    /// Message to sign
    pub message: String,
}

impl SignMessageCmd {
    pub fn new(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            message: message.into(),
        }
    }
}

/// Previous output of an input to sign, for `signrawtransaction`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTxInput {
    pub txid: String,
    pub vout: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    #[serde(rename = "redeemScript")]
    pub redeem_script: String,
}

/// Previous output of an input to sign, for `signrawtransactionwithwallet`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTxWitnessInput {
    pub txid: String,
    pub vout: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    #[serde(rename = "redeemScript", skip_serializing_if = "Option::is_none")]
    pub redeem_script: Option<String>,
    #[serde(rename = "witnessScript", skip_serializing_if = "Option::is_none")]
    pub witness_script: Option<String>,
    /// Amount of the previous output in BTC; required for segwit inputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Signs transaction inputs using private keys from this wallet and request.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "signrawtransaction", wallet_only)]
pub struct SignRawTransactionCmd {
    /// Unsigned or partially unsigned transaction to sign encoded as a hexadecimal string
    pub raw_tx: String,
    /// Additional data regarding inputs that this wallet may not be tracking
    #[param(usage = "[{\"txid\":\"value\",\"vout\":n,\"scriptPubKey\":\"value\",\"redeemScript\":\"value\"},...]")]
    pub inputs: Option<Vec<RawTxInput>>,
    /// Additional WIF-encoded private keys to use during signing
    pub priv_keys: Option<Vec<String>>,
    /// The hash type to use for all signatures
    #[param(default = r#""ALL""#)]
    pub flags: Option<String>,
}

impl SignRawTransactionCmd {
    pub fn new(
        raw_tx: impl Into<String>,
        inputs: Option<Vec<RawTxInput>>,
        priv_keys: Option<Vec<String>>,
        flags: Option<String>,
    ) -> Self {
        Self {
            raw_tx: raw_tx.into(),
            inputs,
            priv_keys,
            flags,
        }
    }
}

/// Signs transaction inputs using private keys from this wallet.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "signrawtransactionwithwallet", wallet_only)]
pub struct SignRawTransactionWithWalletCmd {
    /// Unsigned or partially unsigned transaction to sign encoded as a hexadecimal string
    pub raw_tx: String,
    /// Additional data regarding inputs that this wallet may not be tracking
    #[param(usage = "[{\"txid\":\"value\",\"vout\":n,\"scriptPubKey\":\"value\",...},...]")]
    pub inputs: Option<Vec<RawTxWitnessInput>>,
    /// The hash type to use for all signatures
    #[param(default = r#""ALL""#)]
    pub sig_hash_type: Option<String>,
}

impl SignRawTransactionWithWalletCmd {
    pub fn new(
        raw_tx: impl Into<String>,
        inputs: Option<Vec<RawTxWitnessInput>>,
        sig_hash_type: Option<String>,
    ) -> Self {
        Self {
            raw_tx: raw_tx.into(),
            inputs,
            sig_hash_type,
        }
    }
}

/// Unloads the wallet referenced by the wallet name, or the one in use.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "unloadwallet", wallet_only)]
pub struct UnloadWalletCmd {
    /// The name of the wallet to unload
    pub wallet_name: Option<String>,
}

impl UnloadWalletCmd {
    pub fn new(wallet_name: Option<String>) -> Self {
        Self { wallet_name }
    }
}

/// Input of a PSBT to create
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PsbtInput {
    pub txid: String,
    pub vout: u32,
    pub sequence: u32,
}

/// Output of a PSBT to create
///
/// On the wire this is a one-key object: either `{"address": amount}` with
/// the amount in BTC, or `{"data": "hex"}` for a null-data output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PsbtOutput {
    /// Payment to an address, in satoshi
    Address { address: String, amount: i64 },
    /// Null-data output carrying raw bytes
    Data(Vec<u8>),
}

impl PsbtOutput {
    /// Payment of `amount` satoshi to `address`
    pub fn address(address: impl Into<String>, amount: i64) -> Self {
        PsbtOutput::Address {
            address: address.into(),
            amount,
        }
    }

    /// Null-data output carrying `data`, sent hex-encoded
    pub fn data(data: impl Into<Vec<u8>>) -> Self {
        PsbtOutput::Data(data.into())
    }
}

impl Serialize for PsbtOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            PsbtOutput::Address { address, amount } => {
                map.serialize_entry(address, &(*amount as f64 / SATOSHI_PER_BTC))?
            }
            PsbtOutput::Data(data) => map.serialize_entry("data", &hex::encode(data))?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PsbtOutput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Value::Object(map) = value else {
            return Err(de::Error::custom(format!(
                "psbt output must be an object, got {}",
                json_kind(&value)
            )));
        };
        if map.len() != 1 {
            return Err(de::Error::custom(format!(
                "psbt output must have exactly one key, got {}",
                map.len()
            )));
        }
        let Some((key, value)) = map.into_iter().next() else {
            return Err(de::Error::custom("psbt output must have exactly one key"));
        };
        match (key.as_str(), value) {
            ("data", Value::String(text)) => hex::decode(&text)
                .map(PsbtOutput::Data)
                .map_err(|e| de::Error::custom(format!("invalid psbt data output: {}", e))),
            (_, Value::Number(n)) => {
                let btc = n
                    .as_f64()
                    .ok_or_else(|| de::Error::custom("psbt output amount out of range"))?;
                Ok(PsbtOutput::Address {
                    address: key,
                    amount: (btc * SATOSHI_PER_BTC).round() as i64,
                })
            }
            (key, other) => Err(de::Error::custom(format!(
                "invalid value for psbt output {:?}: {}",
                key,
                json_kind(&other)
            ))),
        }
    }
}

/// Options of `walletcreatefundedpsbt`; unset fields are omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletCreateFundedPsbtOpts {
    #[serde(rename = "changeAddress", skip_serializing_if = "Option::is_none")]
    pub change_address: Option<String>,
    #[serde(rename = "changePosition", skip_serializing_if = "Option::is_none")]
    pub change_position: Option<i64>,
    #[serde(rename = "change_type", skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
    #[serde(rename = "includeWatching", skip_serializing_if = "Option::is_none")]
    pub include_watching: Option<bool>,
    #[serde(rename = "lockUnspents", skip_serializing_if = "Option::is_none")]
    pub lock_unspents: Option<bool>,
    #[serde(rename = "feeRate", skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<f64>,
    #[serde(
        rename = "subtractFeeFromOutputs",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subtract_fee_from_outputs: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaceable: Option<bool>,
    #[serde(rename = "conf_target", skip_serializing_if = "Option::is_none")]
    pub conf_target: Option<i64>,
    #[serde(rename = "estimate_mode", skip_serializing_if = "Option::is_none")]
    pub estimate_mode: Option<EstimateSmartFeeMode>,
}

/// Creates and funds a transaction in the Partially Signed Transaction format.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "walletcreatefundedpsbt", wallet_only)]
pub struct WalletCreateFundedPsbtCmd {
    /// Inputs to spend; may be empty
    #[param(usage = "[{\"txid\":\"value\",\"vout\":n,\"sequence\":n},...]")]
    pub inputs: Vec<PsbtInput>,
    /// Outputs to create
    #[param(usage = "[{\"address\":amount},{\"data\":\"hex\"},...]")]
    pub outputs: Vec<PsbtOutput>,
    /// Raw locktime
    pub locktime: Option<u32>,
    /// Funding options
    pub options: Option<WalletCreateFundedPsbtOpts>,
    /// Include BIP 32 derivation paths for public keys if known
    pub bip32_derivs: Option<bool>,
}

impl WalletCreateFundedPsbtCmd {
    pub fn new(
        inputs: Vec<PsbtInput>,
        outputs: Vec<PsbtOutput>,
        locktime: Option<u32>,
        options: Option<WalletCreateFundedPsbtOpts>,
        bip32_derivs: Option<bool>,
    ) -> Self {
        Self {
            inputs,
            outputs,
            locktime,
            options,
            bip32_derivs,
        }
    }
}

/// Removes the wallet encryption key from memory, locking the wallet.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "walletlock", wallet_only)]
pub struct WalletLockCmd;

/// Unlock the wallet.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "walletpassphrase", wallet_only)]
pub struct WalletPassphraseCmd {
    /// The wallet passphrase
    pub passphrase: String,
    /// The number of seconds to wait before the wallet automatically locks
    pub timeout: i64,
}

impl WalletPassphraseCmd {
    pub fn new(passphrase: impl Into<String>, timeout: i64) -> Self {
        Self {
            passphrase: passphrase.into(),
            timeout,
        }
    }
}

/// Change the wallet passphrase.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "walletpassphrasechange", wallet_only)]
pub struct WalletPassphraseChangeCmd {
    /// The old wallet passphrase
    pub old_passphrase: String,
    /// The new wallet passphrase
    pub new_passphrase: String,
}

impl WalletPassphraseChangeCmd {
    pub fn new(old_passphrase: impl Into<String>, new_passphrase: impl Into<String>) -> Self {
        Self {
            old_passphrase: old_passphrase.into(),
            new_passphrase: new_passphrase.into(),
        }
    }
}

/// Updates a PSBT with input information from the wallet and signs inputs.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "walletprocesspsbt", wallet_only)]
pub struct WalletProcessPsbtCmd {
    /// The transaction base64 string
    pub psbt: String,
    /// Also sign the transaction when updating
    #[param(default = "true")]
    pub sign: Option<bool>,
    /// The signature hash type to sign with if not specified by the PSBT
    #[param(default = r#""ALL""#)]
    pub sighash_type: Option<String>,
    /// Include BIP 32 derivation paths for public keys if known
    pub bip32_derivs: Option<bool>,
}

impl WalletProcessPsbtCmd {
    pub fn new(
        psbt: impl Into<String>,
        sign: Option<bool>,
        sighash_type: Option<String>,
        bip32_derivs: Option<bool>,
    ) -> Self {
        Self {
            psbt: psbt.into(),
            sign,
            sighash_type,
            bip32_derivs,
        }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder> {
    builder
        .register::<AddMultisigAddressCmd>()?
        .register::<AddWitnessAddressCmd>()?
        .register::<BackupWalletCmd>()?
        .register::<CreateMultisigCmd>()?
        .register::<CreateWalletCmd>()?
        .register::<DumpPrivKeyCmd>()?
        .register::<EncryptWalletCmd>()?
        .register::<EstimateFeeCmd>()?
        .register::<EstimateSmartFeeCmd>()?
        .register::<EstimatePriorityCmd>()?
        .register::<GetAccountCmd>()?
        .register::<GetAccountAddressCmd>()?
        .register::<GetAddressesByAccountCmd>()?
        .register::<GetAddressInfoCmd>()?
        .register::<GetBalanceCmd>()?
        .register::<GetBalancesCmd>()?
        .register::<GetNewAddressCmd>()?
        .register::<GetRawChangeAddressCmd>()?
        .register::<GetReceivedByAccountCmd>()?
        .register::<GetReceivedByAddressCmd>()?
        .register::<GetTransactionCmd>()?
        .register::<GetWalletInfoCmd>()?
        .register::<ImportMultiCmd>()?
        .register::<ImportPrivKeyCmd>()?
        .register::<KeyPoolRefillCmd>()?
        .register::<ListAccountsCmd>()?
        .register::<ListAddressGroupingsCmd>()?
        .register::<ListLockUnspentCmd>()?
        .register::<ListReceivedByAccountCmd>()?
        .register::<ListReceivedByAddressCmd>()?
        .register::<ListSinceBlockCmd>()?
        .register::<ListTransactionsCmd>()?
        .register::<ListUnspentCmd>()?
        .register::<LoadWalletCmd>()?
        .register::<LockUnspentCmd>()?
        .register::<MoveCmd>()?
        .register::<SendFromCmd>()?
        .register::<SendManyCmd>()?
        .register::<SendToAddressCmd>()?
        .register::<SetAccountCmd>()?
        .register::<SetTxFeeCmd>()?
        .register::<SignMessageCmd>()?
        .register::<SignRawTransactionCmd>()?
        .register::<SignRawTransactionWithWalletCmd>()?
        .register::<UnloadWalletCmd>()?
        .register::<WalletCreateFundedPsbtCmd>()?
        .register::<WalletLockCmd>()?
        .register::<WalletPassphraseCmd>()?
        .register::<WalletPassphraseChangeCmd>()?
        .register::<WalletProcessPsbtCmd>()
}
