//! Wallet commands available only over websockets

use pinjson_core::{RegistryBuilder, Result};
use pinjson_macros::Command;

/// Creates a new encrypted wallet with the given passphrase.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "createencryptedwallet", wallet_only, websocket_only)]
pub struct CreateEncryptedWalletCmd {
    /// Passphrase to encrypt the new wallet with
    pub passphrase: String,
}

impl CreateEncryptedWalletCmd {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }
}

/// Creates and returns a duplicate of the wallet database without any private keys.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "exportwatchingwallet", wallet_only, websocket_only)]
pub struct ExportWatchingWalletCmd {
    /// Unused
    pub account: Option<String>,
    /// Whether or not to return the wallet as base64-encoded strings
    #[param(default = "false")]
    pub download: Option<bool>,
}

impl ExportWatchingWalletCmd {
    pub fn new(account: Option<String>, download: Option<bool>) -> Self {
        Self { account, download }
    }
}

/// Calculates the unspent output value of all unmined transaction outputs for an account.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "getunconfirmedbalance", wallet_only, websocket_only)]
pub struct GetUnconfirmedBalanceCmd {
    /// The account to query the unconfirmed balance for
    pub account: Option<String>,
}

impl GetUnconfirmedBalanceCmd {
    pub fn new(account: Option<String>) -> Self {
        Self { account }
    }
}

/// Returns a JSON array of objects containing verbose details for wallet transactions pertaining to some addresses.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listaddresstransactions", wallet_only, websocket_only)]
pub struct ListAddressTransactionsCmd {
    /// Addresses to filter transaction results by
    pub addresses: Vec<String>,
    /// Unused
    pub account: Option<String>,
}

impl ListAddressTransactionsCmd {
    pub fn new(addresses: Vec<String>, account: Option<String>) -> Self {
        Self { addresses, account }
    }
}

/// Returns a JSON array of objects in the same format as 'listtransactions' without limiting the number of returned objects.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "listalltransactions", wallet_only, websocket_only)]
pub struct ListAllTransactionsCmd {
    /// Unused
    pub account: Option<String>,
}

impl ListAllTransactionsCmd {
    pub fn new(account: Option<String>) -> Self {
        Self { account }
    }
}

/// Recovers addresses of an account by scanning ahead of the last used address.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "recoveraddresses", wallet_only, websocket_only)]
pub struct RecoverAddressesCmd {
    /// The account to recover addresses for
    pub account: String,
    /// The number of addresses to recover
    pub n: i32,
}

impl RecoverAddressesCmd {
    pub fn new(account: impl Into<String>, n: i32) -> Self {
        Self {
            account: account.into(),
            n,
        }
    }
}

/// Returns whether or not the wallet is locked.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "walletislocked", wallet_only, websocket_only)]
pub struct WalletIsLockedCmd;

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder> {
    builder
        .register::<CreateEncryptedWalletCmd>()?
        .register::<ExportWatchingWalletCmd>()?
        .register::<GetUnconfirmedBalanceCmd>()?
        .register::<ListAddressTransactionsCmd>()?
        .register::<ListAllTransactionsCmd>()?
        .register::<RecoverAddressesCmd>()?
        .register::<WalletIsLockedCmd>()
}
