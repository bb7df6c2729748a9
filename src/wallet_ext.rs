//! Wallet extension commands
//!
//! Account and import methods the pin wallet serves beyond the reference
//! wallet set. All of them are wallet-only.

use pinjson_core::{RegistryBuilder, Result};
use pinjson_macros::Command;

/// Creates a new account.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "createnewaccount", wallet_only)]
pub struct CreateNewAccountCmd {
    /// Name of the new account
    pub account: String,
}

impl CreateNewAccountCmd {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

/// Dumps all wallet keys in a human-readable format to a server-side file.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "dumpwallet", wallet_only)]
pub struct DumpWalletCmd {
    /// The filename
    pub filename: String,
}

impl DumpWalletCmd {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Imports an address or script as watch-only.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "importaddress", wallet_only)]
pub struct ImportAddressCmd {
    /// The address or hex-encoded script
    pub address: String,
    /// Name of the account the address is imported to
    pub account: String,
    /// Rescan the wallet for transactions
    #[param(default = "true")]
    pub rescan: Option<bool>,
}

impl ImportAddressCmd {
    pub fn new(address: impl Into<String>, account: impl Into<String>, rescan: Option<bool>) -> Self {
        Self {
            address: address.into(),
            account: account.into(),
            rescan,
        }
    }
}

/// Imports a public key as watch-only.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "importpubkey", wallet_only)]
pub struct ImportPubKeyCmd {
    /// The hex-encoded public key
    pub pub_key: String,
    /// Rescan the wallet for transactions
    #[param(default = "true")]
    pub rescan: Option<bool>,
}

impl ImportPubKeyCmd {
    pub fn new(pub_key: impl Into<String>, rescan: Option<bool>) -> Self {
        Self {
            pub_key: pub_key.into(),
            rescan,
        }
    }
}

/// Imports keys from a wallet dump file.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "importwallet", wallet_only)]
pub struct ImportWalletCmd {
    /// The wallet file to import
    pub filename: String,
}

impl ImportWalletCmd {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Renames an account.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "renameaccount", wallet_only)]
pub struct RenameAccountCmd {
    /// The old account name
    pub old_account: String,
    /// The new account name
    pub new_account: String,
}

impl RenameAccountCmd {
    pub fn new(old_account: impl Into<String>, new_account: impl Into<String>) -> Self {
        Self {
            old_account: old_account.into(),
            new_account: new_account.into(),
        }
    }
}

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder> {
    builder
        .register::<CreateNewAccountCmd>()?
        .register::<DumpWalletCmd>()?
        .register::<ImportAddressCmd>()?
        .register::<ImportPubKeyCmd>()?
        .register::<ImportWalletCmd>()?
        .register::<RenameAccountCmd>()
}
