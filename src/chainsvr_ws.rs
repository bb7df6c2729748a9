//! Chain server commands available only over websockets

use pinjson_core::{RegistryBuilder, Result};
use pinjson_macros::Command;

/// Authenticate the websocket with the RPC server.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "authenticate", websocket_only)]
pub struct AuthenticateCmd {
    /// The RPC username
    pub username: String,
    /// The RPC password
    pub passphrase: String,
}

impl AuthenticateCmd {
    pub fn new(username: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            passphrase: passphrase.into(),
        }
    }
}

/// Request notifications for whenever a block is connected or disconnected from the main (best) chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "notifyblocks", websocket_only)]
pub struct NotifyBlocksCmd;

/// Cancel registered notifications for whenever a block is connected or disconnected from the main (best) chain.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "stopnotifyblocks", websocket_only)]
pub struct StopNotifyBlocksCmd;

/// Send either a txaccepted or a txacceptedverbose notification when a new transaction is accepted into the mempool.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "notifynewtransactions", websocket_only)]
pub struct NotifyNewTransactionsCmd {
    /// Specifies which type of notification to receive
    #[param(default = "false")]
    pub verbose: Option<bool>,
}

impl NotifyNewTransactionsCmd {
    pub fn new(verbose: Option<bool>) -> Self {
        Self { verbose }
    }
}

/// Stop sending either a txaccepted or a txacceptedverbose notification when a new transaction is accepted into the mempool.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "stopnotifynewtransactions", websocket_only)]
pub struct StopNotifyNewTransactionsCmd;

/// Return details regarding a websocket client's current connection session.
#[derive(Debug, Clone, PartialEq, Command)]
#[command(method = "session", websocket_only)]
pub struct SessionCmd;

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder> {
    builder
        .register::<AuthenticateCmd>()?
        .register::<NotifyBlocksCmd>()?
        .register::<StopNotifyBlocksCmd>()?
        .register::<NotifyNewTransactionsCmd>()?
        .register::<StopNotifyNewTransactionsCmd>()?
        .register::<SessionCmd>()
}
