//! pinjson - typed JSON-RPC 1.0 commands for the pin node and wallet
//!
//! This is the main convenience crate. It defines every command the node
//! and wallet understand, registers them in a process-wide default registry
//! and re-exports the sub-crates.
//!
//! # Architecture
//!
//! pinjson is organized into modular crates:
//!
//! - **pinjson-core**: envelopes, registry, codec, help and error handling
//! - **pinjson-macros**: `#[derive(Command)]`
//! - **pinjson** (this crate): the command families and the default registry
//!
//! Command families live in their own modules:
//!
//! - [`chainsvr`]: chain server commands
//! - [`chainsvr_ws`]: chain server websocket commands
//! - [`chainsvr_ntfns`]: chain server websocket notifications
//! - [`node_ext`]: node extension commands
//! - [`wallet`]: wallet server commands
//! - [`wallet_ws`]: wallet websocket commands
//! - [`wallet_ext`]: wallet extension commands
//!
//! # Quick Start
//!
//! ```rust
//! use pinjson::chainsvr::GetBlockCmd;
//! use pinjson::core::RpcVersion;
//!
//! let cmd = GetBlockCmd::new("123", None);
//! let bytes = pinjson::marshal_cmd(RpcVersion::V1, 1i64, &cmd).unwrap();
//! assert_eq!(
//!     bytes,
//!     br#"{"jsonrpc":"1.0","method":"getblock","params":["123"],"id":1}"#
//! );
//!
//! // Decoding applies defaults for omitted parameters
//! let decoded = pinjson::unmarshal_bytes(&bytes).unwrap();
//! let decoded = decoded.downcast_ref::<GetBlockCmd>().unwrap();
//! assert_eq!(decoded.verbosity, Some(1));
//!
//! // Loosely typed construction marshals to the same bytes
//! let generic = pinjson::new_cmd!("getblock", "123").unwrap();
//! assert_eq!(pinjson::marshal_cmd(RpcVersion::V1, 1i64, generic.as_ref()).unwrap(), bytes);
//! ```

use std::sync::OnceLock;

// Re-export the sub-crates
pub use pinjson_core as core;
pub use pinjson_macros as macros;

// Convenience re-exports of the most commonly used types
pub use pinjson_core::{
    AnyCommand, Command, Error, ErrorCode, Id, Registry, Request, Response, Result, RpcError,
    RpcVersion, UsageFlag,
};

pub mod chainsvr;
pub mod chainsvr_ntfns;
pub mod chainsvr_ws;
pub mod node_ext;
pub mod wallet;
pub mod wallet_ext;
pub mod wallet_ws;

static DEFAULT_REGISTRY: OnceLock<Result<Registry>> = OnceLock::new();

/// Registry holding every command defined in this crate
///
/// Built on first use and shared for the life of the process. A build
/// failure is cached too and returned to every caller.
pub fn default_registry() -> Result<&'static Registry> {
    DEFAULT_REGISTRY
        .get_or_init(build_default_registry)
        .as_ref()
        .map_err(Clone::clone)
}

fn build_default_registry() -> Result<Registry> {
    let builder = Registry::builder();
    let builder = chainsvr::register(builder)?;
    let builder = chainsvr_ws::register(builder)?;
    let builder = chainsvr_ntfns::register(builder)?;
    let builder = node_ext::register(builder)?;
    let builder = wallet::register(builder)?;
    let builder = wallet_ws::register(builder)?;
    let builder = wallet_ext::register(builder)?;
    let registry = builder.build();

    tracing::debug!(methods = registry.len(), "default registry ready");
    Ok(registry)
}

/// Encode a command as request bytes using the default registry
pub fn marshal_cmd(version: RpcVersion, id: impl Into<Id>, cmd: &dyn AnyCommand) -> Result<Vec<u8>> {
    default_registry()?.marshal_cmd(version, id, cmd)
}

/// Decode a request using the default registry
pub fn unmarshal_cmd(request: &Request) -> Result<Box<dyn AnyCommand>> {
    default_registry()?.unmarshal_cmd(request)
}

/// Parse request bytes and decode the command using the default registry
pub fn unmarshal_bytes(bytes: &[u8]) -> Result<Box<dyn AnyCommand>> {
    default_registry()?.unmarshal_bytes(bytes)
}

/// Build a command from loosely typed arguments using the default registry
///
/// See also [`new_cmd!`], which serializes its arguments first.
pub fn new_cmd(method: &str, args: Vec<serde_json::Value>) -> Result<Box<dyn AnyCommand>> {
    default_registry()?.new_cmd(method, args)
}

/// One-line usage of a registered method
pub fn method_usage_text(method: &str) -> Result<&'static str> {
    default_registry()?.method_usage_text(method)
}

/// Usage flags of a registered method
pub fn method_usage_flags(method: &str) -> Result<UsageFlag> {
    default_registry()?.method_usage_flags(method)
}

/// Method name a command is registered under
pub fn cmd_method(cmd: &dyn AnyCommand) -> Result<&'static str> {
    default_registry()?.cmd_method(cmd)
}

/// All registered method names, sorted
pub fn registered_methods() -> Result<Vec<&'static str>> {
    Ok(default_registry()?.registered_methods())
}

/// Full help text of a registered method
pub fn generate_help(method: &str) -> Result<String> {
    default_registry()?.generate_help(method)
}

/// Build a command from a method name and loosely typed arguments
///
/// Each argument is serialized with serde and the result handed to
/// [`new_cmd`]. Pass `None::<T>` (or `()`) to leave an optional
/// parameter unset.
///
/// ```rust
/// use pinjson::node_ext::GenerateToAddressCmd;
///
/// let cmd = pinjson::new_cmd!("generatetoaddress", 1, "1Address").unwrap();
/// let cmd = cmd.downcast_ref::<GenerateToAddressCmd>().unwrap();
/// assert_eq!(cmd.address, "1Address");
/// assert_eq!(cmd.max_tries, None);
/// ```
#[macro_export]
macro_rules! new_cmd {
    ($method:expr $(, $arg:expr)* $(,)?) => {
        (|| -> $crate::Result<::std::boxed::Box<dyn $crate::AnyCommand>> {
            let args: ::std::vec::Vec<$crate::core::__private::Value> =
                ::std::vec![$($crate::core::to_arg(&$arg)?),*];
            $crate::new_cmd($method, args)
        })()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_builds_once() {
        let first = default_registry().unwrap() as *const Registry;
        let second = default_registry().unwrap() as *const Registry;
        assert_eq!(first, second);
    }

    #[test]
    fn test_families_registered() {
        let registry = default_registry().unwrap();
        for method in [
            "getblock",
            "authenticate",
            "blockconnected",
            "debuglevel",
            "getbalance",
            "walletislocked",
            "renameaccount",
        ] {
            assert!(registry.has_method(method), "{} not registered", method);
        }
    }

    #[test]
    fn test_family_flags() {
        assert_eq!(method_usage_flags("getblock").unwrap(), UsageFlag::NONE);
        assert_eq!(method_usage_flags("notifyblocks").unwrap(), UsageFlag::WEBSOCKET_ONLY);
        assert_eq!(
            method_usage_flags("blockconnected").unwrap(),
            UsageFlag::WEBSOCKET_ONLY | UsageFlag::NOTIFICATION
        );
        assert_eq!(method_usage_flags("getbalance").unwrap(), UsageFlag::WALLET_ONLY);
        assert_eq!(
            method_usage_flags("walletislocked").unwrap(),
            UsageFlag::WALLET_ONLY | UsageFlag::WEBSOCKET_ONLY
        );
        assert_eq!(method_usage_flags("importpubkey").unwrap(), UsageFlag::WALLET_ONLY);
    }

    #[test]
    fn test_new_cmd_macro_without_args() {
        let cmd = new_cmd!("getblockcount").unwrap();
        assert_eq!(cmd.method(), "getblockcount");
    }
}
