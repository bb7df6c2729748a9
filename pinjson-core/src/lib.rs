//! Command registry and JSON-RPC 1.0 marshaling core for pinjson
//!
//! This crate provides the machinery behind the pinjson command set:
//!
//! - **Types**: the request and response envelopes
//! - **Registry**: method descriptors built from typed command definitions
//! - **Codec**: positional-parameter encoding with optional fields and defaults
//! - **Unions**: parameters that accept more than one JSON shape
//! - **Help**: usage lines and help text derived from registration metadata
//! - **Error handling**: coded errors for registration and request failures
//! - **Observability**: `tracing` subscriber setup
//!
//! # Overview
//!
//! Every RPC method is described by a plain Rust struct implementing
//! [`Command`], normally via `#[derive(Command)]` from `pinjson-macros`.
//! Fields are positional parameters in declaration order; `Option` fields
//! are optional and may carry a default. A [`Registry`] is built once from
//! these types and is then used, read-only, to turn commands into request
//! bytes and requests back into commands.
//!
//! # Example
//!
//! ```rust
//! use pinjson_core::{Command, Registry, RpcVersion};
//! use pinjson_macros::Command;
//!
//! #[derive(Debug, Clone, PartialEq, Command)]
//! #[command(method = "getblockcount")]
//! struct GetBlockCountCmd;
//!
//! let registry = Registry::builder()
//!     .register::<GetBlockCountCmd>()
//!     .unwrap()
//!     .build();
//!
//! let bytes = registry.marshal_cmd(RpcVersion::V1, 1i64, &GetBlockCountCmd).unwrap();
//! assert_eq!(bytes, br#"{"jsonrpc":"1.0","method":"getblockcount","params":[],"id":1}"#);
//! ```

pub mod codec;
pub mod error;
pub mod help;
pub mod observability;
pub mod registry;
pub mod types;
pub mod unions;

pub use codec::to_arg;
pub use error::{Error, ErrorCode, Result, RpcError, RpcErrorCode};
pub use observability::{init_logging, LogConfig};
pub use registry::{
    accepts, AnyCommand, Command, FieldDesc, FieldKind, MethodDescriptor, Registry,
    RegistryBuilder, UsageFlag,
};
pub use types::{marshal_response, Id, Request, Response, RpcVersion};
pub use unions::{
    AllowHighFeesOrMaxFeeRate, DescriptorRange, HashOrHeight, ScriptPubKey, ScriptPubKeyAddress,
    TimestampOrNow,
};

// Used by code generated from `#[derive(Command)]`.
#[doc(hidden)]
pub mod __private {
    pub use crate::registry::{decode_optional, decode_required, encode_field, encode_optional};
    pub use serde_json::Value;
}
