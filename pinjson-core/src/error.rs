//! Error types for pinjson
//!
//! Two families of errors live here:
//!
//! - **Error**: codec and registry failures. Every failure carries an
//!   [`ErrorCode`] so callers can branch on the kind without parsing the
//!   human-readable description.
//! - **RpcError**: the wire-format error object a server places in the
//!   `error` member of a response, with the numeric codes used by the node
//!   and wallet.
//!
//! # Error Kinds
//!
//! Registration-time kinds (`DuplicateMethod`, `InvalidUsageFlags`,
//! `EmbeddedType`, `UnexportedField`, `UnsupportedFieldType`,
//! `NonOptionalField`, `NonOptionalDefault`, `MismatchedDefault`) mean the
//! command table itself is malformed and are expected to surface during
//! start-up or in tests.
//!
//! Request-time kinds (`UnregisteredMethod`, `NumParams`, `InvalidType`) are
//! recoverable and are handed back to whoever decoded the request.
//!
//! # Examples
//!
//! ```rust
//! use pinjson_core::{Error, ErrorCode};
//!
//! let err = Error::new(ErrorCode::NumParams, "wrong number of params");
//! assert_eq!(err.code, ErrorCode::NumParams);
//! assert_eq!(err.to_string(), "wrong number of params");
//! assert_eq!(ErrorCode::NumParams.to_string(), "ErrNumParams");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for pinjson operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of failure reported by the registry and codec
///
/// The numeric value of each known code is stable and follows declaration
/// order, starting at zero. Values outside the known range survive a
/// round-trip through `u16` as [`ErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A method name was registered twice.
    DuplicateMethod,
    /// Usage flags contain bits outside the defined set.
    InvalidUsageFlags,
    /// A value does not have the type the field requires.
    InvalidType,
    /// A command shape contains a nested or duplicated field layout that
    /// cannot be addressed positionally.
    EmbeddedType,
    /// A field has no usable name.
    UnexportedField,
    /// A field's type has no JSON encoding.
    UnsupportedFieldType,
    /// A required field follows an optional one.
    NonOptionalField,
    /// A default was attached to a required field.
    NonOptionalDefault,
    /// A default does not decode into its field's type.
    MismatchedDefault,
    /// No command is registered under the method name.
    UnregisteredMethod,
    /// The parameter count is outside the accepted range.
    NumParams,
    /// Help text was requested for an undocumented method or field.
    MissingDescription,
    /// A code this version does not know about.
    Unknown(u16),
}

impl ErrorCode {
    const KNOWN: [ErrorCode; 12] = [
        ErrorCode::DuplicateMethod,
        ErrorCode::InvalidUsageFlags,
        ErrorCode::InvalidType,
        ErrorCode::EmbeddedType,
        ErrorCode::UnexportedField,
        ErrorCode::UnsupportedFieldType,
        ErrorCode::NonOptionalField,
        ErrorCode::NonOptionalDefault,
        ErrorCode::MismatchedDefault,
        ErrorCode::UnregisteredMethod,
        ErrorCode::NumParams,
        ErrorCode::MissingDescription,
    ];

    /// Number of known error codes
    pub const COUNT: usize = Self::KNOWN.len();

    /// Numeric value of the code
    pub fn as_u16(self) -> u16 {
        match self {
            ErrorCode::Unknown(n) => n,
            known => Self::KNOWN
                .iter()
                .position(|c| *c == known)
                .map(|i| i as u16)
                .unwrap_or(u16::MAX),
        }
    }
}

impl From<u16> for ErrorCode {
    fn from(n: u16) -> Self {
        Self::KNOWN
            .get(n as usize)
            .copied()
            .unwrap_or(ErrorCode::Unknown(n))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::DuplicateMethod => "ErrDuplicateMethod",
            ErrorCode::InvalidUsageFlags => "ErrInvalidUsageFlags",
            ErrorCode::InvalidType => "ErrInvalidType",
            ErrorCode::EmbeddedType => "ErrEmbeddedType",
            ErrorCode::UnexportedField => "ErrUnexportedField",
            ErrorCode::UnsupportedFieldType => "ErrUnsupportedFieldType",
            ErrorCode::NonOptionalField => "ErrNonOptionalField",
            ErrorCode::NonOptionalDefault => "ErrNonOptionalDefault",
            ErrorCode::MismatchedDefault => "ErrMismatchedDefault",
            ErrorCode::UnregisteredMethod => "ErrUnregisteredMethod",
            ErrorCode::NumParams => "ErrNumParams",
            ErrorCode::MissingDescription => "ErrMissingDescription",
            ErrorCode::Unknown(n) => return write!(f, "Unknown ErrorCode ({})", n),
        };
        f.write_str(name)
    }
}

/// Codec or registry failure
///
/// Displays as the bare description so it can be forwarded to a caller
/// verbatim. Match on `code` to tell failures apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct Error {
    /// What kind of failure this is
    pub code: ErrorCode,
    /// Human-readable detail
    pub description: String,
}

impl Error {
    /// Create an error with a code and description
    pub fn new(code: ErrorCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

/// Numeric code carried by a wire-level [`RpcError`]
///
/// Codes are grouped the way the node reports them: the standard JSON-RPC
/// range, general daemon failures, peer-to-peer failures and wallet
/// failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RpcErrorCode(pub i32);

impl RpcErrorCode {
    // Standard JSON-RPC 2.0 errors.
    pub const INVALID_REQUEST: Self = Self(-32600);
    pub const METHOD_NOT_FOUND: Self = Self(-32601);
    pub const INVALID_PARAMS: Self = Self(-32602);
    pub const INTERNAL_ERROR: Self = Self(-32603);
    pub const PARSE_ERROR: Self = Self(-32700);

    // General application defined errors.
    pub const MISC: Self = Self(-1);
    pub const FORBIDDEN_BY_SAFE_MODE: Self = Self(-2);
    pub const TYPE: Self = Self(-3);
    pub const INVALID_ADDRESS_OR_KEY: Self = Self(-5);
    pub const OUT_OF_MEMORY: Self = Self(-7);
    pub const INVALID_PARAMETER: Self = Self(-8);
    pub const DATABASE: Self = Self(-20);
    pub const DESERIALIZATION: Self = Self(-22);
    pub const VERIFY: Self = Self(-25);

    // Peer-to-peer client errors.
    pub const CLIENT_NOT_CONNECTED: Self = Self(-9);
    pub const CLIENT_IN_INITIAL_DOWNLOAD: Self = Self(-10);
    pub const CLIENT_NODE_NOT_ADDED: Self = Self(-24);

    // Wallet errors.
    pub const WALLET: Self = Self(-4);
    pub const WALLET_INSUFFICIENT_FUNDS: Self = Self(-6);
    pub const WALLET_INVALID_ACCOUNT_NAME: Self = Self(-11);
    pub const WALLET_KEYPOOL_RAN_OUT: Self = Self(-12);
    pub const WALLET_UNLOCK_NEEDED: Self = Self(-13);
    pub const WALLET_PASSPHRASE_INCORRECT: Self = Self(-14);
    pub const WALLET_WRONG_ENC_STATE: Self = Self(-15);
    pub const WALLET_ENCRYPTION_FAILED: Self = Self(-16);
    pub const WALLET_ALREADY_UNLOCKED: Self = Self(-17);

    // Node specific errors, sharing numbers with the groups above.
    pub const BLOCK_NOT_FOUND: Self = Self(-5);
    pub const OUT_OF_RANGE: Self = Self(-1);
    pub const NO_TX_INFO: Self = Self(-5);
    pub const NO_CF_INDEX: Self = Self(-5);
    pub const INVALID_TX_VOUT: Self = Self(-5);
    pub const RAW_TX_STRING: Self = Self(-32602);
    pub const DECODE_HEX_STRING: Self = Self(-22);
    pub const NO_WALLET: Self = Self(-1);
    pub const UNIMPLEMENTED: Self = Self(-1);
}

/// Error object placed in the `error` member of a response
///
/// # Examples
///
/// ```rust
/// use pinjson_core::{RpcError, RpcErrorCode};
///
/// let err = RpcError::new(RpcErrorCode::BLOCK_NOT_FOUND, "Block not found");
/// assert_eq!(err.to_string(), "-5: Block not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    /// Numeric error code
    pub code: RpcErrorCode,
    /// Short description of the failure
    pub message: String,
}

impl RpcError {
    /// Create an error object with a code and message
    pub fn new(code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Method does not exist (-32601)
    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            RpcErrorCode::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    /// Parameters did not decode (-32602)
    ///
    /// Use this to forward a codec [`Error`] raised while unmarshaling a
    /// request.
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::INVALID_PARAMS, msg)
    }

    /// Request body was not valid JSON (-32700)
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::PARSE_ERROR, msg)
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.0, self.message)
    }
}

impl std::error::Error for RpcError {}

impl From<Error> for RpcError {
    /// Map a codec failure onto the wire code a server would answer with
    fn from(err: Error) -> Self {
        match err.code {
            ErrorCode::UnregisteredMethod => {
                Self::new(RpcErrorCode::METHOD_NOT_FOUND, err.description)
            }
            _ => Self::invalid_params(err.description),
        }
    }
}
