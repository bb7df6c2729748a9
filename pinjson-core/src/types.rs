//! JSON-RPC envelope types
//!
//! The node speaks a JSON-RPC 1.0 dialect: parameters are always a
//! positional array, the `jsonrpc` member is present on every message, and
//! notifications are ordinary requests whose `id` is `null`.
//!
//! # Message Types
//!
//! 1. **Request**: a method call, or a notification when `id` is null
//! 2. **Response**: the outcome of a request, carrying `result` and/or `error`
//!
//! # Byte Stability
//!
//! Field order in every struct here is the wire order. Serializing the same
//! logical value always produces the same bytes, which is what lets golden
//! fixtures assert exact equality.

use crate::error::{Error, ErrorCode, Result, RpcError};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Protocol version written to the `jsonrpc` member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RpcVersion {
    /// `"1.0"`, the dialect the node and wallet speak natively
    #[default]
    #[serde(rename = "1.0")]
    V1,
    /// `"2.0"`
    #[serde(rename = "2.0")]
    V2,
}

impl RpcVersion {
    /// The version string as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcVersion::V1 => "1.0",
            RpcVersion::V2 => "2.0",
        }
    }
}

impl fmt::Display for RpcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request identifier
///
/// Any JSON scalar the node accepts as an id. `Null` marks a notification.
///
/// # Examples
///
/// ```rust
/// use pinjson_core::Id;
///
/// let id: Id = 1i64.into();
/// assert_eq!(id.to_string(), "1");
/// assert_eq!(Id::Null.to_string(), "null");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier
    String(String),
    /// Integer identifier
    Number(i64),
    /// Integer identifier above `i64::MAX`
    Unsigned(u64),
    /// Fractional identifier
    Float(f64),
    /// No identifier; the message is a notification
    #[default]
    Null,
}

impl Id {
    /// Whether this id marks a notification
    pub fn is_null(&self) -> bool {
        matches!(self, Id::Null)
    }
}

// Floats compare and hash by bit pattern so ids can key maps.
impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Id::String(a), Id::String(b)) => a == b,
            (Id::Number(a), Id::Number(b)) => a == b,
            (Id::Unsigned(a), Id::Unsigned(b)) => a == b,
            (Id::Float(a), Id::Float(b)) => a.to_bits() == b.to_bits(),
            (Id::Null, Id::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Id::String(s) => s.hash(state),
            Id::Number(n) => n.hash(state),
            Id::Unsigned(n) => n.hash(state),
            Id::Float(x) => x.to_bits().hash(state),
            Id::Null => {}
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Unsigned(n) => write!(f, "{}", n),
            Id::Float(x) => write!(f, "{}", x),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Id::Number(n as i64)
    }
}

impl From<u32> for Id {
    fn from(n: u32) -> Self {
        Id::Number(n as i64)
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Id::Unsigned(n), Id::Number)
    }
}

impl From<f64> for Id {
    fn from(x: f64) -> Self {
        Id::Float(x)
    }
}

impl<T: Into<Id>> From<Option<T>> for Id {
    fn from(id: Option<T>) -> Self {
        id.map(Into::into).unwrap_or(Id::Null)
    }
}

/// JSON-RPC request as it travels on the wire
///
/// Serializes as `{"jsonrpc":...,"method":...,"params":[...],"id":...}`
/// in exactly that key order. On decode, a missing `params` member is an
/// empty list, a missing `jsonrpc` member is `"1.0"` and a missing `id` is
/// `null`.
///
/// # Examples
///
/// ```rust
/// use pinjson_core::{Request, RpcVersion, Id};
/// use serde_json::json;
///
/// let req = Request::new(RpcVersion::V1, Id::Number(1), "getblockcount", vec![]);
/// let bytes = serde_json::to_string(&req).unwrap();
/// assert_eq!(bytes, r#"{"jsonrpc":"1.0","method":"getblockcount","params":[],"id":1}"#);
///
/// let back: Request = serde_json::from_str(r#"{"method":"getblock","params":["00"],"id":7}"#).unwrap();
/// assert_eq!(back.params, vec![json!("00")]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Protocol version
    #[serde(default)]
    pub jsonrpc: RpcVersion,
    /// Method name the command is registered under
    pub method: String,
    /// Positional parameters
    #[serde(default)]
    pub params: Vec<Value>,
    /// Correlation id, or null for notifications
    #[serde(default)]
    pub id: Id,
}

impl Request {
    /// Build a request from already-encoded positional parameters
    pub fn new(
        jsonrpc: RpcVersion,
        id: impl Into<Id>,
        method: impl Into<String>,
        params: Vec<Value>,
    ) -> Self {
        Self {
            jsonrpc,
            method: method.into(),
            params,
            id: id.into(),
        }
    }

    /// Whether the request expects no response
    pub fn is_notification(&self) -> bool {
        self.id.is_null()
    }
}

/// JSON-RPC response
///
/// Under version `"1.0"` both `result` and `error` are always written, with
/// `null` standing in for whichever is absent. Under `"2.0"` only the
/// populated member is written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    /// Protocol version
    #[serde(default)]
    pub jsonrpc: RpcVersion,
    /// Result value on success
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object on failure
    #[serde(default)]
    pub error: Option<RpcError>,
    /// Id of the request this answers
    #[serde(default)]
    pub id: Id,
}

impl Response {
    /// Build a response from an encoded result and an optional error
    pub fn new(
        jsonrpc: RpcVersion,
        id: impl Into<Id>,
        result: Option<Value>,
        error: Option<RpcError>,
    ) -> Self {
        Self {
            jsonrpc,
            result,
            error,
            id: id.into(),
        }
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let v1 = self.jsonrpc == RpcVersion::V1;
        let len = if v1 { 4 } else { 3 };
        let mut s = serializer.serialize_struct("Response", len)?;
        s.serialize_field("jsonrpc", &self.jsonrpc)?;
        if v1 {
            s.serialize_field("result", &self.result)?;
            s.serialize_field("error", &self.error)?;
        } else if let Some(error) = &self.error {
            s.serialize_field("error", error)?;
        } else {
            s.serialize_field("result", &self.result)?;
        }
        s.serialize_field("id", &self.id)?;
        s.end()
    }
}

/// Encode a response to bytes
///
/// `result` is serialized with serde; pass `None::<&()>` when answering
/// with an error only.
///
/// # Examples
///
/// ```rust
/// use pinjson_core::{marshal_response, RpcVersion};
///
/// let bytes = marshal_response(RpcVersion::V1, 1i64, Some(&5), None).unwrap();
/// assert_eq!(bytes, br#"{"jsonrpc":"1.0","result":5,"error":null,"id":1}"#);
/// ```
pub fn marshal_response<T: Serialize + ?Sized>(
    jsonrpc: RpcVersion,
    id: impl Into<Id>,
    result: Option<&T>,
    error: Option<RpcError>,
) -> Result<Vec<u8>> {
    let result = result
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| Error::new(ErrorCode::InvalidType, format!("unmarshalable result: {}", e)))?;
    let response = Response::new(jsonrpc, id, result, error);
    serde_json::to_vec(&response)
        .map_err(|e| Error::new(ErrorCode::InvalidType, format!("unmarshalable response: {}", e)))
}
