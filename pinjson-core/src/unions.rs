//! Values that take one of several JSON shapes
//!
//! A handful of RPC parameters accept more than one JSON shape: a block may
//! be addressed by hash or by height, an import timestamp may be a number or
//! the word `"now"`, and so on. Each such parameter is an enum here with one
//! variant per shape. Encoding writes exactly the shape of the populated
//! variant. Decoding inspects the JSON value and picks the first variant
//! whose shape matches, in declaration order, and fails with a message
//! naming the accepted shapes when nothing matches.
//!
//! # Examples
//!
//! ```rust
//! use pinjson_core::unions::{DescriptorRange, TimestampOrNow};
//!
//! let range = DescriptorRange::Pair([0, 2]);
//! assert_eq!(serde_json::to_string(&range).unwrap(), "[0,2]");
//!
//! let ts: TimestampOrNow = serde_json::from_str(r#""now""#).unwrap();
//! assert_eq!(ts, TimestampOrNow::Now);
//! ```

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describe a JSON value's shape for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Descriptor range: a single end index or a `[begin, end]` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorRange {
    /// Range `[0, end]`
    Single(i64),
    /// Explicit `[begin, end]`
    Pair([i64; 2]),
}

impl Serialize for DescriptorRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DescriptorRange::Single(end) => serializer.serialize_i64(*end),
            DescriptorRange::Pair(pair) => pair.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for DescriptorRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(end) = value.as_i64() {
            return Ok(DescriptorRange::Single(end));
        }
        if let Some([begin, end]) = value.as_array().map(Vec::as_slice) {
            if let (Some(begin), Some(end)) = (begin.as_i64(), end.as_i64()) {
                return Ok(DescriptorRange::Pair([begin, end]));
            }
        }
        Err(de::Error::custom(format!(
            "range must be an integer or a [begin, end] integer pair, got {}",
            json_kind(&value)
        )))
    }
}

/// Block addressed by height or by hash
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashOrHeight {
    /// Block height
    Height(i64),
    /// Hex-encoded block hash
    Hash(String),
}

impl Serialize for HashOrHeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HashOrHeight::Height(h) => serializer.serialize_i64(*h),
            HashOrHeight::Hash(hash) => serializer.serialize_str(hash),
        }
    }
}

impl<'de> Deserialize<'de> for HashOrHeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .map(HashOrHeight::Height)
                .ok_or_else(|| de::Error::custom("height must be an integer")),
            Value::String(s) => Ok(HashOrHeight::Hash(s)),
            other => Err(de::Error::custom(format!(
                "expected a block height or hash string, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Key birth time: a UNIX timestamp or the literal `"now"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampOrNow {
    /// Seconds since the UNIX epoch
    Timestamp(i64),
    /// Current time, skipping any rescan
    Now,
}

impl Serialize for TimestampOrNow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TimestampOrNow::Timestamp(t) => serializer.serialize_i64(*t),
            TimestampOrNow::Now => serializer.serialize_str("now"),
        }
    }
}

impl<'de> Deserialize<'de> for TimestampOrNow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(t) = value.as_i64() {
            return Ok(TimestampOrNow::Timestamp(t));
        }
        match value.as_str() {
            Some("now") => Ok(TimestampOrNow::Now),
            Some(other) => Err(de::Error::custom(format!(
                "invalid timestamp string {:?}, only \"now\" is accepted",
                other
            ))),
            None => Err(de::Error::custom(format!(
                "timestamp must be an integer or \"now\", got {}",
                json_kind(&value)
            ))),
        }
    }
}

/// Fee guard on `sendrawtransaction`
///
/// Older servers take a boolean "allow high fees" flag; newer ones take a
/// maximum fee rate. [`AllowHighFeesOrMaxFeeRate::Unset`] encodes as
/// `false`, which both kinds of server treat as "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AllowHighFeesOrMaxFeeRate {
    /// No preference given
    #[default]
    Unset,
    /// Legacy boolean flag
    AllowHighFees(bool),
    /// Maximum fee rate, in satoshi per kilobyte
    MaxFeeRate(i32),
}

impl Serialize for AllowHighFeesOrMaxFeeRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AllowHighFeesOrMaxFeeRate::Unset => serializer.serialize_bool(false),
            AllowHighFeesOrMaxFeeRate::AllowHighFees(b) => serializer.serialize_bool(*b),
            AllowHighFeesOrMaxFeeRate::MaxFeeRate(rate) => serializer.serialize_i32(*rate),
        }
    }
}

impl<'de> Deserialize<'de> for AllowHighFeesOrMaxFeeRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(b) => Ok(AllowHighFeesOrMaxFeeRate::AllowHighFees(b)),
            Value::Number(n) => {
                let rate = n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                    .and_then(|r| i32::try_from(r).ok())
                    .ok_or_else(|| de::Error::custom("max fee rate out of range"))?;
                Ok(AllowHighFeesOrMaxFeeRate::MaxFeeRate(rate))
            }
            other => Err(de::Error::custom(format!(
                "fee setting must be a bool or a number, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Structured form of a script-pubkey given by address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptPubKeyAddress {
    /// Address whose script should be imported
    pub address: String,
}

/// Script to import: raw script hex or `{"address": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptPubKey {
    /// Hex-encoded script
    Script(String),
    /// Address object
    Address(ScriptPubKeyAddress),
}

impl Serialize for ScriptPubKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScriptPubKey::Script(hex) => serializer.serialize_str(hex),
            ScriptPubKey::Address(addr) => {
                let mut s = serializer.serialize_struct("ScriptPubKeyAddress", 1)?;
                s.serialize_field("address", &addr.address)?;
                s.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ScriptPubKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(ScriptPubKey::Script(s)),
            obj @ Value::Object(_) => ScriptPubKeyAddress::deserialize(obj)
                .map(ScriptPubKey::Address)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "scriptPubKey must be a script string or an address object, got {}",
                json_kind(&other)
            ))),
        }
    }
}
