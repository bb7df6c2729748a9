//! Command registry
//!
//! The registry maps method names to command descriptors. A descriptor is
//! built once, when a command type is registered, from the field table its
//! [`Command`] impl exposes. After [`RegistryBuilder::build`] the registry is
//! read-only and can be shared freely across threads.
//!
//! # Core Responsibilities
//!
//! - **Registration**: validate a command's field table and reject malformed
//!   ones before any request is processed
//! - **Lookup**: resolve a method name to its descriptor, and a concrete
//!   command type back to the method it was registered under
//! - **Metadata**: pre-parse defaults and pre-compute usage text
//!
//! # Examples
//!
//! ```rust
//! use pinjson_core::{Command, Registry, UsageFlag};
//! use pinjson_macros::Command;
//!
//! #[derive(Debug, Clone, PartialEq, Command)]
//! #[command(method = "getblockhash")]
//! struct GetBlockHashCmd {
//!     index: i64,
//! }
//!
//! let registry = Registry::builder()
//!     .register::<GetBlockHashCmd>()
//!     .unwrap()
//!     .build();
//! assert!(registry.has_method("getblockhash"));
//! assert_eq!(registry.method_usage_flags("getblockhash").unwrap(), UsageFlag::NONE);
//! ```

use crate::error::{Error, ErrorCode, Result};
use crate::help;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::sync::Arc;

/// Set of flags describing how a command may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UsageFlag(u32);

impl UsageFlag {
    /// No restrictions
    pub const NONE: Self = Self(0);
    /// Only valid when a wallet is attached
    pub const WALLET_ONLY: Self = Self(1);
    /// Only valid over a websocket connection
    pub const WEBSOCKET_ONLY: Self = Self(2);
    /// Sent by the server, never answered
    pub const NOTIFICATION: Self = Self(4);

    // One past the highest defined flag.
    const HIGHEST: u32 = 8;

    const NAMES: [(UsageFlag, &'static str); 3] = [
        (Self::WALLET_ONLY, "UFWalletOnly"),
        (Self::WEBSOCKET_ONLY, "UFWebsocketOnly"),
        (Self::NOTIFICATION, "UFNotification"),
    ];

    /// Build a flag set from raw bits, including undefined ones
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every flag in `other` is also set here
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether any bit outside the defined flags is set
    pub const fn has_unknown_bits(self) -> bool {
        self.0 & !(Self::HIGHEST - 1) != 0
    }
}

impl BitOr for UsageFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for UsageFlag {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for UsageFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0x0");
        }
        let mut rest = self.0;
        let mut parts = Vec::new();
        for (flag, name) in Self::NAMES {
            if rest & flag.0 == flag.0 {
                parts.push(name.to_string());
                rest &= !flag.0;
            }
        }
        if rest != 0 {
            parts.push(format!("0x{:x}", rest));
        }
        f.write_str(&parts.join("|"))
    }
}

/// Broad JSON shape of a field, used for usage and help text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// JSON string
    String,
    /// JSON number
    Numeric,
    /// JSON boolean
    Boolean,
    /// JSON array of the given element kind
    Array(&'static FieldKind),
    /// JSON object, or a value with several accepted shapes
    Object,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => f.write_str("string"),
            FieldKind::Numeric => f.write_str("numeric"),
            FieldKind::Boolean => f.write_str("boolean"),
            FieldKind::Array(elem) => write!(f, "array of {}", elem.plural()),
            FieldKind::Object => f.write_str("object"),
        }
    }
}

impl FieldKind {
    fn plural(&self) -> &'static str {
        match self {
            FieldKind::String => "strings",
            FieldKind::Numeric => "numbers",
            FieldKind::Boolean => "booleans",
            FieldKind::Array(_) => "arrays",
            FieldKind::Object => "objects",
        }
    }
}

/// Compile-time description of one positional parameter
///
/// Tables of these are generated by `#[derive(Command)]`; the order of the
/// table is the order of the parameters on the wire.
#[derive(Debug, Clone, Copy)]
pub struct FieldDesc {
    /// Field name as declared
    pub name: &'static str,
    /// Declared type with any `Option` wrapper removed
    pub type_name: &'static str,
    /// JSON shape of the field
    pub kind: FieldKind,
    /// Whether the parameter may be omitted
    pub optional: bool,
    /// Default applied on decode, as JSON text
    pub default: Option<&'static str>,
    /// Usage text that replaces the generated one
    pub usage: Option<&'static str>,
    /// One-line description for help output
    pub description: Option<&'static str>,
    /// Whether a JSON value decodes into the field's type
    pub accepts: fn(&Value) -> bool,
}

/// Check whether `value` decodes as `T`
pub fn accepts<T: DeserializeOwned>(value: &Value) -> bool {
    T::deserialize(value).is_ok()
}

/// A typed RPC command
///
/// Usually derived with `#[derive(Command)]`; the derive generates the field
/// table and the conversions to and from positional parameters.
pub trait Command: Any + fmt::Debug + Send + Sync + Sized {
    /// Method name the command is registered under by default
    const METHOD: &'static str;
    /// Usage flags the command is registered with by default
    const FLAGS: UsageFlag = UsageFlag::NONE;
    /// One-line description for help output
    const DESCRIPTION: Option<&'static str> = None;

    /// Parameter table in wire order
    fn fields() -> &'static [FieldDesc];

    /// Encode each field; `None` marks an absent optional field
    fn to_params(&self) -> Result<Vec<Option<Value>>>;

    /// Rebuild the command from one slot per field; `None` marks absence
    fn from_params(params: Vec<Option<Value>>) -> Result<Self>;
}

/// Type-erased command, as returned by decoding
pub trait AnyCommand: Any + fmt::Debug + Send + Sync {
    /// Method name declared by the command type
    fn method(&self) -> &'static str;

    /// Encoded fields, see [`Command::to_params`]
    fn params(&self) -> Result<Vec<Option<Value>>>;

    /// Borrow as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Convert into `Any` for downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Command> AnyCommand for T {
    fn method(&self) -> &'static str {
        T::METHOD
    }

    fn params(&self) -> Result<Vec<Option<Value>>> {
        self.to_params()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn AnyCommand {
    /// Borrow the command as a concrete type
    pub fn downcast_ref<T: Command>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Take the command as a concrete type
    pub fn downcast<T: Command>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }

    /// Whether the command is of type `T`
    pub fn is<T: Command>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

fn param_error(index: usize, field: &FieldDesc, err: impl fmt::Display) -> Error {
    Error::new(
        ErrorCode::InvalidType,
        format!(
            "parameter #{} '{}' must be type {}: {}",
            index + 1,
            field.name,
            field.type_name,
            err
        ),
    )
}

/// Encode a required field
#[doc(hidden)]
pub fn encode_field<T: Serialize>(value: &T, index: usize, field: &FieldDesc) -> Result<Option<Value>> {
    serde_json::to_value(value)
        .map(Some)
        .map_err(|e| param_error(index, field, e))
}

/// Encode an optional field, leaving `None` absent
#[doc(hidden)]
pub fn encode_optional<T: Serialize>(
    value: &Option<T>,
    index: usize,
    field: &FieldDesc,
) -> Result<Option<Value>> {
    match value {
        Some(v) => encode_field(v, index, field),
        None => Ok(None),
    }
}

/// Decode a required field; an absent slot is decoded as `null`
#[doc(hidden)]
pub fn decode_required<T: DeserializeOwned>(
    value: Option<Value>,
    index: usize,
    field: &FieldDesc,
) -> Result<T> {
    serde_json::from_value(value.unwrap_or(Value::Null)).map_err(|e| param_error(index, field, e))
}

/// Decode an optional field; an absent slot or `null` is `None`
#[doc(hidden)]
pub fn decode_optional<T: DeserializeOwned>(
    value: Option<Value>,
    index: usize,
    field: &FieldDesc,
) -> Result<Option<T>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(|e| param_error(index, field, e)),
    }
}

type DecodeFn = fn(Vec<Option<Value>>) -> Result<Box<dyn AnyCommand>>;

fn decode_boxed<C: Command>(params: Vec<Option<Value>>) -> Result<Box<dyn AnyCommand>> {
    Ok(Box::new(C::from_params(params)?))
}

/// Registered metadata for one method
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    method: String,
    flags: UsageFlag,
    description: Option<&'static str>,
    fields: &'static [FieldDesc],
    defaults: Vec<Option<Value>>,
    num_required: usize,
    usage: String,
    decode: DecodeFn,
}

impl MethodDescriptor {
    /// Method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Usage flags
    pub fn flags(&self) -> UsageFlag {
        self.flags
    }

    /// One-line description, if documented
    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    /// Parameter table in wire order
    pub fn fields(&self) -> &'static [FieldDesc] {
        self.fields
    }

    /// Parsed default for the parameter at `index`
    pub fn default_at(&self, index: usize) -> Option<&Value> {
        self.defaults.get(index).and_then(Option::as_ref)
    }

    /// Number of parameters that must be supplied
    pub fn num_required(&self) -> usize {
        self.num_required
    }

    /// Total number of parameters
    pub fn num_params(&self) -> usize {
        self.fields.len()
    }

    /// One-line usage text
    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub(crate) fn decode(&self, params: Vec<Option<Value>>) -> Result<Box<dyn AnyCommand>> {
        (self.decode)(params)
    }

    pub(crate) fn check_num_params(&self, received: usize) -> Result<()> {
        if received < self.num_required || received > self.fields.len() {
            let expected = if self.num_required == self.fields.len() {
                format!("{}", self.num_required)
            } else {
                format!("between {} and {}", self.num_required, self.fields.len())
            };
            return Err(Error::new(
                ErrorCode::NumParams,
                format!(
                    "wrong number of params (expected {}, received {})",
                    expected, received
                ),
            ));
        }
        Ok(())
    }
}

/// Table of registered commands
///
/// Cheap to clone; the tables are shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    methods: Arc<HashMap<String, MethodDescriptor>>,
    types: Arc<HashMap<TypeId, String>>,
}

impl Registry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Descriptor for a method
    pub fn descriptor(&self, method: &str) -> Option<&MethodDescriptor> {
        self.methods.get(method)
    }

    /// Check if a method is registered
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Registered method names, in no particular order
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Number of registered methods
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub(crate) fn lookup(&self, method: &str) -> Result<&MethodDescriptor> {
        self.methods.get(method).ok_or_else(|| {
            Error::new(
                ErrorCode::UnregisteredMethod,
                format!("method '{}' is not registered", method),
            )
        })
    }

    pub(crate) fn lookup_type(&self, cmd: &dyn AnyCommand) -> Result<&MethodDescriptor> {
        let type_id = cmd.as_any().type_id();
        self.types
            .get(&type_id)
            .and_then(|method| self.methods.get(method))
            .ok_or_else(|| {
                Error::new(
                    ErrorCode::UnregisteredMethod,
                    format!("{:?} is not registered", cmd.method()),
                )
            })
    }
}

/// Builder for constructing a registry
///
/// Each registration validates the command's field table and fails on the
/// first problem found.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    methods: HashMap<String, MethodDescriptor>,
    types: HashMap<TypeId, String>,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `C` under its declared method name and flags
    pub fn register<C: Command>(self) -> Result<Self> {
        self.register_with::<C>(C::METHOD, C::FLAGS)
    }

    /// Register `C` under an explicit method name and flags
    pub fn register_with<C: Command>(mut self, method: impl Into<String>, flags: UsageFlag) -> Result<Self> {
        let method = method.into();
        if self.methods.contains_key(&method) {
            return Err(Error::new(
                ErrorCode::DuplicateMethod,
                format!("method {:?} is already registered", method),
            ));
        }
        if flags.has_unknown_bits() {
            return Err(Error::new(
                ErrorCode::InvalidUsageFlags,
                format!("invalid usage flags specified for method {}: {}", method, flags),
            ));
        }

        let fields = C::fields();
        let (defaults, num_required) = validate_fields(fields)?;
        let usage = help::method_usage(&method, fields);
        tracing::debug!(
            method = %method,
            fields = fields.len(),
            required = num_required,
            flags = %flags,
            "registered command"
        );

        self.types.insert(TypeId::of::<C>(), method.clone());
        self.methods.insert(
            method.clone(),
            MethodDescriptor {
                method,
                flags,
                description: C::DESCRIPTION,
                fields,
                defaults,
                num_required,
                usage,
                decode: decode_boxed::<C>,
            },
        );
        Ok(self)
    }

    /// Build the registry
    pub fn build(self) -> Registry {
        tracing::debug!(methods = self.methods.len(), "built command registry");
        Registry {
            methods: Arc::new(self.methods),
            types: Arc::new(self.types),
        }
    }
}

fn validate_fields(fields: &[FieldDesc]) -> Result<(Vec<Option<Value>>, usize)> {
    let mut defaults = Vec::with_capacity(fields.len());
    let mut seen = HashSet::new();
    let mut num_optional = 0;

    for (i, field) in fields.iter().enumerate() {
        let n = i + 1;
        if field.name.is_empty() {
            return Err(Error::new(
                ErrorCode::UnexportedField,
                format!("field #{} has no name", n),
            ));
        }
        if !seen.insert(field.name) {
            return Err(Error::new(
                ErrorCode::EmbeddedType,
                format!("field #{} '{}' duplicates an earlier field", n, field.name),
            ));
        }
        if field.optional {
            num_optional += 1;
        } else if num_optional > 0 {
            return Err(Error::new(
                ErrorCode::NonOptionalField,
                format!(
                    "parameter #{} '{}' must be optional since it follows an optional parameter",
                    n, field.name
                ),
            ));
        }

        let default = match field.default {
            None => None,
            Some(_) if !field.optional => {
                return Err(Error::new(
                    ErrorCode::NonOptionalDefault,
                    format!("required parameter #{} '{}' cannot have a default value", n, field.name),
                ));
            }
            Some(text) => {
                let value = serde_json::from_str::<Value>(text)
                    .ok()
                    .filter(|v| (field.accepts)(v))
                    .ok_or_else(|| {
                        Error::new(
                            ErrorCode::MismatchedDefault,
                            format!(
                                "default value of parameter #{} '{}' is not of type {}",
                                n, field.name, field.type_name
                            ),
                        )
                    })?;
                Some(value)
            }
        };
        defaults.push(default);
    }

    Ok((defaults, fields.len() - num_optional))
}
