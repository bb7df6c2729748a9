//! Command marshaling
//!
//! Converts typed commands to JSON-RPC requests and back, using the field
//! tables held by a [`Registry`].
//!
//! # Positional Parameters
//!
//! Parameters are written as a JSON array in field order. Trailing absent
//! optional parameters are left off entirely, while an absent optional
//! parameter followed by a present one is written as `null`:
//!
//! ```text
//! listsinceblock(None, Some(1), Some(false))  ->  [null,1,false]
//! listsinceblock(Some("h"), None, None)       ->  ["h"]
//! ```
//!
//! On decode, a `null` in an optional position and a missing trailing
//! parameter are treated alike: the declared default is applied, or the
//! field is left unset when there is none.
//!
//! # Loose Construction
//!
//! [`Registry::new_cmd`] builds a command from loosely typed JSON values, the
//! way a command-line front end would. It applies the same count and type
//! checks as decoding, but also accepts strings that parse as JSON for
//! non-string fields, and it never applies defaults, so the result encodes
//! to the same bytes as the equivalent typed constructor call.
//!
//! # Examples
//!
//! ```rust
//! use pinjson_core::{Command, Registry, RpcVersion};
//! use pinjson_macros::Command;
//!
//! #[derive(Debug, Clone, PartialEq, Command)]
//! #[command(method = "getblock")]
//! struct GetBlockCmd {
//!     hash: String,
//!     #[param(default = "1")]
//!     verbosity: Option<i32>,
//! }
//!
//! let registry = Registry::builder().register::<GetBlockCmd>().unwrap().build();
//!
//! let cmd = GetBlockCmd { hash: "123".into(), verbosity: None };
//! let bytes = registry.marshal_cmd(RpcVersion::V1, 1i64, &cmd).unwrap();
//! assert_eq!(bytes, br#"{"jsonrpc":"1.0","method":"getblock","params":["123"],"id":1}"#);
//!
//! let decoded = registry.unmarshal_bytes(&bytes).unwrap();
//! let decoded = decoded.downcast_ref::<GetBlockCmd>().unwrap();
//! assert_eq!(decoded.verbosity, Some(1));
//! ```

use crate::error::{Error, ErrorCode, Result};
use crate::registry::{AnyCommand, FieldDesc, FieldKind, MethodDescriptor, Registry};
use crate::types::{Id, Request, RpcVersion};
use crate::unions::json_kind;
use serde::Serialize;
use serde_json::Value;

/// Encode a loosely typed argument for [`Registry::new_cmd`]
pub fn to_arg<T: Serialize + ?Sized>(arg: &T) -> Result<Value> {
    serde_json::to_value(arg)
        .map_err(|e| Error::new(ErrorCode::InvalidType, format!("unmarshalable argument: {}", e)))
}

impl Registry {
    /// Build the request object for a command
    ///
    /// The method is taken from the registration of the command's concrete
    /// type, not from the command itself.
    pub fn marshal_request(
        &self,
        version: RpcVersion,
        id: impl Into<Id>,
        cmd: &dyn AnyCommand,
    ) -> Result<Request> {
        let desc = self.lookup_type(cmd)?;
        let params = positional_params(desc, cmd.params()?)?;

        tracing::trace!(method = %desc.method(), params = params.len(), "marshaled command");

        Ok(Request::new(version, id, desc.method(), params))
    }

    /// Encode a command as request bytes
    pub fn marshal_cmd(
        &self,
        version: RpcVersion,
        id: impl Into<Id>,
        cmd: &dyn AnyCommand,
    ) -> Result<Vec<u8>> {
        let request = self.marshal_request(version, id, cmd)?;
        serde_json::to_vec(&request)
            .map_err(|e| Error::new(ErrorCode::InvalidType, format!("unmarshalable request: {}", e)))
    }

    /// Decode a request into its typed command
    ///
    /// Fails with `UnregisteredMethod` for unknown methods, `NumParams` when
    /// the parameter count is out of range and `InvalidType` when a
    /// parameter does not decode. Partial results are never returned.
    pub fn unmarshal_cmd(&self, request: &Request) -> Result<Box<dyn AnyCommand>> {
        let desc = self.lookup(&request.method)?;
        desc.check_num_params(request.params.len())?;

        let slots = desc
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| match request.params.get(i) {
                Some(Value::Null) if field.optional => desc.default_at(i).cloned(),
                Some(value) => Some(value.clone()),
                None => desc.default_at(i).cloned(),
            })
            .collect();

        tracing::trace!(
            method = %desc.method(),
            params = request.params.len(),
            "unmarshaled command"
        );

        desc.decode(slots)
    }

    /// Parse request bytes and decode the command they carry
    pub fn unmarshal_bytes(&self, bytes: &[u8]) -> Result<Box<dyn AnyCommand>> {
        let request: Request = serde_json::from_slice(bytes).map_err(|e| {
            Error::new(ErrorCode::InvalidType, format!("malformed request: {}", e))
        })?;
        self.unmarshal_cmd(&request)
    }

    /// Build a command from loosely typed arguments
    ///
    /// Each argument is checked against its field: `null` (or the string
    /// `"null"`) leaves an optional field unset. For fields that are not
    /// plain strings, a string argument that parses as JSON the field
    /// accepts is used in parsed form. Otherwise the argument must be
    /// accepted as-is. Defaults are not applied.
    pub fn new_cmd(&self, method: &str, args: Vec<Value>) -> Result<Box<dyn AnyCommand>> {
        let desc = self.lookup(method)?;
        desc.check_num_params(args.len())?;

        let fields = desc.fields();
        let mut slots = Vec::with_capacity(fields.len());
        for (i, (arg, field)) in args.into_iter().zip(fields).enumerate() {
            slots.push(coerce_arg(i, field, arg)?);
        }
        slots.resize(fields.len(), None);

        tracing::trace!(method = %method, "constructed command");

        desc.decode(slots)
    }
}

fn positional_params(desc: &MethodDescriptor, slots: Vec<Option<Value>>) -> Result<Vec<Value>> {
    let fields = desc.fields();
    if slots.len() != fields.len() {
        return Err(Error::new(
            ErrorCode::InvalidType,
            format!(
                "{} encoded {} fields but declares {}",
                desc.method(),
                slots.len(),
                fields.len()
            ),
        ));
    }
    for (i, (slot, field)) in slots.iter().zip(fields).enumerate() {
        if slot.is_none() && !field.optional {
            return Err(Error::new(
                ErrorCode::InvalidType,
                format!("parameter #{} '{}' is required but not set", i + 1, field.name),
            ));
        }
    }

    let present = slots.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
    Ok(slots
        .into_iter()
        .take(present)
        .map(|slot| slot.unwrap_or(Value::Null))
        .collect())
}

fn coerce_arg(index: usize, field: &FieldDesc, arg: Value) -> Result<Option<Value>> {
    if field.optional && (arg.is_null() || arg.as_str() == Some("null")) {
        return Ok(None);
    }
    // Non-string fields read string arguments as JSON first, so "123"
    // is a height before it is a hash.
    if field.kind != FieldKind::String {
        if let Value::String(text) = &arg {
            if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                if (field.accepts)(&parsed) {
                    return Ok(Some(parsed));
                }
            }
        }
    }
    if (field.accepts)(&arg) {
        return Ok(Some(arg));
    }
    Err(Error::new(
        ErrorCode::InvalidType,
        format!(
            "parameter #{} '{}' must be type {} (got {})",
            index + 1,
            field.name,
            field.type_name,
            json_kind(&arg)
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{accepts, decode_optional, decode_required, encode_field, encode_optional};
    use crate::registry::Command;
    use serde_json::json;

    // Hand-written so the codec can be tested without the derive.
    #[derive(Debug, Clone, PartialEq)]
    struct ListSinceBlockCmd {
        block_hash: Option<String>,
        target_confirmations: Option<i64>,
        include_watch_only: Option<bool>,
    }

    static LIST_SINCE_BLOCK_FIELDS: &[FieldDesc] = &[
        FieldDesc {
            name: "block_hash",
            type_name: "String",
            kind: FieldKind::String,
            optional: true,
            default: None,
            usage: None,
            description: None,
            accepts: accepts::<String>,
        },
        FieldDesc {
            name: "target_confirmations",
            type_name: "i64",
            kind: FieldKind::Numeric,
            optional: true,
            default: Some("1"),
            usage: None,
            description: None,
            accepts: accepts::<i64>,
        },
        FieldDesc {
            name: "include_watch_only",
            type_name: "bool",
            kind: FieldKind::Boolean,
            optional: true,
            default: Some("false"),
            usage: None,
            description: None,
            accepts: accepts::<bool>,
        },
    ];

    impl Command for ListSinceBlockCmd {
        const METHOD: &'static str = "listsinceblock";

        fn fields() -> &'static [FieldDesc] {
            LIST_SINCE_BLOCK_FIELDS
        }

        fn to_params(&self) -> Result<Vec<Option<Value>>> {
            let f = Self::fields();
            Ok(vec![
                encode_optional(&self.block_hash, 0, &f[0])?,
                encode_optional(&self.target_confirmations, 1, &f[1])?,
                encode_optional(&self.include_watch_only, 2, &f[2])?,
            ])
        }

        fn from_params(params: Vec<Option<Value>>) -> Result<Self> {
            let f = Self::fields();
            let mut it = params.into_iter();
            Ok(Self {
                block_hash: decode_optional(it.next().flatten(), 0, &f[0])?,
                target_confirmations: decode_optional(it.next().flatten(), 1, &f[1])?,
                include_watch_only: decode_optional(it.next().flatten(), 2, &f[2])?,
            })
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct GetBlockHashCmd {
        index: i64,
    }

    static GET_BLOCK_HASH_FIELDS: &[FieldDesc] = &[FieldDesc {
        name: "index",
        type_name: "i64",
        kind: FieldKind::Numeric,
        optional: false,
        default: None,
        usage: None,
        description: None,
        accepts: accepts::<i64>,
    }];

    impl Command for GetBlockHashCmd {
        const METHOD: &'static str = "getblockhash";

        fn fields() -> &'static [FieldDesc] {
            GET_BLOCK_HASH_FIELDS
        }

        fn to_params(&self) -> Result<Vec<Option<Value>>> {
            Ok(vec![encode_field(&self.index, 0, &Self::fields()[0])?])
        }

        fn from_params(params: Vec<Option<Value>>) -> Result<Self> {
            let mut it = params.into_iter();
            Ok(Self {
                index: decode_required(it.next().flatten(), 0, &Self::fields()[0])?,
            })
        }
    }

    fn registry() -> Registry {
        Registry::builder()
            .register::<ListSinceBlockCmd>()
            .unwrap()
            .register::<GetBlockHashCmd>()
            .unwrap()
            .build()
    }

    fn marshal(registry: &Registry, cmd: &dyn AnyCommand) -> String {
        String::from_utf8(registry.marshal_cmd(RpcVersion::V1, 1i64, cmd).unwrap()).unwrap()
    }

    #[test]
    fn test_marshal_truncates_trailing_absent() {
        let r = registry();
        let cmd = ListSinceBlockCmd {
            block_hash: Some("123".into()),
            target_confirmations: None,
            include_watch_only: None,
        };
        assert_eq!(
            marshal(&r, &cmd),
            r#"{"jsonrpc":"1.0","method":"listsinceblock","params":["123"],"id":1}"#
        );

        let cmd = ListSinceBlockCmd {
            block_hash: None,
            target_confirmations: None,
            include_watch_only: None,
        };
        assert_eq!(
            marshal(&r, &cmd),
            r#"{"jsonrpc":"1.0","method":"listsinceblock","params":[],"id":1}"#
        );
    }

    #[test]
    fn test_marshal_interior_null() {
        let r = registry();
        let cmd = ListSinceBlockCmd {
            block_hash: None,
            target_confirmations: Some(1),
            include_watch_only: Some(false),
        };
        assert_eq!(
            marshal(&r, &cmd),
            r#"{"jsonrpc":"1.0","method":"listsinceblock","params":[null,1,false],"id":1}"#
        );
    }

    #[test]
    fn test_unmarshal_applies_defaults() {
        let r = registry();
        let req = Request::new(RpcVersion::V1, 1i64, "listsinceblock", vec![json!("123")]);
        let cmd = r.unmarshal_cmd(&req).unwrap();
        assert_eq!(
            cmd.downcast_ref::<ListSinceBlockCmd>().unwrap(),
            &ListSinceBlockCmd {
                block_hash: Some("123".into()),
                target_confirmations: Some(1),
                include_watch_only: Some(false),
            }
        );
    }

    #[test]
    fn test_interior_null_matches_omission() {
        let r = registry();
        let with_null = Request::new(
            RpcVersion::V1,
            1i64,
            "listsinceblock",
            vec![json!("h"), Value::Null, json!(true)],
        );
        let cmd = r.unmarshal_cmd(&with_null).unwrap();
        let cmd = cmd.downcast_ref::<ListSinceBlockCmd>().unwrap();
        assert_eq!(cmd.target_confirmations, Some(1));
        assert_eq!(cmd.include_watch_only, Some(true));

        // An optional field with no default stays unset.
        let leading_null = Request::new(RpcVersion::V1, 1i64, "listsinceblock", vec![Value::Null]);
        let cmd = r.unmarshal_cmd(&leading_null).unwrap();
        assert_eq!(cmd.downcast_ref::<ListSinceBlockCmd>().unwrap().block_hash, None);
    }

    #[test]
    fn test_unmarshal_errors() {
        let r = registry();

        let req = Request::new(RpcVersion::V1, 1i64, "bogus", vec![]);
        assert_eq!(r.unmarshal_cmd(&req).unwrap_err().code, ErrorCode::UnregisteredMethod);

        let req = Request::new(RpcVersion::V1, 1i64, "getblockhash", vec![]);
        assert_eq!(r.unmarshal_cmd(&req).unwrap_err().code, ErrorCode::NumParams);

        let req = Request::new(RpcVersion::V1, 1i64, "getblockhash", vec![json!("x")]);
        let err = r.unmarshal_cmd(&req).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidType);
        assert!(err.description.contains("'index'"));
    }

    #[test]
    fn test_unmarshal_bytes() {
        let r = registry();
        let cmd = r
            .unmarshal_bytes(br#"{"jsonrpc":"1.0","method":"getblockhash","params":[5],"id":1}"#)
            .unwrap();
        assert_eq!(
            cmd.downcast_ref::<GetBlockHashCmd>(),
            Some(&GetBlockHashCmd { index: 5 })
        );
        assert!(r.unmarshal_bytes(b"{").is_err());
    }

    #[test]
    fn test_marshal_unregistered_type() {
        let r = Registry::builder().register::<GetBlockHashCmd>().unwrap().build();
        let cmd = ListSinceBlockCmd {
            block_hash: None,
            target_confirmations: None,
            include_watch_only: None,
        };
        let err = r.marshal_cmd(RpcVersion::V1, 1i64, &cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnregisteredMethod);
    }

    #[test]
    fn test_marshal_uses_registered_name() {
        let r = Registry::builder()
            .register_with::<GetBlockHashCmd>("blockhash", crate::UsageFlag::NONE)
            .unwrap()
            .build();
        let bytes = marshal(&r, &GetBlockHashCmd { index: 2 });
        assert_eq!(bytes, r#"{"jsonrpc":"1.0","method":"blockhash","params":[2],"id":1}"#);
    }

    #[test]
    fn test_new_cmd_coercion() {
        let r = registry();

        let cmd = r.new_cmd("getblockhash", vec![json!("12")]).unwrap();
        assert_eq!(cmd.downcast_ref::<GetBlockHashCmd>().unwrap().index, 12);

        // A string field keeps numeric-looking text as a string
        let cmd = r.new_cmd("listsinceblock", vec![json!("123")]).unwrap();
        assert_eq!(
            cmd.downcast_ref::<ListSinceBlockCmd>().unwrap().block_hash.as_deref(),
            Some("123")
        );

        let cmd = r
            .new_cmd("listsinceblock", vec![json!("null"), json!(6)])
            .unwrap();
        assert_eq!(
            cmd.downcast_ref::<ListSinceBlockCmd>().unwrap(),
            &ListSinceBlockCmd {
                block_hash: None,
                target_confirmations: Some(6),
                include_watch_only: None,
            }
        );
    }

    #[test]
    fn test_new_cmd_errors() {
        let r = registry();

        let err = r.new_cmd("getblockhash", vec![json!(true)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidType);
        assert_eq!(
            err.description,
            "parameter #1 'index' must be type i64 (got bool)"
        );

        let err = r.new_cmd("getblockhash", vec![json!(1), json!(2)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::NumParams);

        let err = r.new_cmd("nope", vec![]).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnregisteredMethod);
    }

    #[test]
    fn test_to_arg() {
        assert_eq!(to_arg("abc").unwrap(), json!("abc"));
        assert_eq!(to_arg(&Some(3)).unwrap(), json!(3));
        assert_eq!(to_arg(&None::<i32>).unwrap(), Value::Null);
    }
}
