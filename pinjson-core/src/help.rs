//! Usage and help text
//!
//! Usage lines are derived from a command's field table when it is
//! registered. Required parameters come first, then optional ones in
//! parentheses:
//!
//! ```text
//! getblock "hash" (verbosity=1)
//! createrawtransaction [{"txid":"id","vout":n},...] {"address":amount,...} (locktime)
//! ```

use crate::error::{Error, ErrorCode, Result};
use crate::registry::{AnyCommand, FieldDesc, FieldKind, Registry, UsageFlag};
use std::fmt::Write;

fn display_name(field: &FieldDesc) -> String {
    field.name.replace('_', "").to_lowercase()
}

fn singular(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = name.strip_suffix("es") {
        stem.to_string()
    } else if let Some(stem) = name.strip_suffix('s') {
        stem.to_string()
    } else {
        name.to_string()
    }
}

fn field_usage(field: &FieldDesc) -> String {
    if let Some(usage) = field.usage {
        return usage.to_string();
    }
    let name = display_name(field);
    match (field.kind, field.default) {
        (_, Some(default)) => format!("{}={}", name, default),
        (FieldKind::String, None) => format!("\"{}\"", name),
        (FieldKind::Array(FieldKind::String), None) => format!("[\"{}\",...]", singular(&name)),
        (FieldKind::Array(_), None) => format!("[{},...]", singular(&name)),
        (_, None) => name,
    }
}

pub(crate) fn method_usage(method: &str, fields: &[FieldDesc]) -> String {
    let (optional, required): (Vec<_>, Vec<_>) = fields.iter().partition(|f| f.optional);

    let mut usage = method.to_string();
    for field in required {
        usage.push(' ');
        usage.push_str(&field_usage(field));
    }
    if !optional.is_empty() {
        let parts: Vec<String> = optional.into_iter().map(field_usage).collect();
        let _ = write!(usage, " ({})", parts.join(" "));
    }
    usage
}

impl Registry {
    /// One-line usage for a method
    pub fn method_usage_text(&self, method: &str) -> Result<&str> {
        Ok(self.lookup(method)?.usage())
    }

    /// Usage flags a method was registered with
    pub fn method_usage_flags(&self, method: &str) -> Result<UsageFlag> {
        Ok(self.lookup(method)?.flags())
    }

    /// Method a command's concrete type was registered under
    pub fn cmd_method(&self, cmd: &dyn AnyCommand) -> Result<&str> {
        Ok(self.lookup_type(cmd)?.method())
    }

    /// Every registered method, sorted
    pub fn registered_methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.methods().collect();
        methods.sort_unstable();
        methods
    }

    /// Full help text for a method
    ///
    /// Every parameter and the method itself must carry a description,
    /// otherwise `MissingDescription` is returned.
    pub fn generate_help(&self, method: &str) -> Result<String> {
        let desc = self.lookup(method)?;
        let description = desc.description().ok_or_else(|| {
            Error::new(
                ErrorCode::MissingDescription,
                format!("no description for method '{}'", method),
            )
        })?;

        let fields = desc.fields();
        let width = fields.iter().map(|f| display_name(f).len()).max().unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{}", desc.usage());
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", description);
        let _ = writeln!(out);
        let _ = writeln!(out, "Arguments:");
        if fields.is_empty() {
            let _ = writeln!(out, "None");
        }
        for (i, field) in fields.iter().enumerate() {
            let text = field.description.ok_or_else(|| {
                Error::new(
                    ErrorCode::MissingDescription,
                    format!(
                        "no description for parameter #{} '{}' of method '{}'",
                        i + 1,
                        field.name,
                        method
                    ),
                )
            })?;
            let presence = match (field.optional, desc.default_at(i)) {
                (false, _) => "required".to_string(),
                (true, None) => "optional".to_string(),
                (true, Some(default)) => format!("optional, default={}", default),
            };
            let _ = writeln!(
                out,
                "{}. {:<width$} ({}, {}) {}",
                i + 1,
                display_name(field),
                field.kind,
                presence,
                text,
                width = width
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::accepts;

    fn desc(
        name: &'static str,
        kind: FieldKind,
        optional: bool,
        default: Option<&'static str>,
    ) -> FieldDesc {
        FieldDesc {
            name,
            type_name: "T",
            kind,
            optional,
            default,
            usage: None,
            description: None,
            accepts: accepts::<serde_json::Value>,
        }
    }

    #[test]
    fn test_field_usage_forms() {
        let cases = [
            (desc("hash", FieldKind::String, false, None), "\"hash\""),
            (desc("verbosity", FieldKind::Numeric, true, Some("1")), "verbosity=1"),
            (desc("sig_hash_type", FieldKind::String, true, Some("\"ALL\"")), "sighashtype=\"ALL\""),
            (desc("addresses", FieldKind::Array(&FieldKind::String), false, None), "[\"address\",...]"),
            (desc("keys", FieldKind::Array(&FieldKind::String), false, None), "[\"key\",...]"),
            (desc("txids", FieldKind::Array(&FieldKind::Object), false, None), "[txid,...]"),
            (desc("entries", FieldKind::Array(&FieldKind::Numeric), false, None), "[entry,...]"),
            (desc("min_conf", FieldKind::Numeric, true, None), "minconf"),
        ];
        for (field, want) in cases {
            assert_eq!(field_usage(&field), want);
        }

        let mut overridden = desc("amounts", FieldKind::Object, false, None);
        overridden.usage = Some("{\"address\":amount,...}");
        assert_eq!(field_usage(&overridden), "{\"address\":amount,...}");
    }

    #[test]
    fn test_method_usage_layout() {
        let fields = [
            desc("hash", FieldKind::String, false, None),
            desc("verbosity", FieldKind::Numeric, true, Some("1")),
            desc("extra", FieldKind::Boolean, true, None),
        ];
        assert_eq!(method_usage("getblock", &fields), "getblock \"hash\" (verbosity=1 extra)");
        assert_eq!(method_usage("ping", &[]), "ping");
    }

    #[test]
    fn test_singular() {
        assert_eq!(singular("entries"), "entry");
        assert_eq!(singular("addresses"), "address");
        assert_eq!(singular("keys"), "key");
        assert_eq!(singular("data"), "data");
    }
}
