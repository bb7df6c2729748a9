//! Procedural macros for pinjson
//!
//! This crate provides `#[derive(Command)]`, which turns a plain struct into
//! a typed RPC command. The derive generates the command's parameter table at
//! compile time, so the registry never has to inspect types at run time.
//!
//! # Field Rules
//!
//! - Fields are positional parameters, in declaration order
//! - An `Option<T>` field is optional; every other field is required
//! - `#[param(default = "<json>")]` attaches a default, applied on decode
//! - `#[param(usage = "...")]` replaces the generated usage fragment
//! - Doc comments become help descriptions, on the struct and on each field
//!
//! Only structs with named fields, or unit structs, are accepted. Tuple
//! structs, enums and generic structs are rejected at compile time, since
//! their fields cannot be addressed as named positional parameters.
//!
//! # Examples
//!
//! ```ignore
//! use pinjson_core::Command;
//! use pinjson_macros::Command;
//!
//! /// Returns the balance for an account.
//! #[derive(Debug, Clone, PartialEq, Command)]
//! #[command(method = "getbalance", wallet_only)]
//! struct GetBalanceCmd {
//!     /// Account to query
//!     account: Option<String>,
//!     /// Minimum number of confirmations
//!     #[param(default = "1")]
//!     min_conf: Option<i32>,
//! }
//! ```

mod command;

use proc_macro::TokenStream;

/// Derive `pinjson_core::Command` for a struct
///
/// # Attributes
///
/// On the struct, `#[command(...)]` takes:
///
/// - `method = "name"` (required): the method name
/// - `wallet_only`, `websocket_only`, `notification`: usage flags
///
/// On fields, `#[param(...)]` takes:
///
/// - `default = "<json>"`: default value as JSON text, e.g. `"1"` or
///   `r#""ALL""#`
/// - `usage = "..."`: usage fragment shown instead of the generated one
///
/// # Generated Code
///
/// ```ignore
/// impl pinjson_core::Command for MyCmd {
///     const METHOD: &'static str = "...";
///     const FLAGS: UsageFlag = ...;
///     const DESCRIPTION: Option<&'static str> = ...;
///     fn fields() -> &'static [FieldDesc] { ... }
///     fn to_params(&self) -> Result<Vec<Option<Value>>> { ... }
///     fn from_params(params: Vec<Option<Value>>) -> Result<Self> { ... }
/// }
/// ```
///
/// # Limitations
///
/// - Field types must implement `Serialize` and `DeserializeOwned`
/// - Defaults are checked against the field type when the command is
///   registered, not at compile time
#[proc_macro_derive(Command, attributes(command, param))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    command::derive_command_impl(input)
}
