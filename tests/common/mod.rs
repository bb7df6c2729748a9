//! Common test utilities for pinjson integration tests
//!
//! Every golden case is checked three ways against the default registry:
//! the directly constructed command must marshal to the golden bytes, the
//! command built by `new_cmd!` must marshal to the same bytes, and decoding
//! those bytes must yield the expected command with defaults applied.

#![allow(dead_code)]

use pinjson::core::{AnyCommand, Command, Id, Request, RpcVersion};

/// Id used for ordinary command cases
pub const TEST_ID: i64 = 1;

/// Check one command case, sent with id 1
pub fn check_cmd<T: Command + PartialEq>(
    name: &str,
    static_cmd: T,
    generic: pinjson::Result<Box<dyn AnyCommand>>,
    marshalled: &str,
    expected: T,
) {
    check_with_id(name, Id::Number(TEST_ID), static_cmd, generic, marshalled, expected);
}

/// Check one notification case, sent with a null id
pub fn check_ntfn<T: Command + PartialEq>(
    name: &str,
    static_ntfn: T,
    generic: pinjson::Result<Box<dyn AnyCommand>>,
    marshalled: &str,
    expected: T,
) {
    check_with_id(name, Id::Null, static_ntfn, generic, marshalled, expected);
}

fn check_with_id<T: Command + PartialEq>(
    name: &str,
    id: Id,
    static_cmd: T,
    generic: pinjson::Result<Box<dyn AnyCommand>>,
    marshalled: &str,
    expected: T,
) {
    // Direct construction
    let bytes = pinjson::marshal_cmd(RpcVersion::V1, id.clone(), &static_cmd)
        .unwrap_or_else(|e| panic!("{}: marshal of static command failed: {}", name, e));
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        marshalled,
        "{}: unexpected marshalled data for static command",
        name
    );

    // Generic construction
    let generic = generic.unwrap_or_else(|e| panic!("{}: new_cmd failed: {}", name, e));
    assert!(generic.is::<T>(), "{}: new_cmd built {:?}", name, generic);
    let bytes = pinjson::marshal_cmd(RpcVersion::V1, id, generic.as_ref())
        .unwrap_or_else(|e| panic!("{}: marshal of generic command failed: {}", name, e));
    assert_eq!(
        String::from_utf8(bytes.clone()).unwrap(),
        marshalled,
        "{}: unexpected marshalled data for generic command",
        name
    );

    // Decoding
    let request: Request = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("{}: request does not parse: {}", name, e));
    let cmd = pinjson::unmarshal_cmd(&request)
        .unwrap_or_else(|e| panic!("{}: unmarshal failed: {}", name, e));
    let cmd = cmd
        .downcast::<T>()
        .unwrap_or_else(|| panic!("{}: unmarshaled into the wrong type", name));
    assert_eq!(*cmd, expected, "{}: unexpected unmarshaled command", name);
}

/// `Some(s.to_string())`
pub fn s(text: &str) -> Option<String> {
    Some(text.to_string())
}

/// Owned string vector
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
