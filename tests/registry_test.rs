//! Default registry, error and help tests

use pinjson::chainsvr::GetBlockHashCmd;
use pinjson::{new_cmd, ErrorCode, Request};

fn request(text: &str) -> Request {
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_new_cmd_errors() {
    let err = new_cmd!("boguscommand").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnregisteredMethod);

    let err = new_cmd!("getblockcount", "extra").unwrap_err();
    assert_eq!(err.code, ErrorCode::NumParams);

    // getblock takes one or two parameters
    let err = new_cmd!("getblock").unwrap_err();
    assert_eq!(err.code, ErrorCode::NumParams);
    let err = new_cmd!("getblock", "123", 1, true).unwrap_err();
    assert_eq!(err.code, ErrorCode::NumParams);

    let err = new_cmd!("getblockhash", "not a number").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidType);

    let err = new_cmd!("getbalance", "acct", true).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidType);
}

#[test]
fn test_unmarshal_errors() {
    let req = request(r#"{"jsonrpc":"1.0","method":"invalidmethod","params":[],"id":1}"#);
    assert_eq!(pinjson::unmarshal_cmd(&req).unwrap_err().code, ErrorCode::UnregisteredMethod);

    let req = request(r#"{"jsonrpc":"1.0","method":"getblockcount","params":["123"],"id":1}"#);
    assert_eq!(pinjson::unmarshal_cmd(&req).unwrap_err().code, ErrorCode::NumParams);

    let req = request(r#"{"jsonrpc":"1.0","method":"getblockhash","params":["1"],"id":1}"#);
    assert_eq!(pinjson::unmarshal_cmd(&req).unwrap_err().code, ErrorCode::InvalidType);

    let req = request(r#"{"jsonrpc":"1.0","method":"getblockhash","params":[],"id":1}"#);
    assert_eq!(pinjson::unmarshal_cmd(&req).unwrap_err().code, ErrorCode::NumParams);
}

#[test]
fn test_unmarshal_bytes_rejects_garbage() {
    let err = pinjson::unmarshal_bytes(b"not json").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidType);
}

#[test]
fn test_errors_convert_to_rpc_errors() {
    let err = new_cmd!("boguscommand").unwrap_err();
    let rpc: pinjson::RpcError = err.into();
    assert_eq!(rpc.code, pinjson::core::RpcErrorCode::METHOD_NOT_FOUND);
}

#[test]
fn test_method_usage_text() {
    assert_eq!(
        pinjson::method_usage_text("getblock").unwrap(),
        r#"getblock "hash" (verbosity=1)"#
    );
    assert_eq!(pinjson::method_usage_text("getblockcount").unwrap(), "getblockcount");
    assert_eq!(pinjson::method_usage_text("getblockhash").unwrap(), "getblockhash index");

    let err = pinjson::method_usage_text("boguscommand").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnregisteredMethod);
}

#[test]
fn test_generate_help() {
    let help = pinjson::generate_help("getblockhash").unwrap();
    let expected = "getblockhash index\n\
                    \n\
                    Returns hash of the block in best block chain at the given height.\n\
                    \n\
                    Arguments:\n\
                    1. index (numeric, required) The block height\n";
    assert_eq!(help, expected);

    let help = pinjson::generate_help("getblock").unwrap();
    assert!(help.starts_with("getblock \"hash\" (verbosity=1)\n"));
    assert!(help.contains("2. verbosity (numeric, optional, default=1)"));

    let help = pinjson::generate_help("getblockcount").unwrap();
    assert!(help.ends_with("Arguments:\nNone\n"));
}

#[test]
fn test_generate_help_requires_descriptions() {
    let err = pinjson::generate_help("blockconnected").unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingDescription);

    let err = pinjson::generate_help("boguscommand").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnregisteredMethod);
}

#[test]
fn test_registered_methods_sorted() {
    let methods = pinjson::registered_methods().unwrap();
    assert!(methods.windows(2).all(|w| w[0] < w[1]));
    for method in ["getblock", "walletlock", "txacceptedverbose", "version"] {
        assert!(methods.contains(&method), "{} missing", method);
    }
}

#[test]
fn test_cmd_method() {
    let cmd = GetBlockHashCmd::new(1);
    assert_eq!(pinjson::cmd_method(&cmd).unwrap(), "getblockhash");
}
