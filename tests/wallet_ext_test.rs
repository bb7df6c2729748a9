//! Wallet extension command golden tests

mod common;

use common::check_cmd;
use pinjson::new_cmd;
use pinjson::wallet_ext::*;

#[test]
fn test_accounts() {
    check_cmd(
        "createnewaccount",
        CreateNewAccountCmd::new("acct"),
        new_cmd!("createnewaccount", "acct"),
        r#"{"jsonrpc":"1.0","method":"createnewaccount","params":["acct"],"id":1}"#,
        CreateNewAccountCmd::new("acct"),
    );
    check_cmd(
        "renameaccount",
        RenameAccountCmd::new("oldacct", "newacct"),
        new_cmd!("renameaccount", "oldacct", "newacct"),
        r#"{"jsonrpc":"1.0","method":"renameaccount","params":["oldacct","newacct"],"id":1}"#,
        RenameAccountCmd::new("oldacct", "newacct"),
    );
}

#[test]
fn test_wallet_files() {
    check_cmd(
        "dumpwallet",
        DumpWalletCmd::new("filename"),
        new_cmd!("dumpwallet", "filename"),
        r#"{"jsonrpc":"1.0","method":"dumpwallet","params":["filename"],"id":1}"#,
        DumpWalletCmd::new("filename"),
    );
    check_cmd(
        "importwallet",
        ImportWalletCmd::new("filename"),
        new_cmd!("importwallet", "filename"),
        r#"{"jsonrpc":"1.0","method":"importwallet","params":["filename"],"id":1}"#,
        ImportWalletCmd::new("filename"),
    );
}

#[test]
fn test_watch_only_imports() {
    check_cmd(
        "importaddress",
        ImportAddressCmd::new("1Address", "", None),
        new_cmd!("importaddress", "1Address", ""),
        r#"{"jsonrpc":"1.0","method":"importaddress","params":["1Address",""],"id":1}"#,
        ImportAddressCmd::new("1Address", "", Some(true)),
    );
    check_cmd(
        "importaddress optional",
        ImportAddressCmd::new("1Address", "acct", Some(false)),
        new_cmd!("importaddress", "1Address", "acct", false),
        r#"{"jsonrpc":"1.0","method":"importaddress","params":["1Address","acct",false],"id":1}"#,
        ImportAddressCmd::new("1Address", "acct", Some(false)),
    );
    check_cmd(
        "importpubkey",
        ImportPubKeyCmd::new("031234", None),
        new_cmd!("importpubkey", "031234"),
        r#"{"jsonrpc":"1.0","method":"importpubkey","params":["031234"],"id":1}"#,
        ImportPubKeyCmd::new("031234", Some(true)),
    );
    check_cmd(
        "importpubkey optional",
        ImportPubKeyCmd::new("031234", Some(false)),
        new_cmd!("importpubkey", "031234", false),
        r#"{"jsonrpc":"1.0","method":"importpubkey","params":["031234",false],"id":1}"#,
        ImportPubKeyCmd::new("031234", Some(false)),
    );
}

#[test]
fn test_importaddress_usage() {
    let usage = pinjson::method_usage_text("importaddress").unwrap();
    assert_eq!(usage, r#"importaddress "address" "account" (rescan=true)"#);
}
