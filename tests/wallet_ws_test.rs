//! Wallet websocket command golden tests

mod common;

use common::{check_cmd, s, strings};
use pinjson::new_cmd;
use pinjson::wallet_ws::*;

#[test]
fn test_wallet_ws_commands() {
    check_cmd(
        "createencryptedwallet",
        CreateEncryptedWalletCmd::new("pass"),
        new_cmd!("createencryptedwallet", "pass"),
        r#"{"jsonrpc":"1.0","method":"createencryptedwallet","params":["pass"],"id":1}"#,
        CreateEncryptedWalletCmd::new("pass"),
    );
    check_cmd(
        "exportwatchingwallet",
        ExportWatchingWalletCmd::new(None, None),
        new_cmd!("exportwatchingwallet"),
        r#"{"jsonrpc":"1.0","method":"exportwatchingwallet","params":[],"id":1}"#,
        ExportWatchingWalletCmd::new(None, Some(false)),
    );
    check_cmd(
        "exportwatchingwallet optional1",
        ExportWatchingWalletCmd::new(s("acct"), None),
        new_cmd!("exportwatchingwallet", "acct"),
        r#"{"jsonrpc":"1.0","method":"exportwatchingwallet","params":["acct"],"id":1}"#,
        ExportWatchingWalletCmd::new(s("acct"), Some(false)),
    );
    check_cmd(
        "exportwatchingwallet optional2",
        ExportWatchingWalletCmd::new(s("acct"), Some(true)),
        new_cmd!("exportwatchingwallet", "acct", true),
        r#"{"jsonrpc":"1.0","method":"exportwatchingwallet","params":["acct",true],"id":1}"#,
        ExportWatchingWalletCmd::new(s("acct"), Some(true)),
    );
    check_cmd(
        "getunconfirmedbalance",
        GetUnconfirmedBalanceCmd::new(None),
        new_cmd!("getunconfirmedbalance"),
        r#"{"jsonrpc":"1.0","method":"getunconfirmedbalance","params":[],"id":1}"#,
        GetUnconfirmedBalanceCmd::new(None),
    );
    check_cmd(
        "getunconfirmedbalance optional1",
        GetUnconfirmedBalanceCmd::new(s("acct")),
        new_cmd!("getunconfirmedbalance", "acct"),
        r#"{"jsonrpc":"1.0","method":"getunconfirmedbalance","params":["acct"],"id":1}"#,
        GetUnconfirmedBalanceCmd::new(s("acct")),
    );

    let addrs = strings(&["1Address"]);
    check_cmd(
        "listaddresstransactions",
        ListAddressTransactionsCmd::new(addrs.clone(), None),
        new_cmd!("listaddresstransactions", r#"["1Address"]"#),
        r#"{"jsonrpc":"1.0","method":"listaddresstransactions","params":[["1Address"]],"id":1}"#,
        ListAddressTransactionsCmd::new(addrs.clone(), None),
    );
    check_cmd(
        "listaddresstransactions optional1",
        ListAddressTransactionsCmd::new(addrs.clone(), s("acct")),
        new_cmd!("listaddresstransactions", addrs, "acct"),
        r#"{"jsonrpc":"1.0","method":"listaddresstransactions","params":[["1Address"],"acct"],"id":1}"#,
        ListAddressTransactionsCmd::new(addrs, s("acct")),
    );
    check_cmd(
        "listalltransactions",
        ListAllTransactionsCmd::new(None),
        new_cmd!("listalltransactions"),
        r#"{"jsonrpc":"1.0","method":"listalltransactions","params":[],"id":1}"#,
        ListAllTransactionsCmd::new(None),
    );
    check_cmd(
        "listalltransactions optional",
        ListAllTransactionsCmd::new(s("acct")),
        new_cmd!("listalltransactions", "acct"),
        r#"{"jsonrpc":"1.0","method":"listalltransactions","params":["acct"],"id":1}"#,
        ListAllTransactionsCmd::new(s("acct")),
    );
    check_cmd(
        "recoveraddresses",
        RecoverAddressesCmd::new("acct", 10),
        new_cmd!("recoveraddresses", "acct", 10),
        r#"{"jsonrpc":"1.0","method":"recoveraddresses","params":["acct",10],"id":1}"#,
        RecoverAddressesCmd::new("acct", 10),
    );
    check_cmd(
        "walletislocked",
        WalletIsLockedCmd,
        new_cmd!("walletislocked"),
        r#"{"jsonrpc":"1.0","method":"walletislocked","params":[],"id":1}"#,
        WalletIsLockedCmd,
    );
}

#[test]
fn test_wallet_ws_flags() {
    let flags = pinjson::method_usage_flags("walletislocked").unwrap();
    assert!(flags.contains(pinjson::UsageFlag::WALLET_ONLY));
    assert!(flags.contains(pinjson::UsageFlag::WEBSOCKET_ONLY));
    assert!(!flags.contains(pinjson::UsageFlag::NOTIFICATION));
}
