//! Chain server websocket notification golden tests

mod common;

use common::{check_ntfn, strings};
use pinjson::chainsvr_ntfns::*;
use pinjson::new_cmd;

fn block_details() -> BlockDetails {
    BlockDetails {
        height: 100000,
        hash: "123".to_string(),
        index: 0,
        time: 12345678,
    }
}

#[test]
fn test_block_notifications() {
    check_ntfn(
        "blockconnected",
        BlockConnectedNtfn::new("123", 100000, 123456789),
        new_cmd!("blockconnected", "123", 100000, 123456789),
        r#"{"jsonrpc":"1.0","method":"blockconnected","params":["123",100000,123456789],"id":null}"#,
        BlockConnectedNtfn::new("123", 100000, 123456789),
    );
    check_ntfn(
        "blockdisconnected",
        BlockDisconnectedNtfn::new("123", 100000, 123456789),
        new_cmd!("blockdisconnected", "123", 100000, 123456789),
        r#"{"jsonrpc":"1.0","method":"blockdisconnected","params":["123",100000,123456789],"id":null}"#,
        BlockDisconnectedNtfn::new("123", 100000, 123456789),
    );
    check_ntfn(
        "filteredblockconnected",
        FilteredBlockConnectedNtfn::new(100000, "header", strings(&["tx0", "tx1"])),
        new_cmd!("filteredblockconnected", 100000, "header", ["tx0", "tx1"]),
        r#"{"jsonrpc":"1.0","method":"filteredblockconnected","params":[100000,"header",["tx0","tx1"]],"id":null}"#,
        FilteredBlockConnectedNtfn::new(100000, "header", strings(&["tx0", "tx1"])),
    );
    check_ntfn(
        "filteredblockdisconnected",
        FilteredBlockDisconnectedNtfn::new(100000, "header"),
        new_cmd!("filteredblockdisconnected", 100000, "header"),
        r#"{"jsonrpc":"1.0","method":"filteredblockdisconnected","params":[100000,"header"],"id":null}"#,
        FilteredBlockDisconnectedNtfn::new(100000, "header"),
    );
}

#[test]
fn test_transaction_notifications() {
    let details = r#"{"height":100000,"hash":"123","index":0,"time":12345678}"#;

    check_ntfn(
        "recvtx",
        RecvTxNtfn::new("001122", Some(block_details())),
        new_cmd!("recvtx", "001122", details),
        r#"{"jsonrpc":"1.0","method":"recvtx","params":["001122",{"height":100000,"hash":"123","index":0,"time":12345678}],"id":null}"#,
        RecvTxNtfn::new("001122", Some(block_details())),
    );
    check_ntfn(
        "redeemingtx",
        RedeemingTxNtfn::new("001122", Some(block_details())),
        new_cmd!("redeemingtx", "001122", details),
        r#"{"jsonrpc":"1.0","method":"redeemingtx","params":["001122",{"height":100000,"hash":"123","index":0,"time":12345678}],"id":null}"#,
        RedeemingTxNtfn::new("001122", Some(block_details())),
    );
    check_ntfn(
        "txaccepted",
        TxAcceptedNtfn::new("123", 1.5),
        new_cmd!("txaccepted", "123", 1.5),
        r#"{"jsonrpc":"1.0","method":"txaccepted","params":["123",1.5],"id":null}"#,
        TxAcceptedNtfn::new("123", 1.5),
    );

    let raw_tx = TxRawResult {
        hex: "001122".to_string(),
        txid: "123".to_string(),
        version: 1,
        lock_time: 4294967295,
        ..Default::default()
    };
    check_ntfn(
        "txacceptedverbose",
        TxAcceptedVerboseNtfn::new(raw_tx.clone()),
        new_cmd!(
            "txacceptedverbose",
            r#"{"hex":"001122","txid":"123","version":1,"locktime":4294967295,"vin":null,"vout":null,"confirmations":0}"#
        ),
        r#"{"jsonrpc":"1.0","method":"txacceptedverbose","params":[{"hex":"001122","txid":"123","version":1,"locktime":4294967295,"vin":null,"vout":null}],"id":null}"#,
        TxAcceptedVerboseNtfn::new(raw_tx),
    );
    check_ntfn(
        "relevanttxaccepted",
        RelevantTxAcceptedNtfn::new("001122"),
        new_cmd!("relevanttxaccepted", "001122"),
        r#"{"jsonrpc":"1.0","method":"relevanttxaccepted","params":["001122"],"id":null}"#,
        RelevantTxAcceptedNtfn::new("001122"),
    );
}

#[test]
fn test_rescan_notifications() {
    check_ntfn(
        "rescanfinished",
        RescanFinishedNtfn::new("123", 100000, 12345678),
        new_cmd!("rescanfinished", "123", 100000, 12345678),
        r#"{"jsonrpc":"1.0","method":"rescanfinished","params":["123",100000,12345678],"id":null}"#,
        RescanFinishedNtfn::new("123", 100000, 12345678),
    );
    check_ntfn(
        "rescanprogress",
        RescanProgressNtfn::new("123", 100000, 12345678),
        new_cmd!("rescanprogress", "123", 100000, 12345678),
        r#"{"jsonrpc":"1.0","method":"rescanprogress","params":["123",100000,12345678],"id":null}"#,
        RescanProgressNtfn::new("123", 100000, 12345678),
    );
}

#[test]
fn test_notifications_need_no_id() {
    let bytes = br#"{"jsonrpc":"1.0","method":"relevanttxaccepted","params":["001122"],"id":null}"#;
    let request: pinjson::Request = serde_json::from_slice(bytes).unwrap();
    assert!(request.id.is_null());

    let ntfn = pinjson::unmarshal_bytes(bytes).unwrap();
    assert_eq!(pinjson::cmd_method(ntfn.as_ref()).unwrap(), "relevanttxaccepted");
}
