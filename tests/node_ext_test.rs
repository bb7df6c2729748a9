//! Node extension command golden tests

mod common;

use common::{check_cmd, s, strings};
use pinjson::new_cmd;
use pinjson::node_ext::*;

#[test]
fn test_debuglevel() {
    check_cmd(
        "debuglevel",
        DebugLevelCmd::new("trace"),
        new_cmd!("debuglevel", "trace"),
        r#"{"jsonrpc":"1.0","method":"debuglevel","params":["trace"],"id":1}"#,
        DebugLevelCmd::new("trace"),
    );
}

#[test]
fn test_node() {
    check_cmd(
        "node remove",
        NodeCmd::new(NodeSubCmd::Remove, "1.1.1.1", None),
        new_cmd!("node", NodeSubCmd::Remove, "1.1.1.1"),
        r#"{"jsonrpc":"1.0","method":"node","params":["remove","1.1.1.1"],"id":1}"#,
        NodeCmd::new(NodeSubCmd::Remove, "1.1.1.1", None),
    );
    check_cmd(
        "node disconnect",
        NodeCmd::new(NodeSubCmd::Disconnect, "1.1.1.1", None),
        new_cmd!("node", NodeSubCmd::Disconnect, "1.1.1.1"),
        r#"{"jsonrpc":"1.0","method":"node","params":["disconnect","1.1.1.1"],"id":1}"#,
        NodeCmd::new(NodeSubCmd::Disconnect, "1.1.1.1", None),
    );
    check_cmd(
        "node connect perm",
        NodeCmd::new(NodeSubCmd::Connect, "1.1.1.1", s("perm")),
        new_cmd!("node", NodeSubCmd::Connect, "1.1.1.1", "perm"),
        r#"{"jsonrpc":"1.0","method":"node","params":["connect","1.1.1.1","perm"],"id":1}"#,
        NodeCmd::new(NodeSubCmd::Connect, "1.1.1.1", s("perm")),
    );
    check_cmd(
        "node connect temp",
        NodeCmd::new(NodeSubCmd::Connect, "1.1.1.1", s("temp")),
        new_cmd!("node", "connect", "1.1.1.1", "temp"),
        r#"{"jsonrpc":"1.0","method":"node","params":["connect","1.1.1.1","temp"],"id":1}"#,
        NodeCmd::new(NodeSubCmd::Connect, "1.1.1.1", s("temp")),
    );
}

#[test]
fn test_generate() {
    check_cmd(
        "generate",
        GenerateCmd::new(1),
        new_cmd!("generate", 1),
        r#"{"jsonrpc":"1.0","method":"generate","params":[1],"id":1}"#,
        GenerateCmd::new(1),
    );
    check_cmd(
        "generatetoaddress",
        GenerateToAddressCmd::new(1, "1Address", None),
        new_cmd!("generatetoaddress", 1, "1Address"),
        r#"{"jsonrpc":"1.0","method":"generatetoaddress","params":[1,"1Address"],"id":1}"#,
        GenerateToAddressCmd::new(1, "1Address", Some(1000000)),
    );
}

#[test]
fn test_no_param_commands() {
    check_cmd(
        "getbestblock",
        GetBestBlockCmd,
        new_cmd!("getbestblock"),
        r#"{"jsonrpc":"1.0","method":"getbestblock","params":[],"id":1}"#,
        GetBestBlockCmd,
    );
    check_cmd(
        "getcurrentnet",
        GetCurrentNetCmd,
        new_cmd!("getcurrentnet"),
        r#"{"jsonrpc":"1.0","method":"getcurrentnet","params":[],"id":1}"#,
        GetCurrentNetCmd,
    );
    check_cmd(
        "version",
        VersionCmd,
        new_cmd!("version"),
        r#"{"jsonrpc":"1.0","method":"version","params":[],"id":1}"#,
        VersionCmd,
    );
}

#[test]
fn test_getheaders() {
    check_cmd(
        "getheaders",
        GetHeadersCmd::new(Vec::new(), ""),
        new_cmd!("getheaders", Vec::<String>::new(), ""),
        r#"{"jsonrpc":"1.0","method":"getheaders","params":[[],""],"id":1}"#,
        GetHeadersCmd::new(Vec::new(), ""),
    );

    let locators = strings(&[
        "000000000000000001f1739002418e2f9a84c47a4fd2a0eb7a787a6b7dc12f16",
        "0000000000000000026f4b7f56eef057b32167eb5ad9ff62006f1807b7336d10",
    ]);
    let stop = "000000000000000000ba33b33e1fad70b69e234fc24414dd47113bff38f523f7";
    check_cmd(
        "getheaders - with arguments",
        GetHeadersCmd::new(locators.clone(), stop),
        new_cmd!("getheaders", locators, stop),
        r#"{"jsonrpc":"1.0","method":"getheaders","params":[["000000000000000001f1739002418e2f9a84c47a4fd2a0eb7a787a6b7dc12f16","0000000000000000026f4b7f56eef057b32167eb5ad9ff62006f1807b7336d10"],"000000000000000000ba33b33e1fad70b69e234fc24414dd47113bff38f523f7"],"id":1}"#,
        GetHeadersCmd::new(locators, stop),
    );
}

#[test]
fn test_unknown_node_sub_command() {
    let err = new_cmd!("node", "reboot", "1.1.1.1").unwrap_err();
    assert_eq!(err.code, pinjson::ErrorCode::InvalidType);
}
