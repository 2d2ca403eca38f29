use chainconsole::console::format::Report;
use chainconsole::console::{Command, Invocation};
use chainconsole::node::{AbiEncoder, Address, CallEncoder};
use chainconsole::tx::build_call;

#[test]
fn lookup_is_exact() {
    for command in Command::ALL {
        assert_eq!(Command::lookup(command.name()), Some(command));
    }
    assert_eq!(Command::lookup("Status"), None);
    assert_eq!(Command::lookup("p2p"), None);
    assert_eq!(Command::lookup("miner.add "), None);
    assert!(Command::MinerAdd.is_mutating());
    assert!(!Command::AmdbSelect.is_mutating());
}

#[test]
fn invocation_splits_on_spaces() {
    let inv = Invocation::parse("amdb.select  t_test fruit\r\n").unwrap();
    assert_eq!(inv.name, "amdb.select");
    assert_eq!(inv.args, vec!["t_test", "fruit"]);

    let inv = Invocation::parse(" status").unwrap();
    assert_eq!(inv.name, "status");
    assert!(inv.args.is_empty());

    assert_eq!(Invocation::parse(""), None);
    assert_eq!(Invocation::parse("\n"), None);
    assert_eq!(Invocation::parse("    "), None);
}

#[test]
fn report_rules_are_seventy_wide() {
    let mut report = Report::new();
    report.double_rule().field("Peers number: ", 3).single_rule().blank();
    let text = report.finish();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines[0], "=".repeat(70));
    assert_eq!(lines[1], "Peers number: 3");
    assert_eq!(lines[2], "-".repeat(70));
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "");
    assert!(report.finish().is_empty());
}

#[test]
fn string_calls_use_standard_abi_layout() {
    let data = AbiEncoder.encode("add(string)", &["ab"]).unwrap();
    // selector + offset word + length word + one padded data word
    assert_eq!(data.len(), 4 + 32 * 3);
    assert_eq!(data[4 + 31], 0x20);
    assert_eq!(data[4 + 63], 2);
    assert_eq!(&data[4 + 64..4 + 66], b"ab");
    assert!(data[4 + 66..].iter().all(|b| *b == 0));

    // keccak256("add(string)")[..4]
    assert_eq!(AbiEncoder::selector("add(string)"), [0xb0, 0xc8, 0xf9, 0xdc]);
    assert!(AbiEncoder.encode("add(string)", &[]).is_err());
    assert!(AbiEncoder.encode("add(uint256)", &["1"]).is_err());
    assert!(AbiEncoder::decode_strings("remove(string)", &data).is_err());
}

#[test]
fn call_skeleton_expires_after_window() {
    let to = Address::from_low_u64_be(0x1003);
    let tx = build_call(to, vec![1, 2, 3], 500);
    assert_eq!(tx.to, to);
    assert_eq!(tx.block_limit, 600);
    assert!(!tx.creation);
    assert_eq!(to.to_string(), format!("0x{}1003", "0".repeat(36)));
}
