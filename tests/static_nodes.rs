mod common;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use chainconsole::console::{parse_endpoint, EndpointError, SessionDispatcher, StaticNodePlan};
use chainconsole::node::memory::{ChainState, StaticConfigLoader};
use chainconsole::node::{
    ConfigLoader, ConfigSection, IniConfigLoader, NodeEndpoint, P2pHost, StaticNodeSet,
};
use common::{double_rule, request, single_rule, Fixture};

fn endpoint(a: u8, b: u8, c: u8, d: u8, port: u16) -> NodeEndpoint {
    NodeEndpoint::new(IpAddr::V4(Ipv4Addr::new(a, b, c, d)), port)
}

#[test]
fn endpoint_parsing_compresses_empty_segments() {
    assert_eq!(
        parse_endpoint("127.0.0.1:30300"),
        Ok(endpoint(127, 0, 0, 1, 30300))
    );
    assert_eq!(
        parse_endpoint("127.0.0.1::30300"),
        Ok(endpoint(127, 0, 0, 1, 30300))
    );
    assert_eq!(
        parse_endpoint("127.0.0.1"),
        Err(EndpointError::SegmentCount(1))
    );
    assert_eq!(
        parse_endpoint("10.0.0.1:30300:1"),
        Err(EndpointError::SegmentCount(3))
    );
    assert_eq!(
        parse_endpoint("nodehost:30300"),
        Err(EndpointError::Address("nodehost".into()))
    );
    assert_eq!(
        parse_endpoint("10.0.0.1:70000"),
        Err(EndpointError::Port("70000".into()))
    );
}

#[test]
fn plan_keeps_valid_entries_and_skips_the_rest() {
    let plan = StaticNodePlan::from_entries([
        ("listenip", "0.0.0.0"),
        ("node.0", "10.0.0.1:30300"),
        ("node.1", "garbage"),
        ("node.2", "10.0.0.2:30301"),
        ("node.3", "10.0.0.3"),
        ("node.4", "10.0.0.4:30303"),
    ]);

    assert_eq!(plan.attempted.len(), 5);
    assert_eq!(plan.accepted.len(), 3);
    assert_eq!(plan.skipped.len(), 2);
    assert_eq!(plan.skipped[0].key, "node.1");
    assert_eq!(plan.skipped[1].reason, EndpointError::SegmentCount(1));
    assert!(plan.accepted.values().all(Option::is_none));
    assert!(plan.accepted.contains_key(&endpoint(10, 0, 0, 2, 30301)));
}

#[test]
fn duplicate_endpoints_collapse() {
    let plan = StaticNodePlan::from_entries([
        ("node.0", "10.0.0.1:30300"),
        ("node.1", "10.0.0.1::30300"),
    ]);
    assert_eq!(plan.attempted.len(), 2);
    assert_eq!(plan.accepted.len(), 1);
}

#[tokio::test]
async fn update_replaces_static_nodes_and_reports_entries() {
    let loader = StaticConfigLoader::p2p([
        ("node.0", "127.0.0.1:30300"),
        ("node.1", "not-an-endpoint"),
        ("node.2", "127.0.0.1:30301"),
    ]);
    let fx = Fixture::with_loader(ChainState::default(), loader);

    // anything set before the update is dropped, not merged
    let mut previous = StaticNodeSet::new();
    previous.insert(endpoint(192, 168, 1, 1, 30300), None);
    fx.host.set_static_nodes(previous).await.unwrap();

    let out = request(&fx.dispatcher(), "p2p.update").await.unwrap();
    let expected = format!(
        "{}\nAdd staticNode: \n{rule}\n\
         node.0 : 127.0.0.1:30300\nnode.1 : not-an-endpoint\nnode.2 : 127.0.0.1:30301\n\
         {rule}\nupdate successfully！\n{rule}\n\n",
        double_rule(),
        rule = single_rule()
    );
    assert_eq!(out, expected);

    let nodes = fx.host.static_nodes();
    assert_eq!(nodes.len(), 2);
    assert!(nodes.contains_key(&endpoint(127, 0, 0, 1, 30300)));
    assert!(nodes.contains_key(&endpoint(127, 0, 0, 1, 30301)));
    assert!(!nodes.contains_key(&endpoint(192, 168, 1, 1, 30300)));
}

#[tokio::test]
async fn update_is_idempotent() {
    let loader = StaticConfigLoader::p2p([("node.0", "127.0.0.1:30300")]);
    let fx = Fixture::with_loader(ChainState::default(), loader);
    let dispatcher = fx.dispatcher();

    let first_out = request(&dispatcher, "p2p.update").await.unwrap();
    let first = fx.host.static_nodes();
    let second_out = request(&dispatcher, "p2p.update").await.unwrap();

    assert_eq!(first_out, second_out);
    assert_eq!(first, fx.host.static_nodes());
    assert_eq!(fx.host.set_static_calls(), 2);
}

#[tokio::test]
async fn unreadable_config_fails_whole_update() {
    let fx = Fixture::with_loader(
        ChainState::default(),
        StaticConfigLoader::failing("permission denied"),
    );
    let out = request(&fx.dispatcher(), "p2p.update").await.unwrap();
    assert_eq!(out, "ERROR while p2p.update");
    assert_eq!(fx.host.set_static_calls(), 0);
}

#[tokio::test]
async fn missing_p2p_section_fails_whole_update() {
    let fx = Fixture::new(ChainState::default());
    let out = request(&fx.dispatcher(), "p2p.update").await.unwrap();
    assert_eq!(out, "ERROR while p2p.update");
    assert_eq!(fx.host.set_static_calls(), 0);
}

const NODE_INI: &str = "\
[p2p]
listenip=0.0.0.0
listenport=30300
node.0=127.0.0.1:30303
node.1=127.0.0.1:30304
[rpc]
channelport=20200
";

#[test]
fn ini_loader_reads_sections() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.ini");
    std::fs::write(&path, NODE_INI).unwrap();

    let tree = IniConfigLoader::new(path.clone()).load().unwrap();
    let p2p = tree.get("p2p").expect("p2p section");
    assert_eq!(p2p.get("node.0"), Some("127.0.0.1:30303"));
    assert_eq!(p2p.get("listenip"), Some("0.0.0.0"));
    assert!(tree.contains_key("rpc"));
}

#[test]
fn ini_loader_reports_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let loader = IniConfigLoader::new(tmp.path().join("absent.ini"));
    assert!(loader.load().is_err());
}

#[tokio::test]
async fn update_from_ini_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.ini");
    std::fs::write(&path, NODE_INI).unwrap();

    let fx = Fixture::new(ChainState::default());
    let mut ctx = fx.context();
    ctx.node_config = Arc::new(IniConfigLoader::new(path.clone()));
    let dispatcher = SessionDispatcher::new(ctx);

    let out = request(&dispatcher, "p2p.update").await.unwrap();
    assert!(out.contains("node.0 : 127.0.0.1:30303\nnode.1 : 127.0.0.1:30304\n"));
    assert!(out.contains("update successfully！"));
    assert_eq!(fx.host.static_nodes().len(), 2);
}

const UNSORTED_INI: &str = "\
[p2p]
node.2=10.0.0.2:2
node.10=10.0.0.10:10
node.0=10.0.0.1:1
";

#[test]
fn ini_loader_keeps_file_order() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.ini");
    std::fs::write(&path, UNSORTED_INI).unwrap();

    let tree = IniConfigLoader::new(path.clone()).load().unwrap();
    let keys: Vec<&str> = tree["p2p"].iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["node.2", "node.10", "node.0"]);
}

#[tokio::test]
async fn update_reports_entries_in_file_order() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.ini");
    std::fs::write(&path, UNSORTED_INI).unwrap();

    let fx = Fixture::new(ChainState::default());
    let mut ctx = fx.context();
    ctx.node_config = Arc::new(IniConfigLoader::new(path.clone()));
    let out = request(&SessionDispatcher::new(ctx), "p2p.update")
        .await
        .unwrap();

    let listed: Vec<&str> = out.lines().filter(|l| l.starts_with("node.")).collect();
    assert_eq!(
        listed,
        vec![
            "node.2 : 10.0.0.2:2",
            "node.10 : 10.0.0.10:10",
            "node.0 : 10.0.0.1:1",
        ]
    );
    assert_eq!(fx.host.static_nodes().len(), 3);
}

#[test]
fn section_overwrite_keeps_position() {
    let mut section: ConfigSection = [("node.1", "a:1"), ("node.0", "b:2")].into_iter().collect();
    section.insert("node.1", "c:3");
    let entries: Vec<(&str, &str)> = section.iter().collect();
    assert_eq!(entries, vec![("node.1", "c:3"), ("node.0", "b:2")]);
    assert_eq!(section.len(), 2);
}
