// src/console/static_nodes.rs
// Static node list parsing for `p2p.update`.

use crate::node::config_loader::ConfigTree;
use crate::node::p2p::StaticNodeSet;
use crate::node::types::NodeEndpoint;
use std::net::IpAddr;

pub const P2P_SECTION: &str = "p2p";
pub const NODE_KEY_PREFIX: &str = "node.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("expected address:port, got {0} segment(s)")]
    SegmentCount(usize),
    #[error("invalid address '{0}'")]
    Address(String),
    #[error("invalid port '{0}'")]
    Port(String),
}

/// `address:port` with empty-segment compression (`a::p` reads like `a:p`).
pub fn parse_endpoint(value: &str) -> Result<NodeEndpoint, EndpointError> {
    let segments: Vec<&str> = value.split(':').filter(|s| !s.is_empty()).collect();
    if segments.len() != 2 {
        return Err(EndpointError::SegmentCount(segments.len()));
    }
    let address: IpAddr = segments[0]
        .parse()
        .map_err(|_| EndpointError::Address(segments[0].to_string()))?;
    let port: u16 = segments[1]
        .parse()
        .map_err(|_| EndpointError::Port(segments[1].to_string()))?;
    Ok(NodeEndpoint::new(address, port))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub key: String,
    pub value: String,
    pub reason: EndpointError,
}

/// Outcome of one pass over the configured entries.
#[derive(Debug, Clone, Default)]
pub struct StaticNodePlan {
    /// Every `node.*` entry in the order read, valid or not.
    pub attempted: Vec<(String, String)>,
    pub accepted: StaticNodeSet,
    pub skipped: Vec<SkippedEntry>,
}

impl StaticNodePlan {
    /// Fold over `(key, value)` pairs; keys without the `node.` prefix are ignored.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        entries
            .into_iter()
            .filter(|(key, _)| key.starts_with(NODE_KEY_PREFIX))
            .fold(Self::default(), |mut plan, (key, value)| {
                plan.attempted.push((key.to_string(), value.to_string()));
                match parse_endpoint(value) {
                    Ok(endpoint) => {
                        plan.accepted.insert(endpoint, None);
                    }
                    Err(reason) => plan.skipped.push(SkippedEntry {
                        key: key.to_string(),
                        value: value.to_string(),
                        reason,
                    }),
                }
                plan
            })
    }

    /// Plan from the `[p2p]` section of a loaded tree; `None` if the section is absent.
    pub fn from_tree(tree: &ConfigTree) -> Option<Self> {
        tree.get(P2P_SECTION)
            .map(|section| Self::from_entries(section.iter()))
    }
}
