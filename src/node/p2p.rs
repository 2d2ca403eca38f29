// src/node/p2p.rs

use crate::node::types::{NodeEndpoint, NodeId};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Endpoint → identity. Identity stays `None` until the p2p handshake learns it.
pub type StaticNodeSet = BTreeMap<NodeEndpoint, Option<NodeId>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSessionInfo {
    pub id: NodeId,
    pub host: String,
    pub port: u16,
}

#[async_trait]
pub trait P2pHost: Send + Sync {
    async fn peer_session_info(&self) -> anyhow::Result<Vec<PeerSessionInfo>>;
    async fn is_connected(&self, id: &NodeId) -> anyhow::Result<bool>;
    /// Replace the whole static node set.
    async fn set_static_nodes(&self, nodes: StaticNodeSet) -> anyhow::Result<()>;
}
