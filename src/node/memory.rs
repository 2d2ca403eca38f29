// src/node/memory.rs
// In-memory node collaborators. They back the standalone binary and the test
// suite, and count every call so callers can assert on side effects.

use crate::constants::MINER_PRECOMPILE_ADDRESS;
use crate::node::chain::ChainInterface;
use crate::node::config_loader::{ConfigLoader, ConfigTree};
use crate::node::encoder::AbiEncoder;
use crate::node::p2p::{P2pHost, PeerSessionInfo, StaticNodeSet};
use crate::node::storage::{TableEntry, TableStore};
use crate::node::types::{Address, BlockHash, NodeId, SecretKey, TxHash, H256};
use crate::tx::TransactionSkeleton;
use async_trait::async_trait;
use parking_lot::Mutex;
use sha3::{Digest, Keccak256};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

fn fail_if(failure: &Option<String>) -> anyhow::Result<()> {
    match failure {
        Some(msg) => Err(anyhow::anyhow!("{}", msg)),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChainState {
    pub would_seal: bool,
    pub syncing: bool,
    pub major_syncing: bool,
    pub number: u64,
    pub view: u64,
    pub miners: Vec<NodeId>,
}

#[derive(Default)]
pub struct MemoryChain {
    state: Mutex<ChainState>,
    submitted: Mutex<Vec<TransactionSkeleton>>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MemoryChain {
    pub fn new(state: ChainState) -> Self {
        Self {
            state: Mutex::new(state),
            ..Default::default()
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut ChainState)) {
        f(&mut self.state.lock());
    }

    pub fn state(&self) -> ChainState {
        self.state.lock().clone()
    }

    /// Make every subsequent call fail with `msg` (`None` restores normal behaviour).
    pub fn set_failure(&self, msg: Option<&str>) {
        *self.failure.lock() = msg.map(str::to_string);
    }

    pub fn submitted(&self) -> Vec<TransactionSkeleton> {
        self.submitted.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        fail_if(&self.failure.lock())
    }

    /// Mirror what the miner precompile does once the transaction is mined.
    fn apply_miner_call(&self, tx: &TransactionSkeleton) {
        if tx.to != Address::from_low_u64_be(MINER_PRECOMPILE_ADDRESS) {
            return;
        }
        let mut state = self.state.lock();
        if let Ok(args) = AbiEncoder::decode_strings("add(string)", &tx.data) {
            if let Some(id) = args.into_iter().next().map(NodeId) {
                if !state.miners.contains(&id) {
                    state.miners.push(id);
                }
            }
        } else if let Ok(args) = AbiEncoder::decode_strings("remove(string)", &tx.data) {
            if let Some(id) = args.into_iter().next().map(NodeId) {
                state.miners.retain(|m| m != &id);
            }
        }
    }
}

#[async_trait]
impl ChainInterface for MemoryChain {
    async fn would_seal(&self) -> anyhow::Result<bool> {
        self.enter()?;
        Ok(self.state.lock().would_seal)
    }

    async fn is_syncing(&self) -> anyhow::Result<bool> {
        self.enter()?;
        Ok(self.state.lock().syncing)
    }

    async fn is_major_syncing(&self) -> anyhow::Result<bool> {
        self.enter()?;
        Ok(self.state.lock().major_syncing)
    }

    async fn number(&self) -> anyhow::Result<u64> {
        self.enter()?;
        Ok(self.state.lock().number)
    }

    async fn hash_from_number(&self, number: u64) -> anyhow::Result<BlockHash> {
        self.enter()?;
        Ok(H256(Keccak256::digest(number.to_be_bytes()).into()))
    }

    async fn consensus_view(&self) -> anyhow::Result<u64> {
        self.enter()?;
        Ok(self.state.lock().view)
    }

    async fn miner_list(&self) -> anyhow::Result<Vec<NodeId>> {
        self.enter()?;
        Ok(self.state.lock().miners.clone())
    }

    async fn submit_transaction(
        &self,
        tx: TransactionSkeleton,
        key: &SecretKey,
    ) -> anyhow::Result<TxHash> {
        self.enter()?;
        let mut hasher = Keccak256::new();
        hasher.update(key.as_bytes());
        hasher.update(tx.random_id.to_be_bytes());
        hasher.update(&tx.data);
        let hash = H256(hasher.finalize().into());
        self.apply_miner_call(&tx);
        self.submitted.lock().push(tx);
        Ok(hash)
    }
}

#[derive(Default)]
pub struct MemoryHost {
    peers: Mutex<Vec<PeerSessionInfo>>,
    connected: Mutex<HashSet<NodeId>>,
    static_nodes: Mutex<StaticNodeSet>,
    failure: Mutex<Option<String>>,
    set_static_calls: AtomicUsize,
    calls: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&self, peer: PeerSessionInfo, connected: bool) {
        if connected {
            self.connected.lock().insert(peer.id.clone());
        }
        self.peers.lock().push(peer);
    }

    pub fn set_failure(&self, msg: Option<&str>) {
        *self.failure.lock() = msg.map(str::to_string);
    }

    pub fn static_nodes(&self) -> StaticNodeSet {
        self.static_nodes.lock().clone()
    }

    pub fn set_static_calls(&self) -> usize {
        self.set_static_calls.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        fail_if(&self.failure.lock())
    }
}

#[async_trait]
impl P2pHost for MemoryHost {
    async fn peer_session_info(&self) -> anyhow::Result<Vec<PeerSessionInfo>> {
        self.enter()?;
        Ok(self.peers.lock().clone())
    }

    async fn is_connected(&self, id: &NodeId) -> anyhow::Result<bool> {
        self.enter()?;
        Ok(self.connected.lock().contains(id))
    }

    async fn set_static_nodes(&self, nodes: StaticNodeSet) -> anyhow::Result<()> {
        self.enter()?;
        self.set_static_calls.fetch_add(1, Ordering::SeqCst);
        *self.static_nodes.lock() = nodes;
        Ok(())
    }
}

/// Query recorded by [`MemoryTableStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub hash: BlockHash,
    pub number: u64,
    pub table: String,
    pub key: String,
}

#[derive(Default)]
pub struct MemoryTableStore {
    rows: Mutex<BTreeMap<(String, String), Vec<TableEntry>>>,
    queries: Mutex<Vec<SelectQuery>>,
    failure: Mutex<Option<String>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, table: &str, key: &str, entry: TableEntry) {
        self.rows
            .lock()
            .entry((table.to_string(), key.to_string()))
            .or_default()
            .push(entry);
    }

    pub fn set_failure(&self, msg: Option<&str>) {
        *self.failure.lock() = msg.map(str::to_string);
    }

    pub fn queries(&self) -> Vec<SelectQuery> {
        self.queries.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().len()
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn select(
        &self,
        hash: &BlockHash,
        number: u64,
        table: &str,
        key: &str,
    ) -> anyhow::Result<Vec<TableEntry>> {
        self.queries.lock().push(SelectQuery {
            hash: *hash,
            number,
            table: table.to_string(),
            key: key.to_string(),
        });
        fail_if(&self.failure.lock())?;
        Ok(self
            .rows
            .lock()
            .get(&(table.to_string(), key.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Config loader serving a fixed tree, or a fixed error.
pub struct StaticConfigLoader {
    tree: Mutex<Result<ConfigTree, String>>,
    loads: AtomicUsize,
}

impl StaticConfigLoader {
    pub fn new(tree: ConfigTree) -> Self {
        Self {
            tree: Mutex::new(Ok(tree)),
            loads: AtomicUsize::new(0),
        }
    }

    /// Tree with a single `[p2p]` section holding `entries`.
    pub fn p2p<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let section = entries.into_iter().collect();
        let mut tree = ConfigTree::new();
        tree.insert("p2p".to_string(), section);
        Self::new(tree)
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            tree: Mutex::new(Err(msg.to_string())),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> anyhow::Result<ConfigTree> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.tree.lock().clone().map_err(|e| anyhow::anyhow!("{}", e))
    }
}
