#![allow(dead_code)]

use std::sync::Arc;

use chainconsole::console::{ConsoleContext, SessionDispatcher};
use chainconsole::node::memory::{
    ChainState, MemoryChain, MemoryHost, MemoryTableStore, StaticConfigLoader,
};
use chainconsole::node::{AbiEncoder, ConfigTree, SecretKey};

pub const PEER: &str = "127.0.0.1:40000";

/// In-memory node with handles kept for assertions.
pub struct Fixture {
    pub chain: Arc<MemoryChain>,
    pub host: Arc<MemoryHost>,
    pub store: Arc<MemoryTableStore>,
    pub loader: Arc<StaticConfigLoader>,
}

impl Fixture {
    pub fn new(state: ChainState) -> Self {
        Self::with_loader(state, StaticConfigLoader::new(ConfigTree::new()))
    }

    pub fn with_loader(state: ChainState, loader: StaticConfigLoader) -> Self {
        Self {
            chain: Arc::new(MemoryChain::new(state)),
            host: Arc::new(MemoryHost::new()),
            store: Arc::new(MemoryTableStore::new()),
            loader: Arc::new(loader),
        }
    }

    pub fn context(&self) -> ConsoleContext {
        ConsoleContext {
            chain: self.chain.clone(),
            host: self.host.clone(),
            store: self.store.clone(),
            encoder: Arc::new(AbiEncoder),
            node_config: self.loader.clone(),
            signing_key: SecretKey::new([7u8; 32]),
        }
    }

    pub fn dispatcher(&self) -> SessionDispatcher {
        SessionDispatcher::new(self.context())
    }

    /// Calls made to any collaborator so far.
    pub fn total_calls(&self) -> usize {
        self.chain.call_count()
            + self.host.call_count()
            + self.store.call_count()
            + self.loader.load_count()
    }
}

pub async fn request(dispatcher: &SessionDispatcher, line: &str) -> Option<String> {
    dispatcher.handle_request(PEER, line.as_bytes()).await
}

pub fn double_rule() -> String {
    "=".repeat(70)
}

pub fn single_rule() -> String {
    "-".repeat(70)
}
