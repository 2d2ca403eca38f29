// src/console/context.rs

use crate::node::{CallEncoder, ChainInterface, ConfigLoader, P2pHost, SecretKey, TableStore};
use std::sync::Arc;

/// Node handles and the signing key every command runs against.
/// Built once at server construction and shared read-only by all sessions.
#[derive(Clone)]
pub struct ConsoleContext {
    pub chain: Arc<dyn ChainInterface>,
    pub host: Arc<dyn P2pHost>,
    pub store: Arc<dyn TableStore>,
    pub encoder: Arc<dyn CallEncoder>,
    pub node_config: Arc<dyn ConfigLoader>,
    pub signing_key: SecretKey,
}

impl std::fmt::Debug for ConsoleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleContext")
            .field("signing_key", &self.signing_key)
            .finish_non_exhaustive()
    }
}
