// src/node/chain.rs

use crate::node::types::{BlockHash, NodeId, SecretKey, TxHash};
use crate::tx::TransactionSkeleton;
use async_trait::async_trait;

/// Consensus / chain query-and-submit surface the console reads node state through.
#[async_trait]
pub trait ChainInterface: Send + Sync {
    /// Whether this node would currently produce the next block.
    async fn would_seal(&self) -> anyhow::Result<bool>;
    async fn is_syncing(&self) -> anyhow::Result<bool>;
    async fn is_major_syncing(&self) -> anyhow::Result<bool>;
    /// Current block height.
    async fn number(&self) -> anyhow::Result<u64>;
    async fn hash_from_number(&self, number: u64) -> anyhow::Result<BlockHash>;
    /// Current view (round) of the consensus engine.
    async fn consensus_view(&self) -> anyhow::Result<u64>;
    /// Miner identities configured in the consensus engine.
    async fn miner_list(&self) -> anyhow::Result<Vec<NodeId>>;
    /// Sign `tx` with `key` and queue it for inclusion.
    async fn submit_transaction(
        &self,
        tx: TransactionSkeleton,
        key: &SecretKey,
    ) -> anyhow::Result<TxHash>;
}
