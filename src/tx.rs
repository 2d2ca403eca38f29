//! Transaction skeletons for node-mutating console commands.
//!
//! A skeleton carries everything the chain needs except the signature: the
//! chain interface signs it with the server key on submission and drops it
//! once `block_limit` has passed without inclusion.

use crate::constants::BLOCK_LIMIT_WINDOW;
use crate::node::types::Address;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSkeleton {
    pub to: Address,
    pub data: Vec<u8>,
    /// Per-transaction nonce; the chain rejects a second transaction with the same id.
    pub random_id: u128,
    /// Last block height at which the transaction may be included.
    pub block_limit: u64,
    pub creation: bool,
}

/// Build a call (never a contract creation) to `to`, valid for
/// `BLOCK_LIMIT_WINDOW` blocks past `current_height`.
pub fn build_call(to: Address, data: Vec<u8>, current_height: u64) -> TransactionSkeleton {
    TransactionSkeleton {
        to,
        data,
        random_id: Uuid::new_v4().as_u128(),
        block_limit: current_height.saturating_add(BLOCK_LIMIT_WINDOW),
        creation: false,
    }
}
