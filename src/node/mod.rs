//! Interfaces to the node the console is embedded in.
//!
//! The console never owns chain, p2p or storage state: it reads and mutates
//! it through these traits. `memory` provides self-contained implementations.

pub mod chain;
pub mod config_loader;
pub mod encoder;
pub mod memory;
pub mod p2p;
pub mod storage;
pub mod types;

pub use chain::ChainInterface;
pub use config_loader::{ConfigLoader, ConfigSection, ConfigTree, IniConfigLoader};
pub use encoder::{AbiEncoder, AbiError, CallEncoder};
pub use p2p::{P2pHost, PeerSessionInfo, StaticNodeSet};
pub use storage::{TableEntry, TableStore};
pub use types::{Address, BlockHash, KeyError, NodeEndpoint, NodeId, SecretKey, TxHash, H256};
