//! Curated re-exports for embedding the console in a node process.
//! Import with: `use chainconsole::prelude::*;`

pub use crate::config::{ConsoleConfig, LoggingConfig};
pub use crate::console::{Command, ConsoleContext, SessionDispatcher};
pub use crate::node::{
    AbiEncoder, CallEncoder, ChainInterface, ConfigLoader, IniConfigLoader, P2pHost,
    PeerSessionInfo, SecretKey, TableEntry, TableStore,
};
pub use crate::server::ConsoleServer;
