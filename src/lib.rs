//! # chainconsole
//!
//! Remote administration console for a blockchain node. Operators connect
//! over TCP, send one text command per frame and get a plain-text report
//! back: chain status, peer sessions, the miner list, table lookups, static
//! node reloads, and miner set changes submitted as signed transactions.
//!
//! ## Key Modules
//! * `server` – Listener lifecycle (`start_listening` / `stop_listening`).
//! * `network` – Frame codec, per-connection sessions and the accept loop.
//! * `console` – Request parsing, command registry, handlers and report formatting.
//! * `node` – Traits for the chain, p2p host, table store, call encoder and node
//!   config, plus in-memory implementations.
//! * `tx` – Transaction skeletons for miner management calls.
//! * `events` – Structured logging/events dispatcher (console + JSON lines).
//! * `config` – TOML configuration for the console process.

pub mod config;
pub mod console;
pub mod constants;
pub mod events;
pub mod network;
pub mod node;
pub mod prelude; // curated re-exports
pub mod server;
pub mod tx;

pub use server::ConsoleServer;
