// src/console/registry.rs

use std::fmt;

/// Every command the console understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Status,
    P2pPeers,
    P2pUpdate,
    P2pMiners,
    AmdbSelect,
    MinerAdd,
    MinerRemove,
    Quit,
    Help,
}

impl Command {
    /// Help listing order.
    pub const ALL: [Command; 9] = [
        Command::Status,
        Command::P2pPeers,
        Command::P2pUpdate,
        Command::P2pMiners,
        Command::AmdbSelect,
        Command::MinerAdd,
        Command::MinerRemove,
        Command::Quit,
        Command::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::P2pPeers => "p2p.peers",
            Command::P2pUpdate => "p2p.update",
            Command::P2pMiners => "p2p.miners",
            Command::AmdbSelect => "amdb.select",
            Command::MinerAdd => "miner.add",
            Command::MinerRemove => "miner.remove",
            Command::Quit => "quit",
            Command::Help => "help",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Command::Status => "Show the blockchain status.",
            Command::P2pPeers => "Show the peers information.",
            Command::P2pUpdate => "Update static nodes.",
            Command::P2pMiners => "Show the miners information.",
            Command::AmdbSelect => "Query the table data.",
            Command::MinerAdd => "Add miner node.",
            Command::MinerRemove => "Remove miner node.",
            Command::Quit => "Quit the blockchain console.",
            Command::Help => "Provide help information for blockchain console.",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Commands that change node state.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Command::P2pUpdate | Command::MinerAdd | Command::MinerRemove
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded request: command token plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Split a raw request line on single spaces. Empty tokens (from repeated
    /// spaces) are dropped; `None` when nothing is left.
    pub fn parse(request: &str) -> Option<Self> {
        let line = request.trim_end_matches(['\r', '\n']);
        let mut tokens = line.split(' ').filter(|t| !t.is_empty()).map(str::to_string);
        let name = tokens.next()?;
        Some(Self {
            name,
            args: tokens.collect(),
        })
    }
}
