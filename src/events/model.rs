use serde::{Deserialize, Serialize};
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandOutcome {
    Ok,
    Usage,
    Failed,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventMeta {
    pub ts: SystemTime,
    pub level: LogLevel,
    pub corr_id: Option<String>,
    /// Identifies one run of the server process.
    pub run_id: String,
    pub component: &'static str,
    pub suppress_console: bool,
}

/// Session lifecycle and transport faults.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    pub meta: EventMeta,
    pub action: String,
    pub peer: Option<String>,
    pub detail: Option<String>,
}

/// One dispatched console command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandEvent {
    pub meta: EventMeta,
    pub command: String,
    pub peer: Option<String>,
    pub outcome: CommandOutcome,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemEvent {
    pub meta: EventMeta,
    pub action: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    Session(SessionEvent),
    Command(CommandEvent),
    System(SystemEvent),
}

impl LogEvent {
    pub fn meta(&self) -> &EventMeta {
        match self {
            LogEvent::Session(e) => &e.meta,
            LogEvent::Command(e) => &e.meta,
            LogEvent::System(e) => &e.meta,
        }
    }
}
