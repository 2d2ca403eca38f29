//! Command layer: parsing, dispatch and the per-command handlers.

pub mod context;
pub mod dispatcher;
pub mod format;
pub mod handlers;
pub mod registry;
pub mod static_nodes;

pub use context::ConsoleContext;
pub use dispatcher::{SessionDispatcher, EMPTY_INPUT, UNKNOWN_COMMAND};
pub use handlers::{Reply, Response};
pub use registry::{Command, Invocation};
pub use static_nodes::{parse_endpoint, EndpointError, SkippedEntry, StaticNodePlan};
