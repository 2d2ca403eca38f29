//! Structured events: session lifecycle, dispatched commands and system notices,
//! fanned out to console and JSON-lines sinks.

pub mod dispatcher;
pub mod init;
pub mod macros;
pub mod model;
pub mod sink;

pub use dispatcher::{correlation_id, emit, init_events, EventDispatcher};
pub use init::init_events_from_config;
pub use model::{CommandOutcome, LogEvent, LogLevel};
pub use sink::{ConsoleSink, JsonFileSink, LogSink};
