//! Console transport: length-prefixed frames over TCP, one task per session.

pub mod frame;
pub mod listener;
pub mod session;

pub use frame::{read_frame, write_frame, FrameError};
pub use listener::{accept_loop, serve_connection};
pub use session::{ConsoleSession, StreamSession};
