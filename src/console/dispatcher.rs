// src/console/dispatcher.rs

use std::sync::Arc;

use crate::console::context::ConsoleContext;
use crate::console::handlers;
use crate::console::registry::{Command, Invocation};
use crate::events::dispatcher::{emit_command, emit_session};
use crate::events::model::{CommandOutcome, LogLevel};
use crate::network::frame::FrameError;
use crate::network::session::ConsoleSession;

pub const EMPTY_INPUT: &str = "Empty input!";
pub const UNKNOWN_COMMAND: &str = "Unknown command, enter 'help' for command list.\n";

/// Turns inbound session messages into command invocations and replies.
///
/// The transport calls [`SessionDispatcher::on_message`] once per complete
/// frame and awaits it before reading the next one, which keeps commands on a
/// session strictly sequential.
#[derive(Clone)]
pub struct SessionDispatcher {
    ctx: Arc<ConsoleContext>,
}

impl SessionDispatcher {
    pub fn new(ctx: ConsoleContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    pub fn context(&self) -> &ConsoleContext {
        &self.ctx
    }

    pub fn on_session_established(&self, session: &dyn ConsoleSession) {
        emit_session(
            LogLevel::Info,
            "session_established",
            Some(session.peer()),
            None,
        );
    }

    pub fn on_session_closed(&self, session: &dyn ConsoleSession) {
        emit_session(LogLevel::Info, "session_closed", Some(session.peer()), None);
    }

    pub async fn on_message(
        &self,
        session: &dyn ConsoleSession,
        inbound: Result<Vec<u8>, FrameError>,
    ) {
        let payload = match inbound {
            Ok(payload) => payload,
            Err(e) => {
                emit_session(
                    LogLevel::Error,
                    "transport_error",
                    Some(session.peer()),
                    Some(e.to_string()),
                );
                return;
            }
        };

        let Some(output) = self.handle_request(&session.peer(), &payload).await else {
            session.close().await;
            return;
        };
        if let Err(e) = session.send(output.into_bytes()).await {
            emit_session(
                LogLevel::Warn,
                "response_send_failed",
                Some(session.peer()),
                Some(format!("{:#}", e)),
            );
        }
    }

    /// Response text for one raw request; `None` when the client asked to quit.
    pub async fn handle_request(&self, peer: &str, payload: &[u8]) -> Option<String> {
        let request = String::from_utf8_lossy(payload);
        emit_session(
            LogLevel::Trace,
            "request_received",
            Some(peer.to_string()),
            Some(request.to_string()),
        );

        let Some(invocation) = Invocation::parse(&request) else {
            emit_session(LogLevel::Warn, "empty_input", Some(peer.to_string()), None);
            return Some(EMPTY_INPUT.to_string());
        };

        let Some(command) = Command::lookup(&invocation.name) else {
            emit_command(
                LogLevel::Info,
                &invocation.name,
                Some(peer.to_string()),
                CommandOutcome::Unknown,
                None,
            );
            return Some(UNKNOWN_COMMAND.to_string());
        };

        if command == Command::Quit {
            emit_session(LogLevel::Info, "session_quit", Some(peer.to_string()), None);
            return None;
        }

        // a panicking handler only loses its own output
        let ctx = self.ctx.clone();
        let args = invocation.args;
        let joined =
            tokio::spawn(async move { handlers::run(&ctx, command, &args).await }).await;

        match joined {
            Ok(reply) => {
                let level = match reply.outcome {
                    CommandOutcome::Failed => LogLevel::Error,
                    _ if command.is_mutating() => LogLevel::Info,
                    _ => LogLevel::Debug,
                };
                emit_command(
                    level,
                    command.name(),
                    Some(peer.to_string()),
                    reply.outcome,
                    reply.detail,
                );
                Some(reply.text)
            }
            Err(e) => {
                emit_command(
                    LogLevel::Error,
                    command.name(),
                    Some(peer.to_string()),
                    CommandOutcome::Failed,
                    Some(format!("handler aborted: {}", e)),
                );
                Some(String::new())
            }
        }
    }
}
