// src/server.rs

use crate::console::{ConsoleContext, SessionDispatcher};
use crate::emit_system_event;
use crate::network::listener::accept_loop;
use anyhow::Context;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Owns the accept loop of the console endpoint.
///
/// Stopping only ends the accept loop; sessions already connected keep
/// running until their clients disconnect or `quit`.
pub struct ConsoleServer {
    dispatcher: SessionDispatcher,
    accept_task: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl ConsoleServer {
    pub fn new(ctx: ConsoleContext) -> Self {
        Self {
            dispatcher: SessionDispatcher::new(ctx),
            accept_task: None,
            local_addr: None,
        }
    }

    /// Bind `addr` and start accepting. Returns the bound address, so port 0 works.
    pub async fn start_listening(&mut self, addr: &str) -> anyhow::Result<SocketAddr> {
        if let Some(current) = self.local_addr.filter(|_| self.is_running()) {
            anyhow::bail!("console already listening on {}", current);
        }
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding console endpoint {}", addr))?;
        let local = listener
            .local_addr()
            .context("reading bound console address")?;
        emit_system_event!("server", Info, "listener_bind", "addr={}", local);

        self.accept_task = Some(tokio::spawn(accept_loop(listener, self.dispatcher.clone())));
        self.local_addr = Some(local);
        Ok(local)
    }

    pub fn stop_listening(&mut self) {
        if let Some(task) = self.accept_task.take() {
            task.abort();
            emit_system_event!(
                "server",
                Info,
                "listener_stopped",
                "addr={:?}",
                self.local_addr
            );
        }
        self.local_addr = None;
    }

    pub fn is_running(&self) -> bool {
        self.accept_task
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

impl Drop for ConsoleServer {
    fn drop(&mut self) {
        if let Some(task) = self.accept_task.take() {
            task.abort();
        }
    }
}
