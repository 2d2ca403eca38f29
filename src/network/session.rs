// src/network/session.rs

use crate::events::dispatcher::emit_session;
use crate::events::model::LogLevel;
use crate::network::frame::write_frame;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// One connected console client as seen by the dispatcher.
#[async_trait]
pub trait ConsoleSession: Send + Sync {
    fn peer(&self) -> String;
    /// Queue a response; returns once queued, not once delivered.
    async fn send(&self, payload: Vec<u8>) -> anyhow::Result<()>;
    /// Stop accepting responses and shut the connection down after queued ones are written.
    async fn close(&self);
    fn is_closed(&self) -> bool;
}

/// Session over any byte stream; writes go through a channel drained by a
/// dedicated writer task.
pub struct StreamSession {
    peer: SocketAddr,
    tx: Mutex<Option<mpsc::Sender<Vec<u8>>>>,
    closed: AtomicBool,
}

impl StreamSession {
    pub fn spawn<W>(peer: SocketAddr, writer: W) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(32);
        let mut writer = writer;
        tokio::spawn(async move {
            while let Some(payload) = rx.recv().await {
                if let Err(e) = write_frame(&mut writer, &payload).await {
                    emit_session(
                        LogLevel::Error,
                        "stream_write_failed",
                        Some(peer.to_string()),
                        Some(e.to_string()),
                    );
                    break;
                }
            }
            let _ = writer.shutdown().await;
        });
        Self {
            peer,
            tx: Mutex::new(Some(tx)),
            closed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ConsoleSession for StreamSession {
    fn peer(&self) -> String {
        self.peer.to_string()
    }

    async fn send(&self, payload: Vec<u8>) -> anyhow::Result<()> {
        let sender = self
            .tx
            .lock()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("session {} is closed", self.peer))?;
        sender
            .send(payload)
            .await
            .map_err(|_| anyhow::anyhow!("writer for {} has stopped", self.peer))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        // dropping the last sender lets the writer drain and shut down
        self.tx.lock().take();
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
