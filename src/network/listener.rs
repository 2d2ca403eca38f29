// src/network/listener.rs

use crate::console::SessionDispatcher;
use crate::events::dispatcher::emit_session;
use crate::events::model::LogLevel;
use crate::network::frame::{read_frame, FrameError};
use crate::network::session::{ConsoleSession, StreamSession};
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;

/// Accept connections until the task is aborted. Each connection gets its own task.
pub async fn accept_loop(listener: TcpListener, dispatcher: SessionDispatcher) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                emit_session(
                    LogLevel::Info,
                    "incoming_connection",
                    Some(peer_addr.to_string()),
                    None,
                );
                if let Err(e) = stream.set_nodelay(true) {
                    emit_session(
                        LogLevel::Debug,
                        "set_nodelay_failed",
                        Some(peer_addr.to_string()),
                        Some(e.to_string()),
                    );
                }
                tokio::spawn(serve_connection(stream, peer_addr, dispatcher.clone()));
            }
            Err(e) => {
                emit_session(LogLevel::Error, "accept_failed", None, Some(e.to_string()));
            }
        }
    }
}

/// Drive one connection: read frames and hand each to the dispatcher, one
/// at a time, until the peer disconnects, the stream fails, or the session
/// is closed by `quit`.
pub async fn serve_connection<S>(stream: S, peer_addr: SocketAddr, dispatcher: SessionDispatcher)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (mut reader, writer) = tokio::io::split(stream);
    let session = StreamSession::spawn(peer_addr, writer);
    dispatcher.on_session_established(&session);

    while !session.is_closed() {
        match read_frame(&mut reader).await {
            Ok(payload) => dispatcher.on_message(&session, Ok(payload)).await,
            Err(FrameError::Closed) => break,
            Err(e) => {
                dispatcher.on_message(&session, Err(e)).await;
                break;
            }
        }
    }

    session.close().await;
    dispatcher.on_session_closed(&session);
}
