//! The browser WebSocket shared by the client and its page sessions.
//!
//! One [`Channel`] multiplexes every command: page sessions tag frames with
//! their `sessionId`, and replies are matched back to callers by frame id.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use super::error::CdpError;
use super::protocol::{IncomingFrame, OutgoingFrame};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type SocketSink = SplitSink<Socket, Message>;
type SocketStream = SplitStream<Socket>;

/// How long a command may wait for its reply.
pub(crate) const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

type Reply = Result<Value, CdpError>;

struct Waiter {
    method: String,
    tx: oneshot::Sender<Reply>,
}

/// Callers waiting on a reply, keyed by frame id.
#[derive(Default)]
pub(crate) struct PendingReplies {
    waiters: Mutex<HashMap<u64, Waiter>>,
}

impl PendingReplies {
    pub(crate) fn register(&self, id: u64, method: &str) -> oneshot::Receiver<Reply> {
        let (tx, rx) = oneshot::channel();
        self.waiters.lock().insert(
            id,
            Waiter {
                method: method.to_string(),
                tx,
            },
        );
        rx
    }

    pub(crate) fn forget(&self, id: u64) {
        self.waiters.lock().remove(&id);
    }

    /// Hand a reply to its waiter. Events and unknown ids are dropped.
    pub(crate) fn resolve(&self, frame: IncomingFrame) {
        let Some(id) = frame.id else {
            return;
        };
        let Some(waiter) = self.waiters.lock().remove(&id) else {
            trace!("No waiter for reply {}", id);
            return;
        };
        let reply = match frame.error {
            Some(error) => Err(CdpError::Remote {
                method: waiter.method,
                code: error.code,
                message: error.message,
            }),
            None => Ok(frame.result.unwrap_or(Value::Null)),
        };
        let _ = waiter.tx.send(reply);
    }

    /// Drop every waiter; each sees [`CdpError::Closed`].
    pub(crate) fn abandon_all(&self) {
        self.waiters.lock().clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.waiters.lock().len()
    }
}

pub(crate) struct Channel {
    sink: tokio::sync::Mutex<SocketSink>,
    pending: PendingReplies,
    next_id: AtomicU64,
}

impl Channel {
    /// Open the socket and start reading replies in the background.
    pub(crate) async fn open(
        socket_url: &str,
    ) -> Result<(Arc<Self>, tokio::task::JoinHandle<()>), CdpError> {
        let (socket, _) = tokio_tungstenite::connect_async(socket_url)
            .await
            .map_err(|e| CdpError::Handshake(format!("{}: {}", socket_url, e)))?;
        let (sink, stream) = socket.split();

        let channel = Arc::new(Self {
            sink: tokio::sync::Mutex::new(sink),
            pending: PendingReplies::default(),
            next_id: AtomicU64::new(1),
        });
        let reader = tokio::spawn(Arc::clone(&channel).read_replies(stream));
        Ok((channel, reader))
    }

    async fn read_replies(self: Arc<Self>, mut stream: SocketStream) {
        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<IncomingFrame>(&text) {
                    Ok(frame) => self.pending.resolve(frame),
                    Err(e) => warn!("Unreadable CDP frame: {}", e),
                },
                Ok(Message::Close(_)) => {
                    debug!("Browser closed the CDP socket");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("CDP socket error: {}", e);
                    break;
                }
            }
        }
        self.pending.abandon_all();
    }

    /// Send one command and wait for its reply.
    pub(crate) async fn request(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let text = serde_json::to_string(&OutgoingFrame {
            id,
            method,
            params: params.as_ref(),
            session_id,
        })?;
        trace!("CDP -> {}", text);

        let reply = self.pending.register(id, method);
        if let Err(e) = self.sink.lock().await.send(Message::Text(text.into())).await {
            self.pending.forget(id);
            return Err(e.into());
        }

        match tokio::time::timeout(REPLY_TIMEOUT, reply).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::Closed),
            Err(_) => {
                self.pending.forget(id);
                Err(CdpError::Timeout(format!("{} (id {})", method, id)))
            }
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
