//! Shared WebSocket transport used by the client and its page sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{CdpRequest, CdpResponse};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

/// Per-command response deadline.
pub(crate) const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// One browser WebSocket, multiplexed by request id.
pub(crate) struct Transport {
    ws_tx: tokio::sync::Mutex<WsSink>,
    pending: PendingMap,
    request_id: AtomicU64,
    closed: Arc<AtomicBool>,
    recv_task: tokio::task::JoinHandle<()>,
}

impl Transport {
    /// Connect to a browser WebSocket URL and start the receive loop.
    pub(crate) async fn connect(ws_url: &str) -> Result<Self, CdpError> {
        let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let recv_task = {
            let pending = pending.clone();
            let closed = closed.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending.clone()).await;
                closed.store(true, Ordering::SeqCst);
                // Wake everyone still waiting; dropping the senders yields SessionClosed.
                pending.lock().clear();
            })
        };

        debug!("CDP transport connected to {}", ws_url);

        Ok(Self {
            ws_tx: tokio::sync::Mutex::new(ws_sink),
            pending,
            request_id: AtomicU64::new(1),
            closed,
            recv_task,
        })
    }

    async fn receive_loop(mut ws_source: WsSource, pending: PendingMap) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => {
                            // Events are not consumed; page state is polled instead.
                            let Some(id) = resp.id else { continue };
                            let Some(tx) = pending.lock().remove(&id) else {
                                continue;
                            };
                            let result = match resp.error {
                                Some(error) => Err(CdpError::Protocol {
                                    code: error.code,
                                    message: error.message,
                                }),
                                None => Ok(resp.result.unwrap_or(Value::Null)),
                            };
                            let _ = tx.send(result);
                        }
                        Err(e) => {
                            warn!("Failed to parse CDP message: {}", e);
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    }

    /// Whether the socket has gone away.
    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Send a CDP command and wait for its response.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        if self.is_closed() {
            return Err(CdpError::SessionClosed);
        }

        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(CALL_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    /// Send a close frame. Errors are ignored; the peer may already be gone.
    pub(crate) async fn close(&self) {
        let mut ws = self.ws_tx.lock().await;
        let _ = ws.close().await;
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}
