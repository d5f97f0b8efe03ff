//! CDP error types.

use thiserror::Error;

/// Failures talking to Chrome over the DevTools Protocol.
#[derive(Debug, Error)]
pub enum CdpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answered `/json/version` at the endpoint.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    /// WebSocket or HTTP failure below the protocol.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Error object in a CDP reply.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Malformed CDP payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reply parsed but lacked a field we need.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Stale or unknown DOM node id.
    #[error("Node not found: {0}")]
    NodeNotFound(i64),

    /// Exception thrown by page script.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Session closed")]
    SessionClosed,
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::Transport(format!("websocket: {e}"))
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Transport(format!("http: {e}"))
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("invalid DevTools URL: {e}"))
    }
}
