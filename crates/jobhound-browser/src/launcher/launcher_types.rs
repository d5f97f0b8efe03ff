//! Launcher error types.

use thiserror::Error;

use crate::cdp::CdpError;

/// Browser launch and control errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Node not found: {0}")]
    NodeNotFound(i64),

    #[error("Script failed: {0}")]
    ScriptFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Chrome not found. Please install Google Chrome or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::ChromeNotAvailable(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::NodeNotFound(id) => BrowserError::NodeNotFound(id),
            CdpError::JavaScript(msg) => BrowserError::ScriptFailed(msg),
            CdpError::Timeout(msg) => BrowserError::Timeout(msg),
            CdpError::SessionClosed => BrowserError::NotConnected,
            _ => BrowserError::Protocol(e.to_string()),
        }
    }
}
