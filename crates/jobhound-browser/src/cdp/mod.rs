//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Connects to Chrome via WebSocket and speaks the CDP JSON-RPC protocol.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://127.0.0.1:9223").await?;
//! let page = client.new_page().await?;
//! page.navigate("https://example.com").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;
mod transport;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
