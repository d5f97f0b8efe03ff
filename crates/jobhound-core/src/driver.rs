//! Browser driver seam.
//!
//! The pipeline talks to the browser only through [`DriverSession`]; the
//! binary plugs Chrome in, tests plug in an in-memory page.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use jobhound_config::BrowserConfig;
use serde_json::Value;
use tokio::time::Instant;
use tracing::trace;

use crate::error::DriverError;

/// Script that scrolls the window to the bottom of the document.
pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Opaque handle to a node in the current page. Two handles from the same
/// query compare equal iff they denote the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub i64);

/// One live browser page.
#[async_trait]
pub trait DriverSession: Send + Sync {
    /// Load `url` and wait for the document to become interactive.
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// All nodes in the page matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<NodeRef>, DriverError>;

    /// First descendant of `node` matching `selector`.
    async fn find_within(
        &self,
        node: NodeRef,
        selector: &str,
    ) -> Result<Option<NodeRef>, DriverError>;

    /// Rendered text of `node`.
    async fn text(&self, node: NodeRef) -> Result<String, DriverError>;

    /// Attribute value of `node`, `None` when the attribute is absent.
    async fn attribute(&self, node: NodeRef, name: &str) -> Result<Option<String>, DriverError>;

    async fn click(&self, node: NodeRef) -> Result<(), DriverError>;

    /// Evaluate a script in the page and return its JSON value.
    async fn run_script(&self, code: &str) -> Result<Value, DriverError>;

    /// Release the page and browser process. Further calls fail with
    /// [`DriverError::Closed`].
    async fn close(&self) -> Result<(), DriverError>;
}

/// Starts browser sessions.
#[async_trait]
pub trait DriverLauncher: Send + Sync {
    async fn open(&self, config: &BrowserConfig) -> Result<Box<dyn DriverSession>, DriverError>;
}

/// Poll `predicate` every `poll` until it yields `true`.
///
/// Predicate errors count as "not yet". Fails with [`DriverError::Timeout`]
/// once `timeout` has elapsed without success.
pub async fn wait_until<F, Fut>(
    timeout: Duration,
    poll: Duration,
    mut predicate: F,
) -> Result<(), DriverError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, DriverError>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        match predicate().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => trace!("wait predicate failed: {}", e),
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(DriverError::Timeout(format!(
                "condition not met within {}s",
                timeout.as_secs()
            )));
        }
        tokio::time::sleep(poll.min(deadline - now)).await;
    }
}
