//! CDP browser-level client.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use super::error::CdpError;
use super::protocol::{BrowserVersion, PageInfo};
use super::session::PageSession;
use super::transport::Transport;

/// CDP client for browser automation.
///
/// Holds the browser-level WebSocket; pages opened through it share the
/// same connection using flattened target sessions.
pub struct CdpClient {
    /// HTTP endpoint for target discovery.
    http_endpoint: String,
    /// Browser version string reported by `/json/version`.
    browser: String,
    transport: Arc<Transport>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint.
    ///
    /// ```rust,ignore
    /// let client = CdpClient::connect("http://127.0.0.1:9223").await?;
    /// ```
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();
        let version = Self::fetch_version(&http_endpoint).await?;
        debug!("Connected to browser: {}", version.browser);

        let transport = Transport::connect(&version.web_socket_debugger_url).await?;

        Ok(Self {
            http_endpoint,
            browser: version.browser,
            transport: Arc::new(transport),
        })
    }

    /// Query `/json/version`. Used both for connecting and for readiness probes.
    pub async fn fetch_version(http_endpoint: &str) -> Result<BrowserVersion, CdpError> {
        let version_url = format!("{}/json/version", http_endpoint.trim_end_matches('/'));
        debug!("Fetching browser version from {}", version_url);

        reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", http_endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", http_endpoint, e)))
    }

    /// Browser product string, e.g. `HeadlessChrome/126.0.0.0`.
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Create a new page and attach a session to it.
    pub async fn new_page(&self) -> Result<PageSession, CdpError> {
        // Chrome requires PUT for /json/new
        let create_url = format!("{}/json/new", self.http_endpoint);
        let page_info: PageInfo = reqwest::Client::new()
            .put(&create_url)
            .send()
            .await?
            .json()
            .await?;
        debug!("Created new page: {} - {}", page_info.id, page_info.url);
        if page_info.page_type != "page" {
            return Err(CdpError::InvalidResponse(format!(
                "expected a page target, got '{}'",
                page_info.page_type
            )));
        }

        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": page_info.id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(page_info.id, session_id, self.transport.clone());
        session.enable_domains().await?;

        Ok(session)
    }

    /// Close a page/target.
    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({"targetId": target_id})))
            .await?;
        Ok(())
    }

    /// Ask the browser to exit, then drop the socket.
    pub async fn close_browser(&self) {
        // The browser usually exits before answering.
        let _ = self.call("Browser.close", None).await;
        self.transport.close().await;
    }
}
