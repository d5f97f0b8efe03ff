//! Adapter types and utility functions for jobhound.
//!
//! Bridges the Chrome/CDP crate to the driver traits the pipeline uses.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jobhound_browser::{CdpError, ChromeLauncher, ChromeSession};
use jobhound_config::{BrowserConfig, Config, ConfigError, ConfigLoader, ConfigValidator};
use jobhound_core::{DriverError, DriverLauncher, DriverSession, NodeRef};
use serde_json::Value;
use tracing::{debug, warn};

/// Budget for a page load after `Page.navigate`.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Get the .jobhound directory path.
pub(crate) fn jobhound_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".jobhound"))
        .unwrap_or_else(|| PathBuf::from(".jobhound"))
}

/// Default configuration file location.
pub(crate) fn default_config_path() -> PathBuf {
    jobhound_dir().join("config.toml")
}

/// Load the configuration and reject it when validation finds errors.
///
/// An explicit path must exist; the default location may be absent, in
/// which case built-in defaults apply.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match explicit {
        Some(path) => ConfigLoader::load(path)?,
        None => {
            let path = default_config_path();
            debug!("Loading config from {}", path.display());
            ConfigLoader::load_or_default(&path)?
        }
    };

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for w in warnings {
        warn!("config {}: {}", w.path, w.message);
    }
    Ok(config)
}

fn driver_error(e: CdpError) -> DriverError {
    match e {
        CdpError::Timeout(msg) => DriverError::Timeout(msg),
        CdpError::JavaScript(msg) => DriverError::Script(msg),
        CdpError::NodeNotFound(id) => DriverError::NotFound(format!("node {id}")),
        CdpError::SessionClosed => DriverError::Closed,
        other => DriverError::Protocol(other.to_string()),
    }
}

/// Adapter: launches Chrome for each search.
pub(crate) struct ChromeDriverLauncher;

#[async_trait::async_trait]
impl DriverLauncher for ChromeDriverLauncher {
    async fn open(&self, config: &BrowserConfig) -> Result<Box<dyn DriverSession>, DriverError> {
        let session = ChromeLauncher::launch(config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;
        Ok(Box::new(ChromeDriverSession { session }))
    }
}

/// Adapter: one Chrome page as a [`DriverSession`].
pub(crate) struct ChromeDriverSession {
    session: ChromeSession,
}

#[async_trait::async_trait]
impl DriverSession for ChromeDriverSession {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.session
            .page()
            .navigate(url, NAVIGATION_TIMEOUT)
            .await
            .map(|_| ())
            .map_err(driver_error)
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<NodeRef>, DriverError> {
        let ids = self
            .session
            .page()
            .query_selector_all(selector)
            .await
            .map_err(driver_error)?;
        Ok(ids.into_iter().map(NodeRef).collect())
    }

    async fn find_within(
        &self,
        node: NodeRef,
        selector: &str,
    ) -> Result<Option<NodeRef>, DriverError> {
        let id = self
            .session
            .page()
            .query_selector_within(node.0, selector)
            .await
            .map_err(driver_error)?;
        Ok(id.map(NodeRef))
    }

    async fn text(&self, node: NodeRef) -> Result<String, DriverError> {
        self.session
            .page()
            .inner_text(node.0)
            .await
            .map_err(driver_error)
    }

    async fn attribute(&self, node: NodeRef, name: &str) -> Result<Option<String>, DriverError> {
        self.session
            .page()
            .get_attribute(node.0, name)
            .await
            .map_err(driver_error)
    }

    async fn click(&self, node: NodeRef) -> Result<(), DriverError> {
        self.session
            .page()
            .click_node(node.0)
            .await
            .map_err(driver_error)
    }

    async fn run_script(&self, code: &str) -> Result<Value, DriverError> {
        self.session
            .page()
            .evaluate(code)
            .await
            .map_err(driver_error)
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.session.shutdown().await;
        Ok(())
    }
}
