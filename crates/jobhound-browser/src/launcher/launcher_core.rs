//! ChromeLauncher: find, spawn, connect and shut down Chrome.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use jobhound_config::BrowserConfig;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::BrowserError;
use crate::cdp::{CdpClient, PageSession};

/// Flags passed on every launch.
const BASE_ARGS: &[&str] = &[
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-background-networking",
    "--disable-sync",
    "--disable-translate",
    "--metrics-recording-only",
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
];

const READY_POLL: Duration = Duration::from_millis(200);

/// Launches Chrome instances configured by [`BrowserConfig`].
pub struct ChromeLauncher;

/// A running Chrome process with one attached page.
///
/// The child is spawned with `kill_on_drop`, so an abandoned session never
/// leaks a browser process; [`ChromeSession::shutdown`] is the orderly path.
pub struct ChromeSession {
    client: CdpClient,
    page: PageSession,
    /// `None` when we attached to a Chrome that was already listening,
    /// and after shutdown.
    child: Mutex<Option<Child>>,
}

impl ChromeLauncher {
    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Command line for a launch, excluding the executable.
    pub fn build_args(config: &BrowserConfig, profile_dir: &Path) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", config.debug_port),
            format!("--user-data-dir={}", profile_dir.display()),
            format!(
                "--window-size={},{}",
                config.window_width, config.window_height
            ),
        ];
        args.extend(BASE_ARGS.iter().map(|s| s.to_string()));
        if config.headless {
            args.push("--headless=new".to_string());
        }
        args.extend(config.extra_args.iter().cloned());
        // Start on a blank page; the search navigates explicitly.
        args.push("about:blank".to_string());
        args
    }

    /// Check if something is answering DevTools requests on the endpoint.
    async fn is_chrome_running(endpoint: &str) -> bool {
        CdpClient::fetch_version(endpoint).await.is_ok()
    }

    fn spawn(config: &BrowserConfig) -> Result<Child, BrowserError> {
        let chrome_path = config
            .chrome_path
            .clone()
            .or_else(Self::find_chrome)
            .ok_or(BrowserError::ChromeNotFound)?;
        let profile_dir = config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            chrome = %chrome_path.display(),
            profile = %profile_dir.display(),
            headless = config.headless,
            "Launching Chrome"
        );

        let child = Command::new(&chrome_path)
            .args(Self::build_args(config, &profile_dir))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Start Chrome (or attach to one already on the port) and open a page.
    pub async fn launch(config: &BrowserConfig) -> Result<ChromeSession, BrowserError> {
        let endpoint = config.endpoint();

        let mut child = if Self::is_chrome_running(&endpoint).await {
            warn!(
                "Chrome already running on port {}, attaching to it",
                config.debug_port
            );
            None
        } else {
            let mut child = Self::spawn(config)?;
            let deadline = Instant::now() + Duration::from_secs(config.launch_timeout_seconds);
            loop {
                tokio::time::sleep(READY_POLL).await;
                if Self::is_chrome_running(&endpoint).await {
                    break;
                }
                if let Ok(Some(status)) = child.try_wait() {
                    return Err(BrowserError::LaunchFailed(format!(
                        "Chrome exited during startup ({})",
                        status
                    )));
                }
                if Instant::now() >= deadline {
                    let _ = child.kill().await;
                    return Err(BrowserError::LaunchFailed(format!(
                        "DevTools endpoint {} not ready within {}s",
                        endpoint, config.launch_timeout_seconds
                    )));
                }
            }
            Some(child)
        };

        match Self::open_page(config, &endpoint).await {
            Ok((client, page)) => {
                info!("Connected to {} at {}", client.browser(), endpoint);
                Ok(ChromeSession {
                    client,
                    page,
                    child: Mutex::new(child),
                })
            }
            Err(e) => {
                if let Some(c) = child.as_mut() {
                    let _ = c.kill().await;
                }
                Err(e)
            }
        }
    }

    async fn open_page(
        config: &BrowserConfig,
        endpoint: &str,
    ) -> Result<(CdpClient, PageSession), BrowserError> {
        let client = CdpClient::connect(endpoint).await?;
        let page = client.new_page().await?;

        page.set_viewport(config.window_width, config.window_height)
            .await?;
        if let Some(ua) = &config.user_agent {
            page.set_user_agent(ua).await?;
        }
        Ok((client, page))
    }
}

impl ChromeSession {
    /// The attached page.
    pub fn page(&self) -> &PageSession {
        &self.page
    }

    /// Close the page and stop Chrome if we launched it. Best effort:
    /// failures are logged, never returned. Safe to call more than once.
    pub async fn shutdown(&self) {
        if self.page.is_closed() {
            debug!("CDP socket already closed");
        } else if let Err(e) = self.client.close_page(self.page.target_id()).await {
            debug!("Closing page failed: {}", e);
        }

        if let Some(mut child) = self.child.lock().await.take() {
            info!("Shutting down Chrome...");
            self.client.close_browser().await;
            match tokio::time::timeout(Duration::from_secs(5), child.wait()).await {
                Ok(Ok(status)) => debug!("Chrome exited: {}", status),
                _ => {
                    warn!("Chrome did not exit, killing it");
                    let _ = child.kill().await;
                }
            }
        }
    }
}
