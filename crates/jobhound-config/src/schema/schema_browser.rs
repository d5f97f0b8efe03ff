//! Browser launch configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::default_true;

/// Chrome launch settings, passed explicitly into session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run Chrome without a window.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Explicit Chrome/Chromium executable. Well-known locations are probed when unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// Remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Profile directory; defaults to a jobhound-owned directory under the cache dir.
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    /// How long to wait for the DevTools endpoint after spawning Chrome.
    #[serde(default = "default_launch_timeout")]
    pub launch_timeout_seconds: u64,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// User-agent override applied to the page session.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Additional command line flags appended after the built-in ones.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_debug_port() -> u16 {
    9223
}

fn default_launch_timeout() -> u64 {
    15
}

fn default_window_width() -> u32 {
    1366
}

fn default_window_height() -> u32 {
    900
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            debug_port: default_debug_port(),
            profile_dir: None,
            launch_timeout_seconds: default_launch_timeout(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            user_agent: None,
            extra_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    /// Get the profile directory, creating the default path if not specified.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("jobhound")
                .join("chrome-profile")
        })
    }

    /// Get the CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.debug_port)
    }
}
