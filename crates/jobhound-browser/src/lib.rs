//! Headless Chrome control for jobhound.
//!
//! Launches Chrome with remote debugging enabled and drives a single page over
//! the Chrome DevTools Protocol (CDP). Pure Rust, no WebDriver binary needed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  ChromeSession  │ ◄──────────────► │  Chrome/Chromium │
//! │  (this crate)   │       CDP        │  (child process) │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! `ChromeLauncher::launch` spawns the browser, waits for its DevTools
//! endpoint, connects a [`CdpClient`] and opens one [`PageSession`]. The
//! returned [`ChromeSession`] owns the child process and kills it on
//! `shutdown` (or on drop, as a last resort).

pub mod cdp;
pub mod launcher;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use launcher::{BrowserError, ChromeLauncher, ChromeSession};
