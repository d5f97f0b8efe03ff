//! Chrome process launcher.
//!
//! Spawns Chrome with remote debugging enabled, waits for its DevTools
//! endpoint and hands back a [`ChromeSession`] holding one open page.

mod launcher_core;
mod launcher_types;

pub use launcher_core::{ChromeLauncher, ChromeSession};
pub use launcher_types::BrowserError;

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
