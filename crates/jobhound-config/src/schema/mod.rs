//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

mod schema_browser;
mod schema_search;

pub use schema_browser::*;
pub use schema_search::*;

/// Shared default helper used by submodules.
pub(crate) fn default_true() -> bool {
    true
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(default)]
    pub consent: ConsentConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
