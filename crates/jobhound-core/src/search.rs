//! The `search` operation: one browser session, one result set.

use std::sync::Arc;

use jobhound_config::Config;
use tracing::{info, warn};
use url::Url;

use crate::assembler::assemble;
use crate::consent::dismiss_consent;
use crate::driver::{DriverLauncher, DriverSession};
use crate::error::SearchError;
use crate::extractor::extract;
use crate::loader::{load_listings, LoaderSettings};
use crate::types::{ResultSet, SearchQuery};

/// Runs searches against a job-search page through a [`DriverLauncher`].
#[derive(Clone)]
pub struct JobSearch {
    launcher: Arc<dyn DriverLauncher>,
    config: Config,
}

impl JobSearch {
    pub fn new(launcher: Arc<dyn DriverLauncher>, config: &Config) -> Self {
        Self {
            launcher,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open a session, scrape up to `query.target_count()` listings and
    /// close the session again.
    ///
    /// The session is closed on every path once it has been opened; a
    /// failure to close is logged, never returned.
    pub async fn search(&self, query: &SearchQuery) -> Result<ResultSet, SearchError> {
        let url = build_search_url(&self.config.search.base_url, query)?;
        info!(
            term = query.term(),
            location = query.location(),
            count = query.target_count(),
            "Starting search"
        );

        let session = self
            .launcher
            .open(&self.config.browser)
            .await
            .map_err(SearchError::SessionStart)?;

        let result = self.run(session.as_ref(), query, &url).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser session: {}", e);
        }
        result
    }

    async fn run(
        &self,
        session: &dyn DriverSession,
        query: &SearchQuery,
        url: &Url,
    ) -> Result<ResultSet, SearchError> {
        session.navigate(url.as_str()).await?;
        tokio::time::sleep(self.config.search.settle()).await;

        dismiss_consent(session, &self.config.consent).await;

        let settings = LoaderSettings::from_config(&self.config.search, &self.config.selectors);
        let loaded = load_listings(session, query.target_count(), &settings).await?;
        info!(
            cards = loaded.nodes.len(),
            scrolls = loaded.scroll_cycles,
            stop = ?loaded.stop,
            "Listings loaded"
        );

        let mut records = Vec::with_capacity(loaded.nodes.len());
        for node in loaded.nodes {
            records.push(extract(session, node, &self.config.selectors, url).await);
        }

        Ok(assemble(records, query.target_count()))
    }
}

/// `base` with `keywords` and `location` query parameters appended.
pub fn build_search_url(base: &str, query: &SearchQuery) -> Result<Url, SearchError> {
    let mut url = Url::parse(base).map_err(|e| SearchError::InvalidUrl(format!("{base}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(SearchError::InvalidUrl(format!("{base}: not a web address")));
    }
    url.query_pairs_mut()
        .append_pair("keywords", query.term())
        .append_pair("location", query.location());
    Ok(url)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
