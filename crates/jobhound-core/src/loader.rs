//! Lazy-load driver: scroll until enough result cards exist or loading stalls.

use std::collections::HashSet;
use std::time::Duration;

use jobhound_config::{SearchConfig, SelectorConfig};
use tracing::{debug, info, warn};

use crate::driver::{wait_until, DriverSession, NodeRef, SCROLL_TO_BOTTOM};
use crate::error::{DriverError, SearchError};

/// Poll interval while waiting for the first card.
const FIRST_CARD_POLL: Duration = Duration::from_millis(500);

/// Loader pacing and limits.
#[derive(Debug, Clone)]
pub struct LoaderSettings {
    pub card_selector: String,
    /// Budget for the first card to appear.
    pub wait_timeout: Duration,
    /// Pause after each scroll.
    pub poll_interval: Duration,
    /// Consecutive non-growing cycles before giving up.
    pub stall_cycles: u32,
    /// Absolute cap on scroll cycles.
    pub max_scroll_cycles: u32,
}

impl LoaderSettings {
    pub fn from_config(search: &SearchConfig, selectors: &SelectorConfig) -> Self {
        Self {
            card_selector: selectors.card.clone(),
            wait_timeout: search.wait_timeout(),
            poll_interval: search.poll_interval(),
            stall_cycles: search.stall_cycles.max(1),
            max_scroll_cycles: search.max_scroll_cycles,
        }
    }
}

/// Why the loader stopped scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStop {
    TargetReached,
    /// `stall_cycles` scrolls in a row produced no new cards.
    Stalled,
    CycleCap,
}

/// Cards collected by [`load_listings`].
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Distinct cards in first-seen order, at most `target`.
    pub nodes: Vec<NodeRef>,
    pub scroll_cycles: u32,
    pub stop: LoadStop,
}

/// Wait for the first result card, then scroll until `target` cards exist.
///
/// Fails with [`SearchError::Timeout`] when no card appears within
/// `wait_timeout`. A source that stops growing ends the loop after
/// `stall_cycles` cycles with whatever was found.
pub async fn load_listings(
    session: &dyn DriverSession,
    target: usize,
    settings: &LoaderSettings,
) -> Result<LoadOutcome, SearchError> {
    let selector = settings.card_selector.as_str();

    wait_until(settings.wait_timeout, FIRST_CARD_POLL, move || async move {
        Ok(!session.find_all(selector).await?.is_empty())
    })
    .await
    .map_err(|_| SearchError::Timeout {
        selector: selector.to_string(),
        seconds: settings.wait_timeout.as_secs(),
    })?;

    let mut nodes = distinct_cards(session, selector).await?;
    let mut cycles = 0u32;
    let mut stalled = 0u32;

    let stop = loop {
        if nodes.len() >= target {
            break LoadStop::TargetReached;
        }
        if stalled >= settings.stall_cycles {
            info!(
                found = nodes.len(),
                wanted = target,
                "No new results after {} scrolls, stopping", stalled
            );
            break LoadStop::Stalled;
        }
        if cycles >= settings.max_scroll_cycles {
            warn!(found = nodes.len(), wanted = target, "Scroll cycle cap reached");
            break LoadStop::CycleCap;
        }

        // A failed scroll is one more cycle without progress.
        if let Err(e) = session.run_script(SCROLL_TO_BOTTOM).await {
            warn!("Scroll failed: {}", e);
        }
        tokio::time::sleep(settings.poll_interval).await;
        cycles += 1;

        let fresh = distinct_cards(session, selector).await?;
        if fresh.len() > nodes.len() {
            stalled = 0;
        } else {
            stalled += 1;
        }
        debug!(cycle = cycles, found = fresh.len(), stalled, "Scrolled");
        nodes = fresh;
    };

    nodes.truncate(target);
    Ok(LoadOutcome {
        nodes,
        scroll_cycles: cycles,
        stop,
    })
}

/// Current cards, duplicates removed, first occurrence kept.
async fn distinct_cards(
    session: &dyn DriverSession,
    selector: &str,
) -> Result<Vec<NodeRef>, DriverError> {
    let mut seen = HashSet::new();
    let mut nodes = session.find_all(selector).await?;
    nodes.retain(|n| seen.insert(*n));
    Ok(nodes)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
