//! Best-effort dismissal of the cookie/consent overlay.

use jobhound_config::ConsentConfig;
use tracing::{debug, info};

use crate::driver::{DriverSession, NodeRef};
use crate::error::DriverError;

/// Click the first candidate whose text contains one of the configured
/// phrases (case-sensitive), then pause for the overlay to go away.
///
/// Makes a single attempt and never fails: lookup and click errors are
/// logged and reported as "nothing dismissed".
pub async fn dismiss_consent(session: &dyn DriverSession, config: &ConsentConfig) -> bool {
    if !config.enabled {
        return false;
    }

    match find_and_click(session, config).await {
        Ok(Some(node)) => {
            info!(node = node.0, "Dismissed consent overlay");
            tokio::time::sleep(config.pause()).await;
            true
        }
        Ok(None) => {
            debug!("No consent overlay found");
            false
        }
        Err(e) => {
            debug!("Consent dismissal failed: {}", e);
            false
        }
    }
}

async fn find_and_click(
    session: &dyn DriverSession,
    config: &ConsentConfig,
) -> Result<Option<NodeRef>, DriverError> {
    for node in session.find_all(&config.selector).await? {
        // Detached or hidden candidates are just skipped.
        let Ok(text) = session.text(node).await else {
            continue;
        };
        if matches_phrase(&text, &config.phrases) {
            session.click(node).await?;
            return Ok(Some(node));
        }
    }
    Ok(None)
}

/// Whether `text` contains any non-empty phrase.
pub(crate) fn matches_phrase(text: &str, phrases: &[String]) -> bool {
    phrases
        .iter()
        .any(|p| !p.is_empty() && text.contains(p.as_str()))
}

#[cfg(test)]
#[path = "consent_tests.rs"]
mod tests;
