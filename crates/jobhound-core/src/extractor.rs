//! Maps a result card to a [`JobRecord`], one independent lookup per field.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use jobhound_config::SelectorConfig;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::driver::{DriverSession, NodeRef};
use crate::error::DriverError;
use crate::types::JobRecord;

/// Why a single field came out empty. Never escapes the extractor.
#[derive(Debug, Error)]
pub(crate) enum FieldError {
    #[error("no element matches '{0}'")]
    Missing(String),

    #[error("attribute '{0}' not present")]
    NoAttribute(String),

    #[error("unparseable date {0:?}")]
    BadDate(String),

    #[error("cannot resolve link {0:?}")]
    BadLink(String),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Extract all five fields of `card`.
///
/// Each field is looked up on its own; a failure leaves that field empty and
/// does not affect the others. Relative links are resolved against `base`.
pub async fn extract(
    session: &dyn DriverSession,
    card: NodeRef,
    selectors: &SelectorConfig,
    base: &Url,
) -> JobRecord {
    let title = field_text(session, card, &selectors.title).await;
    let company = field_text(session, card, &selectors.company).await;
    let location = field_text(session, card, &selectors.location).await;
    let link = field_link(session, card, selectors, base).await;
    let date_posted = field_date(session, card, selectors).await;

    JobRecord {
        title: settle(card, "title", title).unwrap_or_default(),
        company: settle(card, "company", company).unwrap_or_default(),
        location: settle(card, "location", location).unwrap_or_default(),
        date_posted: settle(card, "date_posted", date_posted),
        link: settle(card, "link", link).unwrap_or_default(),
    }
}

fn settle<T>(card: NodeRef, field: &'static str, outcome: Result<T, FieldError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(card = card.0, field, "Field left empty: {}", e);
            None
        }
    }
}

async fn child(
    session: &dyn DriverSession,
    card: NodeRef,
    selector: &str,
) -> Result<NodeRef, FieldError> {
    session
        .find_within(card, selector)
        .await?
        .ok_or_else(|| FieldError::Missing(selector.to_string()))
}

async fn child_attribute(
    session: &dyn DriverSession,
    card: NodeRef,
    selector: &str,
    attribute: &str,
) -> Result<String, FieldError> {
    let node = child(session, card, selector).await?;
    session
        .attribute(node, attribute)
        .await?
        .map(|v| v.trim().to_string())
        .ok_or_else(|| FieldError::NoAttribute(attribute.to_string()))
}

async fn field_text(
    session: &dyn DriverSession,
    card: NodeRef,
    selector: &str,
) -> Result<String, FieldError> {
    let node = child(session, card, selector).await?;
    Ok(session.text(node).await?.trim().to_string())
}

async fn field_link(
    session: &dyn DriverSession,
    card: NodeRef,
    selectors: &SelectorConfig,
    base: &Url,
) -> Result<String, FieldError> {
    let raw = child_attribute(session, card, &selectors.link, &selectors.link_attribute).await?;
    if raw.is_empty() {
        return Ok(raw);
    }
    base.join(&raw)
        .map(String::from)
        .map_err(|_| FieldError::BadLink(raw))
}

async fn field_date(
    session: &dyn DriverSession,
    card: NodeRef,
    selectors: &SelectorConfig,
) -> Result<NaiveDate, FieldError> {
    let raw = child_attribute(session, card, &selectors.date, &selectors.date_attribute).await?;
    parse_posted_date(&raw).ok_or(FieldError::BadDate(raw))
}

/// Calendar date of an ISO-8601 timestamp.
///
/// Accepts `YYYY-MM-DD`, naive datetimes with `T` or space separators
/// (seconds and fractions optional), and RFC 3339 datetimes with an offset,
/// whose date is taken as written.
pub fn parse_posted_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_local().date())
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
