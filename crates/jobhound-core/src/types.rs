//! Records, queries and result sets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Location used when the caller leaves it blank.
pub const DEFAULT_LOCATION: &str = "Worldwide";

/// Column headers, in export order.
pub const COLUMNS: [&str; 5] = ["Job Title", "Company", "Location", "Date Posted", "Link"];

/// One job listing. Any field may be empty when its lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Calendar date only, timezone-naive.
    pub date_posted: Option<NaiveDate>,
    /// Absolute URL, or empty.
    pub link: String,
}

impl JobRecord {
    /// Cells in [`COLUMNS`] order; an absent date renders as an empty cell.
    pub fn to_row(&self) -> [String; 5] {
        [
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
            self.date_posted
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.link.clone(),
        ]
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    location: String,
    target_count: usize,
}

impl SearchQuery {
    pub fn new(
        term: impl Into<String>,
        location: impl Into<String>,
        target_count: usize,
    ) -> Result<Self, SearchError> {
        let term = term.into().trim().to_string();
        if term.is_empty() {
            return Err(SearchError::InvalidQuery(
                "search term must not be empty".to_string(),
            ));
        }
        if target_count == 0 {
            return Err(SearchError::InvalidQuery(
                "number of results must be at least 1".to_string(),
            ));
        }

        let location = location.into().trim().to_string();
        let location = if location.is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            location
        };

        Ok(Self {
            term,
            location,
            target_count,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }
}

/// Assembled search output: at most `target_count` records, newest first,
/// undated records last. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<JobRecord>,
}

impl ResultSet {
    pub(crate) fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.records.iter()
    }

    /// Number of records carrying a posting date.
    pub fn dated_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.date_posted.is_some())
            .count()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a JobRecord;
    type IntoIter = std::slice::Iter<'a, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
