//! Error types for the scrape pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a browser driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The browser process could not be started or reached.
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("timed out: {0}")]
    Timeout(String),

    /// A node handle no longer resolves.
    #[error("node not found: {0}")]
    NotFound(String),

    #[error("script failed: {0}")]
    Script(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("session closed")]
    Closed,
}

/// Failures that abort one search invocation.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Fatal: no partial result is produced.
    #[error("could not start browser session: {0}")]
    SessionStart(#[source] DriverError),

    /// No result node appeared within the wait budget.
    #[error("no results matching '{selector}' appeared within {seconds}s")]
    Timeout { selector: String, seconds: u64 },

    #[error("browser error: {0}")]
    Driver(#[from] DriverError),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid search url: {0}")]
    InvalidUrl(String),
}

/// Failures writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The writer for `format` was not compiled in (cargo feature `feature`).
    #[error("{format} export unavailable: built without the '{feature}' feature")]
    DependencyMissing {
        format: &'static str,
        feature: &'static str,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = SearchError::Timeout {
            selector: "div.base-card".to_string(),
            seconds: 20,
        };
        assert_eq!(
            err.to_string(),
            "no results matching 'div.base-card' appeared within 20s"
        );
    }

    #[test]
    fn test_driver_error_converts_to_search_error() {
        let err: SearchError = DriverError::Closed.into();
        assert!(matches!(err, SearchError::Driver(DriverError::Closed)));
    }

    #[test]
    fn test_session_start_keeps_source() {
        use std::error::Error as _;
        let err = SearchError::SessionStart(DriverError::Launch("no chrome".to_string()));
        assert!(err.to_string().contains("no chrome"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_dependency_missing_display() {
        let err = ExportError::DependencyMissing {
            format: "xlsx",
            feature: "xlsx",
        };
        assert!(err.to_string().contains("without the 'xlsx' feature"));
    }
}
