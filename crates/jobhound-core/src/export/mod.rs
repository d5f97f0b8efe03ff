//! Export of result sets to spreadsheet or CSV files.
//!
//! The spreadsheet writer is a compile-time capability (cargo feature
//! `xlsx`). [`ExportCapabilities::probe`] reports it up front; when it is
//! missing, [`ExportSink::export`] writes CSV next to the requested path and
//! says so in the returned [`ExportOutcome`].

mod csv_writer;
#[cfg(feature = "xlsx")]
mod xlsx_writer;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::ExportError;
use crate::types::ResultSet;

pub use csv_writer::CsvWriter;
#[cfg(feature = "xlsx")]
pub use xlsx_writer::XlsxWriter;

/// File formats jobhound can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Writes a result set to a file in one format.
pub trait TableWriter: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn write(&self, results: &ResultSet, path: &Path) -> Result<(), ExportError>;
}

/// Which writers this build can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportCapabilities {
    pub spreadsheet: bool,
}

impl ExportCapabilities {
    /// Capabilities compiled into this binary.
    pub fn probe() -> Self {
        Self {
            spreadsheet: cfg!(feature = "xlsx"),
        }
    }
}

/// What an export actually produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// The file that was written, which differs from the requested path
    /// after a fallback.
    pub path: PathBuf,
    pub format: ExportFormat,
    /// Why the primary format was skipped, if it was.
    pub fallback: Option<String>,
}

/// Writes result sets, preferring the spreadsheet format.
pub struct ExportSink {
    primary: Option<Box<dyn TableWriter>>,
    fallback: CsvWriter,
}

impl ExportSink {
    /// Sink using whatever `capabilities` allow.
    pub fn new(capabilities: ExportCapabilities) -> Self {
        let primary = if capabilities.spreadsheet {
            spreadsheet_writer()
        } else {
            None
        };
        Self {
            primary,
            fallback: CsvWriter,
        }
    }

    /// Sink with an explicit primary writer.
    pub fn with_primary(primary: Box<dyn TableWriter>) -> Self {
        Self {
            primary: Some(primary),
            fallback: CsvWriter,
        }
    }

    pub fn primary_format(&self) -> ExportFormat {
        self.primary
            .as_ref()
            .map_or(ExportFormat::Csv, |w| w.format())
    }

    /// Write `results` to `path`.
    ///
    /// A `.csv` path is written as CSV directly. Otherwise the primary writer
    /// is used; if it is unavailable the data goes to `path` with a `.csv`
    /// extension instead. Any other write failure is returned.
    pub fn export(&self, results: &ResultSet, path: &Path) -> Result<ExportOutcome, ExportError> {
        if has_extension(path, ExportFormat::Csv) {
            return self.write_fallback(results, path, None);
        }

        let missing = match &self.primary {
            Some(writer) => match writer.write(results, path) {
                Ok(()) => {
                    info!(path = %path.display(), format = %writer.format(), "Exported {} jobs", results.len());
                    return Ok(ExportOutcome {
                        path: path.to_path_buf(),
                        format: writer.format(),
                        fallback: None,
                    });
                }
                Err(e @ ExportError::DependencyMissing { .. }) => e,
                Err(e) => return Err(e),
            },
            None => ExportError::DependencyMissing {
                format: "xlsx",
                feature: "xlsx",
            },
        };

        warn!("{}; falling back to CSV", missing);
        let csv_path = path.with_extension(ExportFormat::Csv.extension());
        self.write_fallback(results, &csv_path, Some(missing.to_string()))
    }

    fn write_fallback(
        &self,
        results: &ResultSet,
        path: &Path,
        reason: Option<String>,
    ) -> Result<ExportOutcome, ExportError> {
        self.fallback.write(results, path)?;
        info!(path = %path.display(), format = "csv", "Exported {} jobs", results.len());
        Ok(ExportOutcome {
            path: path.to_path_buf(),
            format: ExportFormat::Csv,
            fallback: reason,
        })
    }
}

impl Default for ExportSink {
    fn default() -> Self {
        Self::new(ExportCapabilities::probe())
    }
}

fn has_extension(path: &Path, format: ExportFormat) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(format.extension()))
}

#[cfg(feature = "xlsx")]
fn spreadsheet_writer() -> Option<Box<dyn TableWriter>> {
    Some(Box::new(XlsxWriter))
}

#[cfg(not(feature = "xlsx"))]
fn spreadsheet_writer() -> Option<Box<dyn TableWriter>> {
    None
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
