//! CSV output: UTF-8, header row, fixed column order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::{ExportFormat, TableWriter};
use crate::error::ExportError;
use crate::types::{ResultSet, COLUMNS};

/// Delimited-text writer. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl CsvWriter {
    /// Render `results` in memory, e.g. for a download response.
    pub fn to_bytes(results: &ResultSet) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_rows(&mut writer, results)?;
        writer
            .into_inner()
            .map_err(|e| ExportError::Csv(e.into_error().into()))
    }
}

impl TableWriter for CsvWriter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn write(&self, results: &ResultSet, path: &Path) -> Result<(), ExportError> {
        let io_err = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = csv::Writer::from_writer(file);
        write_rows(&mut writer, results)?;
        writer.flush().map_err(io_err)
    }
}

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, results: &ResultSet) -> Result<(), csv::Error> {
    writer.write_record(COLUMNS)?;
    for record in results {
        writer.write_record(record.to_row())?;
    }
    Ok(())
}
