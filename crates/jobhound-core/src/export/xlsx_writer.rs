//! Spreadsheet output via `rust_xlsxwriter`.

use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

use super::{ExportFormat, TableWriter};
use crate::error::ExportError;
use crate::types::{ResultSet, COLUMNS};

const SHEET_NAME: &str = "Jobs";
const COLUMN_WIDTHS: [f64; 5] = [40.0, 28.0, 24.0, 12.0, 60.0];
const DATE_COLUMN: u16 = 3;

/// `.xlsx` writer: bold header row, real date cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl TableWriter for XlsxWriter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn write(&self, results: &ResultSet, path: &Path) -> Result<(), ExportError> {
        write_workbook(results, path).map_err(|e| ExportError::Spreadsheet(e.to_string()))
    }
}

fn write_workbook(results: &ResultSet, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *name, &header)?;
        sheet.set_column_width(col, COLUMN_WIDTHS[col as usize])?;
    }

    for (i, record) in results.iter().enumerate() {
        let row = i as u32 + 1;
        let cells = record.to_row();
        for (col, value) in cells.iter().enumerate() {
            let col = col as u16;
            if col != DATE_COLUMN {
                sheet.write_string(row, col, value)?;
            }
        }

        let Some(date) = record.date_posted else {
            continue;
        };
        let cell = u16::try_from(date.year())
            .ok()
            .and_then(|y| ExcelDateTime::from_ymd(y, date.month() as u8, date.day() as u8).ok());
        match cell {
            Some(cell) => {
                sheet.write_datetime_with_format(row, DATE_COLUMN, &cell, &date_format)?;
            }
            // Outside Excel's date range: keep the text.
            None => {
                sheet.write_string(row, DATE_COLUMN, &cells[DATE_COLUMN as usize])?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
