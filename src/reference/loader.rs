//! Spreadsheet reading for reference files.
//!
//! Uses calamine to open xlsx/xls/xlsb/ods workbooks and stages every
//! worksheet as a [`RawTable`]. The first row of a sheet's used range is
//! the header row.

use super::table::RawTable;
use crate::error::{LookupError, Result};
use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{Duration, NaiveDate};
use std::path::Path;
use tracing::debug;

/// Read the first worksheet of a workbook
pub fn load_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(path, e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            LookupError::data_unavailable(display_name(path), "workbook has no sheets")
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| unreadable(path, e))?;

    let table = range_to_table(&display_name(path), &range);
    debug!(
        "Loaded {} rows x {} columns from {} [{}]",
        table.len(),
        table.headers().len(),
        path.display(),
        sheet_name
    );
    Ok(table)
}

/// Read every worksheet of a workbook, in workbook order
pub fn load_workbook(path: &Path) -> Result<Vec<(String, RawTable)>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(path, e))?;
    let mut sheets = Vec::new();

    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| unreadable(path, e))?;
        let table = range_to_table(&format!("{} [{}]", display_name(path), sheet_name), &range);
        debug!("Loaded sheet '{}' with {} rows", sheet_name, table.len());
        sheets.push((sheet_name, table));
    }

    Ok(sheets)
}

/// Stage a cell range: first row as headers, the rest as data
pub fn range_to_table(name: &str, range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_to_string(cell).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<Option<String>>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .filter(|row: &Vec<Option<String>>| row.iter().any(Option::is_some))
        .collect();

    RawTable::new(name, headers, data)
}

/// Render a cell as text. Integral numbers drop the decimal part, dates
/// render as ISO dates.
pub fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(n) => Some(format_number(*n)),
        Data::Int(n) => Some(n.to_string()),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Some(format_serial_date(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("#{:?}", e)),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Excel serial date (1900 system) to `YYYY-MM-DD`, with the time when present
pub fn format_serial_date(serial: f64) -> String {
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return format_number(serial);
    };

    let days = serial.floor() as i64;
    let seconds = ((serial - serial.floor()) * 86_400.0).round() as i64;

    let Some(datetime) = epoch
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.checked_add_signed(Duration::days(days)))
        .and_then(|day| day.checked_add_signed(Duration::seconds(seconds)))
    else {
        return format_number(serial);
    };

    if seconds == 0 {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn unreadable(path: &Path, error: impl std::fmt::Display) -> LookupError {
    LookupError::data_unavailable(display_name(path), format!("cannot read workbook: {}", error))
}
