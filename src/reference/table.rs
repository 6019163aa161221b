//! Row-oriented staging for reference sheets.
//!
//! Sheets arrive as header + string rows. Header cleanup, key
//! normalization and gap filling happen here, before the table is
//! handed to polars as an all-string `DataFrame`.

use crate::error::{LookupError, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// A sheet as read from disk: trimmed headers and optional string cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Build a table, trimming and de-duplicating headers.
    ///
    /// Rows are padded or truncated to the header width; empty cells become `None`.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Self {
        let headers = clean_headers(headers);
        let width = headers.len();

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row.into_iter()
                    .map(|cell| cell.filter(|value| !value.is_empty()))
                    .collect()
            })
            .collect();

        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Build a table from string slices; empty strings are missing cells
    pub fn from_strs(name: impl Into<String>, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| Some(cell.to_string())).collect())
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }

    /// Index of a column the lookup cannot work without
    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column).ok_or_else(|| {
            LookupError::data_unavailable(
                self.name.clone(),
                format!("missing required column '{}'", column),
            )
        })
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, column: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }

    /// Rename a column; returns false when `from` is absent
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Rewrite every cell of a column in place
    pub fn map_column<F>(&mut self, column: &str, f: F) -> Result<()>
    where
        F: Fn(Option<&str>) -> Option<String>,
    {
        let idx = self.require_column(column)?;
        for row in &mut self.rows {
            row[idx] = f(row[idx].as_deref()).filter(|value| !value.is_empty());
        }
        Ok(())
    }

    /// Append a column computed from an existing one, replacing any column of the same name
    pub fn derive_column<F>(&mut self, name: &str, source: &str, f: F) -> Result<()>
    where
        F: Fn(Option<&str>) -> Option<String>,
    {
        let source_idx = self.require_column(source)?;
        let values: Vec<Option<String>> = self
            .rows
            .iter()
            .map(|row| f(row[source_idx].as_deref()))
            .collect();

        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Add a join key column holding the trimmed, lower-cased source value.
    ///
    /// Missing cells become empty strings, so two missing keys compare equal.
    pub fn derive_join_key(&mut self, name: &str, source: &str) -> Result<()> {
        self.derive_column(name, source, |value| {
            Some(value.unwrap_or("").trim().to_lowercase())
        })
    }

    /// Forward-fill then back-fill missing cells in every column except `skip`
    pub fn fill_forward_backward(&mut self, skip: &[&str]) {
        for idx in 0..self.headers.len() {
            if skip.contains(&self.headers[idx].as_str()) {
                continue;
            }

            let mut last: Option<String> = None;
            for row in &mut self.rows {
                match &row[idx] {
                    Some(value) => last = Some(value.clone()),
                    None => row[idx] = last.clone(),
                }
            }

            let mut next: Option<String> = None;
            for row in self.rows.iter_mut().rev() {
                match &row[idx] {
                    Some(value) => next = Some(value.clone()),
                    None => row[idx] = next.clone(),
                }
            }
        }
    }

    /// Materialize as a `DataFrame` of string columns
    pub fn into_frame(self) -> Result<DataFrame> {
        let width = self.headers.len();
        let mut columns: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(self.rows.len()); width];

        for row in self.rows {
            for (idx, cell) in row.into_iter().enumerate() {
                columns[idx].push(cell);
            }
        }

        let columns: Vec<Column> = self
            .headers
            .into_iter()
            .zip(columns)
            .map(|(header, values)| Column::new(header.into(), values))
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}

/// Trim headers, name blank ones `Unnamed: {idx}` and number repeats `name.1`, `name.2`
fn clean_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut cleaned = Vec::with_capacity(headers.len());

    for (idx, header) in headers.into_iter().enumerate() {
        let trimmed = header.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            trimmed.to_string()
        };

        let mut candidate = base.clone();
        let mut counter = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, counter);
            counter += 1;
        }

        seen.insert(candidate.clone());
        cleaned.push(candidate);
    }

    cleaned
}

/// Left-pad with `'0'` to `width` characters, leaving longer values untouched
pub fn zero_pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        value.to_string()
    } else {
        format!("{}{}", "0".repeat(width - len), value)
    }
}

/// First `n` characters of a value
pub fn prefix_chars(value: &str, n: usize) -> String {
    value.chars().take(n).collect()
}
