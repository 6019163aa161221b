//! `DataFrame` helpers shared by the lookup stages.

use crate::constants::INTERNAL_COLUMN_PREFIX;
use crate::models::Record;
use polars::prelude::*;
use serde_json::Value;

/// Drop columns whose every cell is null. A frame with no surviving
/// columns collapses to an empty frame.
pub fn drop_empty_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let keep: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|column| column.null_count() < column.len())
        .map(|column| column.name().clone())
        .collect();

    if keep.is_empty() {
        return Ok(DataFrame::empty());
    }
    df.select(keep)
}

/// Drop the loader's internal key and row-position columns
pub fn without_internal_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let keep: Vec<PlSmallStr> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !name.starts_with(INTERNAL_COLUMN_PREFIX))
        .cloned()
        .collect();

    if keep.is_empty() {
        return Ok(DataFrame::empty());
    }
    df.select(keep)
}

/// Convert string columns to flat records in row order
pub fn to_records(df: &DataFrame) -> PolarsResult<Vec<Record>> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            let values = column.as_materialized_series().str()?;
            Ok((column.name().to_string(), values))
        })
        .collect::<PolarsResult<Vec<_>>>()?;

    let records = (0..df.height())
        .map(|idx| {
            let mut record = Record::new();
            for (name, values) in &columns {
                let value = values
                    .get(idx)
                    .map(|v| Value::String(v.to_string()))
                    .unwrap_or(Value::Null);
                record.insert(name.clone(), value);
            }
            record
        })
        .collect();

    Ok(records)
}

/// Cells of a string column, or `None` when the column is absent
pub fn column_values(df: &DataFrame, name: &str) -> PolarsResult<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };

    let values = column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();

    Ok(Some(values))
}

/// Distinct non-empty trimmed values, in first-seen order
pub fn distinct_trimmed(values: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !distinct.iter().any(|seen| seen == trimmed) {
            distinct.push(trimmed.to_string());
        }
    }
    distinct
}
