//! HS chapter description lookup.

use crate::constants::CHAPTER_COLUMN;
use crate::error::Result;
use crate::models::Record;
use crate::reference::ReferenceData;
use crate::reference::frame::{drop_empty_columns, to_records};
use polars::prelude::*;

/// Chapter table rows whose padded `Chapter` equals `chapter_key`
pub fn lookup_chapters(data: &ReferenceData, chapter_key: &str) -> Result<Vec<Record>> {
    let matched = data
        .chapters()
        .clone()
        .lazy()
        .filter(col(CHAPTER_COLUMN).eq(lit(chapter_key)))
        .collect()?;

    Ok(to_records(&drop_empty_columns(&matched)?)?)
}
