//! HTS-to-PGA join and compliance sections.
//!
//! The HTS table is filtered to the exact target code before joining, so
//! the join only ever touches the handful of rows for one code. Keys are
//! compared on the normalized `__key_*` columns the loader adds to both
//! tables.

use crate::constants::{
    HS_CODE_COLUMN, HTS_ROW_COLUMN, JOIN_KEY_COLUMNS, PGA_ROW_COLUMN, PGA_SECTION_COLUMNS,
    PGA_SUFFIX,
};
use crate::error::Result;
use crate::models::{PgaSections, Record};
use crate::reference::ReferenceData;
use crate::reference::frame::{
    column_values, distinct_trimmed, drop_empty_columns, to_records, without_internal_columns,
};
use polars::prelude::*;
use tracing::debug;

fn join_keys() -> Vec<Expr> {
    JOIN_KEY_COLUMNS.iter().map(|name| col(*name)).collect()
}

fn source_order() -> SortMultipleOptions {
    SortMultipleOptions::default().with_maintain_order(true)
}

/// HTS rows whose `HsCode` equals `target` exactly, tagged with their row position
fn hts_matches(data: &ReferenceData, target: &str) -> LazyFrame {
    data.hts()
        .clone()
        .lazy()
        .with_row_index(HTS_ROW_COLUMN, None)
        .filter(col(HS_CODE_COLUMN).eq(lit(target)))
}

/// HTS rows for `target` left-joined with their PGA code definitions.
/// PGA columns that share a name with an HTS column come back suffixed `_pga`.
pub fn lookup_pga_hts(data: &ReferenceData, target: &str) -> Result<Vec<Record>> {
    let pga = data
        .pga_codes()
        .clone()
        .lazy()
        .with_row_index(PGA_ROW_COLUMN, None);

    let joined = hts_matches(data, target)
        .join(
            pga,
            join_keys(),
            join_keys(),
            JoinArgs::new(JoinType::Left).with_suffix(Some(PGA_SUFFIX.into())),
        )
        .sort_by_exprs([col(HTS_ROW_COLUMN), col(PGA_ROW_COLUMN)], source_order())
        .collect()?;

    debug!("HTS/PGA join for {}: {} rows", target, joined.height());

    let visible = without_internal_columns(&joined)?;
    Ok(to_records(&drop_empty_columns(&visible)?)?)
}

/// Distinct compliance values from PGA codes referenced by any HTS row for `target`
pub fn lookup_pga_sections(data: &ReferenceData, target: &str) -> Result<PgaSections> {
    let hts_keys = hts_matches(data, target).select(join_keys());

    let matched = data
        .pga_codes()
        .clone()
        .lazy()
        .with_row_index(PGA_ROW_COLUMN, None)
        .join(
            hts_keys,
            join_keys(),
            join_keys(),
            JoinArgs::new(JoinType::Inner),
        )
        .sort_by_exprs([col(PGA_ROW_COLUMN)], source_order())
        .collect()?;

    debug!("PGA codes matched for {}: {}", target, matched.height());

    let mut sections = PgaSections::default();
    for section in PGA_SECTION_COLUMNS {
        let name = section.trim();
        if let Some(values) = column_values(&matched, name)? {
            sections.insert(name, distinct_trimmed(values));
        }
    }

    Ok(sections)
}
