//! PGA code catalogue queries.
//!
//! Option lists for the composite key columns and filtered views of the
//! PGA code table, independent of any HS code.

use crate::constants::{JOIN_KEY_COLUMNS, PGA_KEY_COLUMNS};
use crate::error::Result;
use crate::models::{CodeFilter, PgaOptions, Record};
use crate::reference::ReferenceData;
use crate::reference::frame::{column_values, to_records, without_internal_columns};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Sorted distinct non-empty values of each PGA key column
pub fn pga_options(data: &ReferenceData) -> Result<PgaOptions> {
    let [agency, code, program] =
        PGA_KEY_COLUMNS.map(|name| distinct_sorted(data.pga_codes(), name));

    Ok(PgaOptions {
        agency_code: agency?,
        code: code?,
        program_code: program?,
    })
}

fn distinct_sorted(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let values: BTreeSet<String> = column_values(df, name)?
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();

    Ok(values.into_iter().collect())
}

/// PGA code rows matching every non-blank filter, compared case-insensitively
pub fn filter_codes(data: &ReferenceData, filter: &CodeFilter) -> Result<Vec<Record>> {
    let wanted = [&filter.agency, &filter.code, &filter.program];

    let predicate = JOIN_KEY_COLUMNS
        .iter()
        .zip(wanted)
        .filter_map(|(key, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty()).then(|| col(*key).eq(lit(value.to_lowercase())))
        })
        .reduce(|acc, expr| acc.and(expr));

    let mut rows = data.pga_codes().clone().lazy();
    if let Some(predicate) = predicate {
        rows = rows.filter(predicate);
    }
    let matched = rows.collect()?;

    debug!("PGA codes matching {:?}: {}", filter, matched.height());

    Ok(to_records(&without_internal_columns(&matched)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::tests::sample_data;
    use serde_json::Value;

    fn agencies(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .filter_map(|r| r.get("Agency Code").and_then(Value::as_str))
            .collect()
    }

    #[test]
    fn test_pga_options_sorted_distinct() {
        let options = pga_options(&sample_data()).unwrap();

        assert_eq!(options.agency_code, vec!["APH", "EPA", "FDA"]);
        assert_eq!(options.code, vec!["AL1", "EP1", "FD1", "FD2"]);
        // The blank program code is excluded
        assert_eq!(options.program_code, vec!["APL", "FOO", "PS1"]);
    }

    #[test]
    fn test_pga_options_serialize_camel_case() {
        let options = pga_options(&sample_data()).unwrap();
        let json = serde_json::to_value(&options).unwrap();

        assert!(json.get("agencyCode").is_some());
        assert!(json.get("programCode").is_some());
    }

    #[test]
    fn test_filter_codes_without_filter_returns_all() {
        let data = sample_data();
        let records = filter_codes(&data, &CodeFilter::default()).unwrap();

        assert_eq!(records.len(), 4);
        assert!(records[0].keys().all(|name| !name.starts_with("__")));
    }

    #[test]
    fn test_filter_codes_keeps_published_headers() {
        let records = filter_codes(&sample_data(), &CodeFilter::default()).unwrap();

        assert_eq!(records[0].get("PGA Flag"), Some(&Value::from("APHIS Lacey Act")));
        assert!(records[0].keys().all(|name| !name.ends_with("_pga")));
    }

    #[test]
    fn test_filter_codes_case_insensitive() {
        let data = sample_data();
        let filter = CodeFilter {
            agency: Some(" fda".to_string()),
            ..Default::default()
        };

        let records = filter_codes(&data, &filter).unwrap();
        assert_eq!(agencies(&records), vec!["FDA", "FDA"]);
    }

    #[test]
    fn test_filter_codes_combines_filters() {
        let data = sample_data();
        let filter = CodeFilter {
            agency: Some("FDA".to_string()),
            code: Some("fd1".to_string()),
            program: Some("  ".to_string()),
        };

        let records = filter_codes(&data, &filter).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Program Code"), Some(&Value::from("FOO")));
    }

    #[test]
    fn test_filter_codes_no_match() {
        let data = sample_data();
        let filter = CodeFilter {
            code: Some("ZZZ".to_string()),
            ..Default::default()
        };
        assert!(filter_codes(&data, &filter).unwrap().is_empty());
    }
}
