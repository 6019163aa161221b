//! Tests for the HTS/PGA join and compliance sections

use super::*;
use crate::lookup::pga::{lookup_pga_hts, lookup_pga_sections};
use crate::reference::ReferenceData;
use crate::reference::table::RawTable;
use crate::reference::tests::{sample_chapters, sample_pga};

/// Snapshot whose HTS sheet also carries a `Guidance` column
fn data_with_hts_guidance() -> ReferenceData {
    let hts = RawTable::from_strs(
        "PGA_HTS",
        &["HTS Number - Full", "PGA Name Code", "PGA Flag Code", "PGA Program Code", "Guidance"],
        &[&["0101210010", "APH", "AL1", "APL", "Check the HTS note"]],
    );
    ReferenceData::from_tables(sample_chapters(), hts, sample_pga(), Vec::new()).unwrap()
}

#[test]
fn test_pga_hts_exact_match_only() {
    let data = sample_data();
    let records = lookup_pga_hts(&data, "0101210010").unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| field(r, "HsCode") == Some("0101210010")));

    // The heading row "01012100" is a prefix, never an exact match
    let heading = lookup_pga_hts(&data, "01012100").unwrap();
    assert_eq!(heading.len(), 1);
    assert_eq!(field(&heading[0], "HsCode"), Some("01012100"));
}

#[test]
fn test_pga_hts_merges_hts_and_pga_fields() {
    let data = sample_data();
    let records = lookup_pga_hts(&data, "0101210010").unwrap();

    let first = &records[0];
    assert_eq!(field(first, "HTS Long Description"), Some("Purebred breeding horses"));
    assert_eq!(field(first, "PGA Name Code"), Some("APH"));
    assert_eq!(field(first, "Tariff Flag Code Definition"), Some("Data required"));
    assert_eq!(field(first, "PGA Flag"), Some("Animal lab"));
    assert_eq!(field(first, "PGA Flag_pga"), Some("APHIS Lacey Act"));

    // Missing program codes on both sides still match
    let second = &records[1];
    assert_eq!(field(second, "PGA Name Code"), Some("FDA"));
    assert_eq!(field(second, "Code"), Some("FD2"));
    assert_eq!(
        field(second, "PGA Compliance Message (see final in shared google drive)"),
        Some("Prior notice")
    );

    // Internal key and row columns never leak
    assert!(first.keys().all(|name| !name.starts_with("__")));
    // Change Pending Status is blank across the result
    assert!(!first.contains_key("Change Pending Status"));
}

#[test]
fn test_pga_hts_keys_compare_case_insensitively() {
    let data = sample_data();
    let records = lookup_pga_hts(&data, "0901110010").unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(field(&records[0], "PGA Name Code"), Some("fda"));
    assert_eq!(field(&records[0], "Agency Code"), Some("FDA"));
    assert_eq!(field(&records[0], "Program Code"), Some("FOO"));
}

#[test]
fn test_pga_hts_unmatched_row_keeps_hts_fields() {
    let data = sample_data();
    let records = lookup_pga_hts(&data, "0901110010").unwrap();

    let unmatched = &records[1];
    assert_eq!(field(unmatched, "PGA Name Code"), Some("USD"));
    assert_eq!(unmatched.get("Agency Code"), Some(&Value::Null));
    assert_eq!(unmatched.get("Tariff Flag Code Definition"), Some(&Value::Null));
}

#[test]
fn test_pga_hts_unknown_code_is_empty() {
    let data = sample_data();
    assert!(lookup_pga_hts(&data, "9401610020").unwrap().is_empty());
}

#[test]
fn test_pga_sections_distinct_trimmed_values() {
    let data = sample_data();
    let sections = lookup_pga_sections(&data, "0101210010").unwrap();

    assert_eq!(sections.get("R= Required\n M = May be required"), Some(&["R".to_string()][..]));
    assert_eq!(
        sections.get("PGA Compliance Message (see final in shared google drive)"),
        Some(&["Provide Lacey Act data".to_string(), "Prior notice".to_string()][..])
    );
    assert_eq!(sections.get("List of Documents Required"), Some(&["PPQ 505".to_string()][..]));

    // Blank in both matched rows, so omitted
    assert!(sections.get("Conditions to Disclaim").is_none());
    // Not present in the PGA table at all
    assert!(sections.get("Applicable HTS Codes").is_none());
}

#[test]
fn test_pga_sections_never_hold_empty_values() {
    let data = sample_data();
    for code in ["0101210010", "0901110010", "01012100"] {
        let sections = lookup_pga_sections(&data, code).unwrap();
        for (name, values) in sections.iter() {
            assert_eq!(name, name.trim());
            assert!(!values.is_empty(), "{} empty for {}", name, code);
            for value in values {
                assert!(!value.is_empty());
                assert_eq!(value, value.trim());
            }
            let mut deduped = values.to_vec();
            deduped.dedup();
            assert_eq!(deduped.len(), values.len());
        }
    }
}

#[test]
fn test_pga_sections_only_from_matched_codes() {
    let data = sample_data();
    let sections = lookup_pga_sections(&data, "0901110010").unwrap();

    assert_eq!(
        sections.get("PGA Compliance Message (see final in shared google drive)"),
        Some(&["Prior notice".to_string()][..])
    );
    assert_eq!(
        sections.get("Conditions to Disclaim"),
        Some(&["Not for human consumption".to_string()][..])
    );
    // EPA is never referenced by an HTS row
    assert!(
        sections
            .iter()
            .all(|(_, values)| !values.iter().any(|v| v.contains("Pesticide")))
    );
}

#[test]
fn test_pga_sections_unknown_code_is_empty() {
    let data = sample_data();
    assert!(lookup_pga_sections(&data, "9401610020").unwrap().is_empty());
}

#[test]
fn test_pga_hts_suffixes_only_clashing_pga_columns() {
    let data = data_with_hts_guidance();
    let records = lookup_pga_hts(&data, "0101210010").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(field(&records[0], "Guidance"), Some("Check the HTS note"));
    assert_eq!(field(&records[0], "Guidance_pga"), Some("See APHIS guidance"));
    assert_eq!(field(&records[0], "PGA Flag"), Some("APHIS Lacey Act"));
}

#[test]
fn test_pga_sections_read_columns_shared_with_hts() {
    let data = data_with_hts_guidance();
    let sections = lookup_pga_sections(&data, "0101210010").unwrap();

    assert_eq!(sections.get("Guidance"), Some(&["See APHIS guidance".to_string()][..]));
}
