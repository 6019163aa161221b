//! Tests for chapter description lookup

use super::*;
use crate::lookup::chapter_key;
use crate::lookup::chapters::lookup_chapters;

#[test]
fn test_chapter_key_is_two_characters() {
    assert_eq!(chapter_key("0101210010"), "01");
    assert_eq!(chapter_key("9401610020"), "94");
    assert_eq!(chapter_key("9"), "09");
    assert_eq!(chapter_key(""), "00");
    for code in ["", "1", "12", "123", "0901110010"] {
        assert_eq!(chapter_key(code).len(), 2, "key for {:?}", code);
    }
}

#[test]
fn test_lookup_chapters_matches_padded_key() {
    let data = sample_data();
    let records = lookup_chapters(&data, "01").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(field(&records[0], "Chapter"), Some("01"));
    assert_eq!(field(&records[0], "Description"), Some("Live animals"));
}

#[test]
fn test_lookup_chapters_drops_blank_columns_and_fills_gaps() {
    let data = sample_data();
    let records = lookup_chapters(&data, "09").unwrap();

    assert_eq!(records.len(), 1);
    // Notes is blank in every row
    assert!(!records[0].contains_key("Notes"));
    // Section is carried forward from chapter 01
    assert_eq!(field(&records[0], "Section"), Some("Section I"));
}

#[test]
fn test_lookup_chapters_unknown_chapter() {
    let data = sample_data();
    assert!(lookup_chapters(&data, "55").unwrap().is_empty());
}
