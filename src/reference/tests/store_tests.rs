//! Snapshot sharing and reload tests

use super::*;
use crate::config::LookupConfig;
use crate::reference::ReferenceStore;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_snapshot_is_shared_until_reload() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_data_dir(temp_dir.path());

    let config = LookupConfig::default().with_data_dir(temp_dir.path());
    let store = ReferenceStore::open(config).unwrap();

    let first = store.snapshot();
    let second = store.snapshot();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.hts().height(), HTS_ROWS.len());

    // Replace the HTS table with a single row and reload
    write_workbook(
        &temp_dir.path().join("PGA_HTS.xlsx"),
        &[SheetFixture::text("PGA_HTS", HTS_HEADERS, &HTS_ROWS[..1])],
    );
    let reloaded = store.reload().unwrap();

    assert_eq!(reloaded.hts().height(), 1);
    assert!(Arc::ptr_eq(&reloaded, &store.snapshot()));

    // Readers holding the old snapshot are unaffected
    assert_eq!(first.hts().height(), HTS_ROWS.len());
}

#[test]
fn test_failed_reload_keeps_previous_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_data_dir(temp_dir.path());

    let config = LookupConfig::default().with_data_dir(temp_dir.path());
    let store = ReferenceStore::open(config).unwrap();
    let before = store.snapshot();

    std::fs::remove_file(temp_dir.path().join("PGA_HTS.xlsx")).unwrap();
    assert!(store.reload().unwrap_err().is_data_unavailable());
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn test_with_data_wraps_in_memory_snapshot() {
    let store = ReferenceStore::with_data(LookupConfig::default(), sample_data());
    assert_eq!(store.snapshot().pga_codes().height(), PGA_ROWS.len());
}
