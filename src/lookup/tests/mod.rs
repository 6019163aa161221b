//! Tests for the lookup stages and engine
//!
//! The sample snapshot comes from the reference test fixtures.

pub mod chapters_tests;
pub mod pga_tests;

pub use crate::reference::tests::{sample_data, write_sample_data_dir};

use crate::models::Record;
use serde_json::Value;

/// String value of a record field, `None` for null or absent
pub fn field<'a>(record: &'a Record, name: &str) -> Option<&'a str> {
    record.get(name).and_then(Value::as_str)
}
