//! PGA Lookup Library
//!
//! Resolves HTS tariff codes to the U.S. Partner Government Agency (PGA)
//! requirements recorded in the ACE agency tariff reference spreadsheets.
//!
//! This library provides tools for:
//! - Loading the chapter, HTS and PGA code tables plus per-chapter rule sheets
//! - Joining HTS rows to PGA code definitions on a normalized composite key
//! - Collecting distinct PGA compliance requirements per HS code
//! - Falling back from code to heading to chapter when matching HS rules
//! - Sharing one read-only reference snapshot across concurrent lookups

pub mod codes;
pub mod config;
pub mod constants;
pub mod error;
pub mod lookup;
pub mod models;
pub mod reference;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{DataPolicy, LookupConfig};
pub use error::{LookupError, Result};
pub use lookup::{LookupEngine, LookupService};
pub use models::{LookupRequest, LookupResponse, PgaSections};
pub use reference::{ReferenceData, ReferenceStore};
