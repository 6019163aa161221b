//! Application constants for the PGA lookup
//!
//! Reference file names, the column names the join engine depends on,
//! and defaults used throughout the crate.

// =============================================================================
// Reference Files
// =============================================================================

/// Logical name of the HS chapter description table
pub const CHAPTERS_FILE: &str = "HS_Chapters_lookup";

/// Logical name of the HTS-to-PGA mapping table
pub const PGA_HTS_FILE: &str = "PGA_HTS";

/// Logical name of the PGA code definition table
pub const PGA_CODES_FILE: &str = "PGA_codes";

/// Logical name of the per-chapter HS rules workbook (optional)
pub const HS_RULES_FILE: &str = "hs_codes";

/// Spreadsheet extensions tried, in order, when resolving a logical name
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "PGA_LOOKUP_DATA_DIR";

/// Directory name under the user data directory
pub const DEFAULT_DATA_DIR_NAME: &str = "pga-lookup";

// =============================================================================
// Column Names
// =============================================================================

/// Chapter code column in the chapter table and derived on rule sheets
pub const CHAPTER_COLUMN: &str = "Chapter";

/// Heading (first four digits) column derived on rule sheets
pub const HEADER_COLUMN: &str = "Header";

/// Full HS code column, as named in the HTS table and on rule sheets
pub const HS_CODE_COLUMN: &str = "HsCode";

/// Source name of the full HS code column in the HTS table
pub const HTS_NUMBER_COLUMN: &str = "HTS Number - Full";

/// Composite PGA reference key as named in the HTS table
pub const HTS_KEY_COLUMNS: [&str; 3] = ["PGA Name Code", "PGA Flag Code", "PGA Program Code"];

/// Composite PGA reference key as named in the PGA code table
pub const PGA_KEY_COLUMNS: [&str; 3] = ["Agency Code", "Code", "Program Code"];

/// Prefix reserved for columns the loader adds for its own use
pub const INTERNAL_COLUMN_PREFIX: &str = "__";

/// Normalized (trimmed, lower-cased) composite key columns shared by both tables
pub const JOIN_KEY_COLUMNS: [&str; 3] = ["__key_agency", "__key_code", "__key_program"];

/// Row position columns used to keep join output in source order
pub const HTS_ROW_COLUMN: &str = "__hts_row";
pub const PGA_ROW_COLUMN: &str = "__pga_row";

/// Suffix for PGA columns whose names clash with HTS columns after the join
pub const PGA_SUFFIX: &str = "_pga";

/// PGA code columns reported as compliance sections, in output order
pub const PGA_SECTION_COLUMNS: &[&str] = &[
    "R= Required\n M = May be required",
    "Tariff Flag Code Definition",
    "PGA Compliance Message (see final in shared google drive)",
    "Summary of Requirements",
    "Conditions to Disclaim",
    "List of Documents Required",
    "Links to Example Documents",
    "Applicable HTS Codes",
    "Guidance",
    "Link to Disclaimer Form Template",
    "CFR Link",
    "Website Link",
];

// =============================================================================
// Rule Sheets
// =============================================================================

/// Sheet name patterns for chapter rule sheets, tried in order
pub const RULE_SHEET_PREFIXES: &[&str] = &["HTS Chapter ", "Chapter "];

/// Matches a chapter rule sheet name and captures the chapter number
pub const RULE_SHEET_PATTERN: &str = r"^(?:HTS )?Chapter (\d+)$";

/// Length of the HS heading used for the second rule fallback
pub const HEADING_LENGTH: usize = 4;

/// Width of a zero-padded chapter key
pub const CHAPTER_KEY_WIDTH: usize = 2;

// =============================================================================
// Output
// =============================================================================

/// Citation attached to every lookup response
pub const DEFAULT_DISCLAIMER: &str = "Sources: I’ve used the ACE Agency Tariff Code Reference Guide (March 5, 2024), ACE Appendix PGA (December 12, 2024), Federal Register notices (e.g., CPSC expansion, September 9, 2024)";

/// Default number of concurrent lookups for batch runs
pub const DEFAULT_BATCH_WORKERS: usize = 4;
