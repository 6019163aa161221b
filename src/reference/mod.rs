//! Reference data snapshot.
//!
//! Loads the chapter, HTS and PGA code tables (plus the optional chapter
//! rules workbook), normalizes their key columns and holds them as
//! read-only `DataFrame`s. A [`ReferenceStore`] shares one snapshot across
//! concurrent lookups and swaps it only on an explicit reload.

pub mod frame;
pub mod loader;
pub mod table;

#[cfg(test)]
pub mod tests;

use self::loader::{load_table, load_workbook};
use self::table::{RawTable, prefix_chars, zero_pad};

use crate::config::LookupConfig;
use crate::constants::{
    CHAPTER_COLUMN, CHAPTER_KEY_WIDTH, HEADER_COLUMN, HEADING_LENGTH, HS_CODE_COLUMN,
    HTS_KEY_COLUMNS, HTS_NUMBER_COLUMN, JOIN_KEY_COLUMNS, PGA_KEY_COLUMNS, RULE_SHEET_PATTERN,
};
use crate::error::{LookupError, Result};

use polars::prelude::DataFrame;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Chapter rule sheets keyed by sheet name
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    sheets: BTreeMap<String, DataFrame>,
}

impl RuleBook {
    /// Build from workbook sheets. Sheets not named `Chapter N` / `HTS Chapter N`
    /// are ignored, as are chapter sheets without an `HsCode` column.
    pub fn from_sheets(sheets: Vec<(String, RawTable)>) -> Result<Self> {
        let pattern = Regex::new(RULE_SHEET_PATTERN)
            .map_err(|e| LookupError::configuration(format!("Invalid sheet pattern: {}", e)))?;

        let mut book = BTreeMap::new();
        for (sheet_name, mut table) in sheets {
            if !pattern.is_match(sheet_name.trim()) {
                debug!("Skipping non-chapter sheet '{}'", sheet_name);
                continue;
            }

            if let Err(e) = table.require_column(HS_CODE_COLUMN) {
                warn!("Skipping rule sheet '{}': {}", sheet_name, e);
                continue;
            }
            table.derive_column(CHAPTER_COLUMN, HS_CODE_COLUMN, |code| {
                code.map(|c| zero_pad(&prefix_chars(c, CHAPTER_KEY_WIDTH), CHAPTER_KEY_WIDTH))
            })?;
            table.derive_column(HEADER_COLUMN, HS_CODE_COLUMN, |code| {
                code.map(|c| prefix_chars(c, HEADING_LENGTH))
            })?;

            book.insert(sheet_name.trim().to_string(), table.into_frame()?);
        }

        Ok(Self { sheets: book })
    }

    pub fn sheet(&self, name: &str) -> Option<&DataFrame> {
        self.sheets.get(name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Immutable snapshot of every reference table
#[derive(Debug, Clone)]
pub struct ReferenceData {
    chapters: DataFrame,
    hts: DataFrame,
    pga_codes: DataFrame,
    rules: RuleBook,
}

impl ReferenceData {
    /// Load all reference files named by the configuration
    pub fn load(config: &LookupConfig) -> Result<Self> {
        let start_time = Instant::now();

        let chapters = load_table(&require_file(config, &config.files.chapters)?)?;
        let hts = load_table(&require_file(config, &config.files.pga_hts)?)?;
        let pga_codes = load_table(&require_file(config, &config.files.pga_codes)?)?;

        let rules = match config.resolve(&config.files.hs_rules) {
            Some(path) => load_workbook(&path)?,
            None => {
                warn!(
                    "Rules workbook '{}' not found in {}; HS rules will be empty",
                    config.files.hs_rules,
                    config.data_dir.display()
                );
                Vec::new()
            }
        };

        let data = Self::from_tables(chapters, hts, pga_codes, rules)?;
        info!(
            "Reference data loaded: {} chapters, {} HTS rows, {} PGA codes, {} rule sheets in {:.2}s",
            data.chapters.height(),
            data.hts.height(),
            data.pga_codes.height(),
            data.rules.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(data)
    }

    /// Build a snapshot from staged tables, applying the same normalization as [`load`](Self::load)
    pub fn from_tables(
        mut chapters: RawTable,
        mut hts: RawTable,
        mut pga_codes: RawTable,
        rules: Vec<(String, RawTable)>,
    ) -> Result<Self> {
        // Chapters: pad the key, fill gaps in descriptive cells
        chapters.map_column(CHAPTER_COLUMN, |value| {
            value.map(|v| zero_pad(v.trim(), CHAPTER_KEY_WIDTH))
        })?;
        chapters.fill_forward_backward(&[CHAPTER_COLUMN]);

        // HTS: canonical code column, trimmed keys, normalized join keys
        if !hts.rename_column(HTS_NUMBER_COLUMN, HS_CODE_COLUMN) {
            hts.require_column(HS_CODE_COLUMN)?;
        }
        normalize_keys(&mut hts, &HTS_KEY_COLUMNS)?;

        // PGA codes: same key treatment, headers kept as published
        normalize_keys(&mut pga_codes, &PGA_KEY_COLUMNS)?;

        Ok(Self {
            chapters: chapters.into_frame()?,
            hts: hts.into_frame()?,
            pga_codes: pga_codes.into_frame()?,
            rules: RuleBook::from_sheets(rules)?,
        })
    }

    pub fn chapters(&self) -> &DataFrame {
        &self.chapters
    }

    pub fn hts(&self) -> &DataFrame {
        &self.hts
    }

    pub fn pga_codes(&self) -> &DataFrame {
        &self.pga_codes
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }
}

/// Trim the key columns and add the lower-cased join key columns
fn normalize_keys(table: &mut RawTable, key_columns: &[&str; 3]) -> Result<()> {
    for (key, join_key) in key_columns.iter().zip(JOIN_KEY_COLUMNS) {
        table.map_column(key, |value| value.map(|v| v.trim().to_string()))?;
        table.derive_join_key(join_key, key)?;
    }
    Ok(())
}

fn require_file(config: &LookupConfig, stem: &str) -> Result<std::path::PathBuf> {
    config.resolve(stem).ok_or_else(|| {
        LookupError::data_unavailable(
            stem,
            format!("no spreadsheet found in {}", config.data_dir.display()),
        )
    })
}

/// Shared holder for the current reference snapshot
#[derive(Debug)]
pub struct ReferenceStore {
    config: LookupConfig,
    current: RwLock<Arc<ReferenceData>>,
}

impl ReferenceStore {
    /// Load the initial snapshot
    pub fn open(config: LookupConfig) -> Result<Self> {
        let data = ReferenceData::load(&config)?;
        Ok(Self::with_data(config, data))
    }

    /// Wrap an already built snapshot
    pub fn with_data(config: LookupConfig, data: ReferenceData) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(data)),
        }
    }

    /// The current snapshot; callers keep it alive across a reload
    pub fn snapshot(&self) -> Arc<ReferenceData> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Re-read every reference file and swap the snapshot in.
    ///
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<ReferenceData>> {
        let fresh = Arc::new(ReferenceData::load(&self.config)?);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::clone(&fresh);
        info!("Reference data reloaded from {}", self.config.data_dir.display());
        Ok(fresh)
    }
}
