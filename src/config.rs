//! Configuration management and validation.
//!
//! Provides the lookup configuration: where the reference spreadsheets
//! live, their logical names, and whether reference data is loaded once
//! or re-read for every lookup.

use crate::constants::{
    CHAPTERS_FILE, DATA_DIR_ENV, DEFAULT_DATA_DIR_NAME, DEFAULT_DISCLAIMER, HS_RULES_FILE,
    PGA_CODES_FILE, PGA_HTS_FILE, SPREADSHEET_EXTENSIONS,
};
use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How reference data is held between lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataPolicy {
    /// Load once and share the read-only snapshot across lookups
    #[default]
    Snapshot,
    /// Re-read every reference file for each lookup
    PerRequest,
}

/// Logical names (file stems) of the reference spreadsheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFiles {
    pub chapters: String,
    pub pga_hts: String,
    pub pga_codes: String,
    pub hs_rules: String,
}

impl Default for ReferenceFiles {
    fn default() -> Self {
        Self {
            chapters: CHAPTERS_FILE.to_string(),
            pga_hts: PGA_HTS_FILE.to_string(),
            pga_codes: PGA_CODES_FILE.to_string(),
            hs_rules: HS_RULES_FILE.to_string(),
        }
    }
}

/// Global configuration for PGA lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Directory holding the reference spreadsheets
    pub data_dir: PathBuf,

    /// Logical names of the reference files
    pub files: ReferenceFiles,

    /// Reference data loading policy
    pub policy: DataPolicy,

    /// Citation text attached to every response
    pub disclaimer: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            files: ReferenceFiles::default(),
            policy: DataPolicy::default(),
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
        }
    }
}

impl LookupConfig {
    /// Default data directory: `<user data dir>/pga-lookup`, or `./data` when
    /// the platform has no user data directory
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(DEFAULT_DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Load with layered precedence: defaults, then environment, then CLI override
    pub fn load_layered(data_dir_override: Option<PathBuf>) -> Self {
        Self::layer(std::env::var(DATA_DIR_ENV).ok(), data_dir_override)
    }

    fn layer(env_data_dir: Option<String>, data_dir_override: Option<PathBuf>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = env_data_dir.filter(|dir| !dir.trim().is_empty()) {
            debug!("Data directory from {}: {}", DATA_DIR_ENV, dir);
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(dir) = data_dir_override {
            debug!("Data directory from command line: {}", dir.display());
            config.data_dir = dir;
        }

        config
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_policy(mut self, policy: DataPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_files(mut self, files: ReferenceFiles) -> Self {
        self.files = files;
        self
    }

    pub fn with_disclaimer(mut self, disclaimer: impl Into<String>) -> Self {
        self.disclaimer = disclaimer.into();
        self
    }

    /// Check that the data directory exists and the logical names are usable
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.exists() {
            return Err(LookupError::configuration(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        if !self.data_dir.is_dir() {
            return Err(LookupError::configuration(format!(
                "Data path is not a directory: {}",
                self.data_dir.display()
            )));
        }

        for stem in [
            &self.files.chapters,
            &self.files.pga_hts,
            &self.files.pga_codes,
            &self.files.hs_rules,
        ] {
            if stem.trim().is_empty() {
                return Err(LookupError::configuration(
                    "Reference file names cannot be empty",
                ));
            }
        }

        Ok(())
    }

    /// Resolve a logical file name to the first matching spreadsheet in the data directory
    pub fn resolve(&self, stem: &str) -> Option<PathBuf> {
        resolve_in(&self.data_dir, stem)
    }
}

/// Find `<dir>/<stem>.<ext>` for the first supported spreadsheet extension that exists
pub fn resolve_in(dir: &Path, stem: &str) -> Option<PathBuf> {
    SPREADSHEET_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
}
