//! Lookup engine with modular stages.
//!
//! Resolves one HS code against a reference snapshot: chapter
//! descriptions, the HTS/PGA join, PGA compliance sections and chapter
//! rules, assembled into a single response document.

pub mod chapters;
pub mod pga;
pub mod rules;

#[cfg(test)]
pub mod tests;

use self::chapters::lookup_chapters;
use self::pga::{lookup_pga_hts, lookup_pga_sections};
use self::rules::lookup_rules;

use crate::config::{DataPolicy, LookupConfig};
use crate::constants::{CHAPTER_KEY_WIDTH, DEFAULT_DISCLAIMER};
use crate::error::{LookupError, Result};
use crate::models::{LookupRequest, LookupResponse};
use crate::reference::table::{prefix_chars, zero_pad};
use crate::reference::{ReferenceData, ReferenceStore};

use std::sync::Arc;
use tracing::{debug, info};

/// First two characters of an HS code, zero-padded to two
pub fn chapter_key(hs_code: &str) -> String {
    zero_pad(&prefix_chars(hs_code, CHAPTER_KEY_WIDTH), CHAPTER_KEY_WIDTH)
}

/// Stateless join engine over a reference snapshot
#[derive(Debug, Clone)]
pub struct LookupEngine {
    disclaimer: String,
}

impl Default for LookupEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DISCLAIMER)
    }
}

impl LookupEngine {
    pub fn new(disclaimer: impl Into<String>) -> Self {
        Self {
            disclaimer: disclaimer.into(),
        }
    }

    /// Resolve one request. An empty code is rejected; a code with no HTS
    /// rows yields an empty but complete document.
    pub fn lookup(&self, data: &ReferenceData, request: &LookupRequest) -> Result<LookupResponse> {
        let target = request.hs_code.as_str();
        if target.is_empty() {
            return Err(LookupError::data_unavailable("hs_code", "target HS code is empty"));
        }

        let chapter_key = chapter_key(target);
        debug!("Lookup {} (chapter {})", target, chapter_key);

        let response = LookupResponse {
            hs_chapters: lookup_chapters(data, &chapter_key)?,
            pga_hts: lookup_pga_hts(data, target)?,
            pga_sections: lookup_pga_sections(data, target)?,
            hs_rules: lookup_rules(data.rules(), target, &chapter_key)?,
            pga_requirements: Vec::new(),
            disclaimer: self.disclaimer.clone(),
        };

        if response.is_not_found() {
            info!("No HTS/PGA rows for {}", target);
        }

        Ok(response)
    }
}

/// Lookups bound to a configuration and its data policy
#[derive(Debug)]
pub struct LookupService {
    config: LookupConfig,
    engine: LookupEngine,
    store: Option<ReferenceStore>,
}

impl LookupService {
    /// Validate the configuration and, under the snapshot policy, load reference data once
    pub fn new(config: LookupConfig) -> Result<Self> {
        config.validate()?;

        let store = match config.policy {
            DataPolicy::Snapshot => Some(ReferenceStore::open(config.clone())?),
            DataPolicy::PerRequest => None,
        };

        Ok(Self {
            engine: LookupEngine::new(config.disclaimer.clone()),
            config,
            store,
        })
    }

    /// Service over an already built snapshot
    pub fn with_data(config: LookupConfig, data: ReferenceData) -> Self {
        Self {
            engine: LookupEngine::new(config.disclaimer.clone()),
            store: Some(ReferenceStore::with_data(config.clone(), data)),
            config,
        }
    }

    pub fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse> {
        let data = self.reference()?;
        self.engine.lookup(&data, request)
    }

    /// Reference data for the next lookup: the shared snapshot, or a fresh load
    pub fn reference(&self) -> Result<Arc<ReferenceData>> {
        match &self.store {
            Some(store) => Ok(store.snapshot()),
            None => Ok(Arc::new(ReferenceData::load(&self.config)?)),
        }
    }

    /// Re-read the reference files. A no-op under the per-request policy.
    pub fn reload(&self) -> Result<()> {
        if let Some(store) = &self.store {
            store.reload()?;
        }
        Ok(())
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }
}
