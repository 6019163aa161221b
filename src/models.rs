//! Core data structures for PGA lookups.
//!
//! Defines the lookup request, the response document and the shapes
//! returned by the PGA code catalogue queries.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A flat table row: column name to cell value, in column order.
///
/// Cells are strings; missing cells are `null`.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A lookup for one HS code
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LookupRequest {
    pub hs_code: String,

    /// Product name. Reserved for compliance-document enrichment, which is
    /// not performed; the join never reads it.
    #[serde(default)]
    pub name: Option<String>,

    /// Product description. Reserved alongside `name`.
    #[serde(default)]
    pub description: Option<String>,
}

impl LookupRequest {
    pub fn new(hs_code: impl Into<String>) -> Self {
        Self {
            hs_code: hs_code.into(),
            name: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Distinct compliance values per PGA section column, in section order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PgaSections {
    entries: Vec<(String, Vec<String>)>,
}

impl PgaSections {
    /// Add a section. Empty value lists are not recorded.
    pub fn insert(&mut self, column: impl Into<String>, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = values,
            None => self.entries.push((column, values)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, values)| values.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PgaSections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

/// The lookup response document. Field names and order are part of the
/// output contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResponse {
    pub hs_chapters: Vec<Record>,
    pub pga_hts: Vec<Record>,
    pub pga_sections: PgaSections,
    pub hs_rules: Vec<Record>,
    /// Always empty; document enrichment is not performed
    pub pga_requirements: Vec<Record>,
    pub disclaimer: String,
}

impl LookupResponse {
    /// True when the HS code has no HTS/PGA rows
    pub fn is_not_found(&self) -> bool {
        self.pga_hts.is_empty() && self.pga_sections.is_empty()
    }
}

/// Distinct values of the PGA composite key columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PgaOptions {
    pub agency_code: Vec<String>,
    pub code: Vec<String>,
    pub program_code: Vec<String>,
}

/// Optional filters over the PGA code table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CodeFilter {
    pub agency: Option<String>,
    pub code: Option<String>,
    pub program: Option<String>,
}

impl CodeFilter {
    pub fn is_empty(&self) -> bool {
        [&self.agency, &self.code, &self.program]
            .iter()
            .all(|value| value.as_deref().is_none_or(|v| v.trim().is_empty()))
    }
}
