//! HS rule lookup over per-chapter rule sheets.
//!
//! Rules narrow in three tiers: rows whose code starts with the full
//! target, then rows sharing the 4-digit heading, then the whole chapter.

use crate::constants::{CHAPTER_COLUMN, HEADING_LENGTH, HS_CODE_COLUMN, RULE_SHEET_PREFIXES};
use crate::error::Result;
use crate::models::Record;
use crate::reference::RuleBook;
use crate::reference::frame::{drop_empty_columns, to_records};
use crate::reference::table::prefix_chars;
use polars::prelude::*;
use tracing::debug;

/// Match tiers, tried in order until one yields rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTier {
    /// `HsCode` starts with the full target code
    Code,
    /// `HsCode` starts with the target's 4-digit heading
    Heading,
    /// Derived `Chapter` equals the chapter key
    Chapter,
}

impl RuleTier {
    pub const ORDER: [RuleTier; 3] = [RuleTier::Code, RuleTier::Heading, RuleTier::Chapter];

    fn predicate(&self, target: &str, chapter_key: &str) -> Expr {
        match self {
            RuleTier::Code => col(HS_CODE_COLUMN).str().starts_with(lit(target.to_string())),
            RuleTier::Heading => col(HS_CODE_COLUMN)
                .str()
                .starts_with(lit(prefix_chars(target, HEADING_LENGTH))),
            RuleTier::Chapter => col(CHAPTER_COLUMN).eq(lit(chapter_key.to_string())),
        }
    }
}

/// Sheet names for a chapter key, most specific first. Non-numeric keys have none.
pub fn sheet_candidates(chapter_key: &str) -> Vec<String> {
    match chapter_key.parse::<u32>() {
        Ok(chapter) => RULE_SHEET_PREFIXES
            .iter()
            .map(|prefix| format!("{}{}", prefix, chapter))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Rule rows for `target`; empty when the chapter has no rule sheet
pub fn lookup_rules(rules: &RuleBook, target: &str, chapter_key: &str) -> Result<Vec<Record>> {
    let Some((sheet_name, sheet)) = sheet_candidates(chapter_key)
        .into_iter()
        .find_map(|name| rules.sheet(&name).map(|sheet| (name, sheet)))
    else {
        debug!("No rule sheet for chapter {}", chapter_key);
        return Ok(Vec::new());
    };

    for tier in RuleTier::ORDER {
        let matched = sheet
            .clone()
            .lazy()
            .filter(tier.predicate(target, chapter_key))
            .collect()?;

        if matched.height() > 0 {
            debug!(
                "Rules for {} from '{}' at {:?} tier: {} rows",
                target,
                sheet_name,
                tier,
                matched.height()
            );
            return Ok(to_records(&drop_empty_columns(&matched)?)?);
        }
    }

    debug!("No rules for {} in '{}'", target, sheet_name);
    Ok(Vec::new())
}
