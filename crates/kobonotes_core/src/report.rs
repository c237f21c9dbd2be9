//! End-of-run diagnostics.
//!
//! # Responsibility
//! - Accumulate recoverable conditions (dropped duplicates, undefined terms)
//!   as a value returned to the caller.
//! - Render a one-line summary for command-line output.

use serde::Serialize;
use std::path::PathBuf;

/// A vocabulary highlight dropped because an earlier one shares its canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedDuplicate {
    pub original: String,
    pub canonical: String,
    /// Original text of the occurrence that was kept.
    pub kept: String,
}

/// Why a term produced no flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum UndefinedReason {
    NoSenses,
    ProviderFailure(String),
}

/// A normalized term left out of the flashcard deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndefinedTerm {
    pub term: String,
    pub reason: UndefinedReason,
}

/// Outcome of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub annotations: usize,
    pub word_candidates: usize,
    pub quotes: usize,
    pub quote_groups: usize,
    pub dropped_duplicates: Vec<DroppedDuplicate>,
    pub defined_terms: usize,
    pub undefined_terms: Vec<UndefinedTerm>,
    /// `None` when there were no quotes to write.
    pub org_file: Option<PathBuf>,
    pub anki_csv: Option<PathBuf>,
}

impl RunReport {
    pub fn provider_failures(&self) -> usize {
        self.undefined_terms
            .iter()
            .filter(|term| matches!(term.reason, UndefinedReason::ProviderFailure(_)))
            .count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} annotations: {} quotes in {} groups, {} word candidates \
             ({} duplicates dropped, {} defined, {} undefined of which {} provider failures)",
            self.annotations,
            self.quotes,
            self.quote_groups,
            self.word_candidates,
            self.dropped_duplicates.len(),
            self.defined_terms,
            self.undefined_terms.len(),
            self.provider_failures()
        )
    }
}
