//! Vocabulary term normalization and deduplication.
//!
//! # Invariants
//! - The first occurrence of a canonical form (input order) is kept.
//! - Later occurrences are reported as dropped, never merged.
//! - Normalizing canonical forms again is a fixed point.

use crate::dictionary::{lemmatize, Lexicon};
use crate::model::annotation::AnnotationRecord;
use crate::model::vocab::NormalizedTerm;
use crate::report::DroppedDuplicate;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}\p{S}]+").expect("valid punctuation regex"));

/// Deduplicated terms plus the highlights dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub terms: Vec<NormalizedTerm>,
    pub dropped: Vec<DroppedDuplicate>,
}

/// Derives the canonical form of one highlight.
///
/// Lower-cases, removes punctuation and symbols, collapses whitespace and
/// reduces the result to its headword. May return an empty string.
pub fn canonicalize(lexicon: &dyn Lexicon, text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION_RE.replace_all(&lowered, "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    lemmatize(lexicon, &collapsed).trim().to_string()
}

/// Normalizes the text of vocabulary-candidate records.
pub fn normalize(lexicon: &dyn Lexicon, records: &[AnnotationRecord]) -> NormalizeOutcome {
    normalize_texts(lexicon, records.iter().map(|record| record.text.as_str()))
}

/// Normalizes raw term texts and drops later duplicates.
pub fn normalize_texts<'a>(
    lexicon: &dyn Lexicon,
    texts: impl IntoIterator<Item = &'a str>,
) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for original in texts {
        let canonical = canonicalize(lexicon, original);
        debug!("event=term_normalized module=pipeline original={original:?} canonical={canonical:?}");

        if let Some(&position) = first_seen.get(&canonical) {
            outcome.dropped.push(DroppedDuplicate {
                original: original.to_string(),
                canonical,
                kept: outcome.terms[position].original.clone(),
            });
            continue;
        }
        first_seen.insert(canonical.clone(), outcome.terms.len());
        outcome.terms.push(NormalizedTerm::new(original, canonical));
    }

    info!(
        "event=normalize_terms module=pipeline status=ok kept={} dropped={}",
        outcome.terms.len(),
        outcome.dropped.len()
    );
    outcome
}
