//! Dictionary resolution of normalized terms.
//!
//! # Responsibility
//! - Look up every canonical form exactly once.
//! - Map part-of-speech codes and capitalize sense text for presentation.
//! - Partition terms into defined and undefined sets.
//!
//! # Invariants
//! - Provider failures are scoped to one term; only `resolve_strict` stops
//!   at the first one.
//! - Provider sense order is preserved.

use crate::dictionary::{lookup, DictionaryProvider, LookupOutcome, RawSense};
use crate::model::vocab::{DefinedTerm, DefinitionSense, NormalizedTerm, PartOfSpeech};
use crate::report::{UndefinedReason, UndefinedTerm};
use log::{debug, info, warn};

/// Defined/undefined partition of a term list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub defined: Vec<DefinedTerm>,
    pub undefined: Vec<UndefinedTerm>,
}

/// Provider failure that stopped a strict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub term: String,
    pub message: String,
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts provider senses into presentation senses.
pub fn present_senses(raw: Vec<RawSense>) -> Vec<DefinitionSense> {
    raw.into_iter()
        .map(|sense| DefinitionSense {
            definition: capitalize_first(&sense.definition),
            part_of_speech: PartOfSpeech::from_code(sense.pos_code),
            examples: sense
                .examples
                .iter()
                .map(|example| capitalize_first(example))
                .collect(),
        })
        .collect()
}

/// Resolves each term against `provider`.
pub fn resolve(provider: &dyn DictionaryProvider, terms: Vec<NormalizedTerm>) -> Resolution {
    let mut resolution = Resolution::default();
    for term in terms {
        match resolve_term(provider, term) {
            Ok(defined) => resolution.defined.push(defined),
            Err(undefined) => resolution.undefined.push(undefined),
        }
    }
    log_resolution(provider, &resolution);
    resolution
}

/// Like [`resolve`], but stops at the first provider failure.
///
/// Terms after the failing one are never looked up.
pub fn resolve_strict(
    provider: &dyn DictionaryProvider,
    terms: Vec<NormalizedTerm>,
) -> Result<Resolution, LookupFailure> {
    let mut resolution = Resolution::default();
    for term in terms {
        match resolve_term(provider, term) {
            Ok(defined) => resolution.defined.push(defined),
            Err(UndefinedTerm {
                term,
                reason: UndefinedReason::ProviderFailure(message),
            }) => return Err(LookupFailure { term, message }),
            Err(undefined) => resolution.undefined.push(undefined),
        }
    }
    log_resolution(provider, &resolution);
    Ok(resolution)
}

fn resolve_term(
    provider: &dyn DictionaryProvider,
    term: NormalizedTerm,
) -> Result<DefinedTerm, UndefinedTerm> {
    match lookup(provider, &term.canonical) {
        LookupOutcome::Defined(raw) => {
            debug!(
                "event=term_lookup module=pipeline status=defined term={:?} senses={}",
                term.canonical,
                raw.len()
            );
            Ok(DefinedTerm {
                term,
                senses: present_senses(raw),
            })
        }
        LookupOutcome::NoSenses => {
            debug!(
                "event=term_lookup module=pipeline status=undefined term={:?}",
                term.canonical
            );
            Err(UndefinedTerm {
                term: term.canonical,
                reason: UndefinedReason::NoSenses,
            })
        }
        LookupOutcome::Failed(err) => {
            warn!(
                "event=term_lookup module=pipeline status=error provider={} term={:?} error={}",
                provider.provider_id(),
                term.canonical,
                err
            );
            Err(UndefinedTerm {
                term: term.canonical,
                reason: UndefinedReason::ProviderFailure(err.to_string()),
            })
        }
    }
}

fn log_resolution(provider: &dyn DictionaryProvider, resolution: &Resolution) {
    info!(
        "event=resolve_terms module=pipeline status=ok provider={} defined={} undefined={}",
        provider.provider_id(),
        resolution.defined.len(),
        resolution.undefined.len()
    );
}
