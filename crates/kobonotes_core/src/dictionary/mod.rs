//! Lexical dictionary contracts and backends.
//!
//! # Responsibility
//! - Define the lemma index (`Lexicon`) used by the lemmatizer.
//! - Define the sense lookup SPI (`DictionaryProvider`) used by resolution.
//! - Isolate provider calls behind `LookupOutcome` so "no definition" is a
//!   value, not an error branch.
//!
//! # Invariants
//! - A provider failure for one term never affects lookups of other terms.
//! - Sense order returned by a provider is rank order and must be preserved.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod memory;
pub mod morphy;
pub mod wordnet;

pub use memory::InMemoryDictionary;
pub use morphy::{lemmatize, morphy};
pub use wordnet::WordNet;

/// Word classes carried by the lemma index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordClass {
    /// Lookup order used by the lemmatizer and by sense listing.
    pub const ALL: [WordClass; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    /// Parses the index-file part-of-speech code. Satellites fold into adjectives.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'n' => Some(Self::Noun),
            'v' => Some(Self::Verb),
            'a' | 's' => Some(Self::Adjective),
            'r' => Some(Self::Adverb),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Verb => 'v',
            Self::Adjective => 'a',
            Self::Adverb => 'r',
        }
    }
}

/// Lemma index consulted by morphological analysis.
pub trait Lexicon {
    /// Returns whether `lemma` is a headword of `class`.
    fn has_lemma(&self, lemma: &str, class: WordClass) -> bool;
    /// Irregular base forms listed for an inflected `form`.
    fn exceptions(&self, form: &str, class: WordClass) -> &[String];
}

/// One sense as reported by a provider, before presentation mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSense {
    pub definition: String,
    /// Single-character part-of-speech code (`n|v|a|s|r`).
    pub pos_code: char,
    pub examples: Vec<String>,
}

/// Per-term provider failure.
#[derive(Debug)]
pub enum ProviderError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Corrupt {
        file: PathBuf,
        offset: u64,
        message: String,
    },
    Unavailable(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
            Self::Corrupt {
                file,
                offset,
                message,
            } => write!(
                f,
                "corrupt dictionary entry in `{}` at offset {offset}: {message}",
                file.display()
            ),
            Self::Unavailable(message) => write!(f, "dictionary provider unavailable: {message}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { .. } => None,
            Self::Unavailable(_) => None,
        }
    }
}

/// Failure to open a dictionary backend.
#[derive(Debug)]
pub enum DictionaryError {
    MissingDirectory(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MalformedIndex {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl Display for DictionaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDirectory(path) => {
                write!(f, "dictionary directory `{}` does not exist", path.display())
            }
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
            Self::MalformedIndex {
                path,
                line,
                message,
            } => write!(f, "malformed index `{}` line {line}: {message}", path.display()),
        }
    }
}

impl Error for DictionaryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::MissingDirectory(_) | Self::MalformedIndex { .. } => None,
        }
    }
}

/// Sense lookup SPI.
pub trait DictionaryProvider {
    /// Stable identifier used in logs.
    fn provider_id(&self) -> &str;
    /// Returns all senses for `lemma` in rank order. Empty means "not found".
    fn senses(&self, lemma: &str) -> Result<Vec<RawSense>, ProviderError>;
}

/// Result of one provider call.
#[derive(Debug)]
pub enum LookupOutcome {
    Defined(Vec<RawSense>),
    NoSenses,
    Failed(ProviderError),
}

/// Queries `provider` for `term` and folds the result into a `LookupOutcome`.
pub fn lookup(provider: &dyn DictionaryProvider, term: &str) -> LookupOutcome {
    match provider.senses(term) {
        Ok(senses) if senses.is_empty() => LookupOutcome::NoSenses,
        Ok(senses) => LookupOutcome::Defined(senses),
        Err(err) => LookupOutcome::Failed(err),
    }
}
