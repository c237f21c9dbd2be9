//! Vocabulary terms and their dictionary senses.
//!
//! # Responsibility
//! - Describe normalized terms, mapped parts of speech and resolved senses.
//!
//! # Invariants
//! - Sense order is the dictionary provider's rank order (primary sense first).
//! - Unknown part-of-speech codes map to `PartOfSpeech::Unknown`, never an error.

use serde::{Deserialize, Serialize};

/// A vocabulary candidate after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTerm {
    /// Highlight text as read from the device.
    pub original: String,
    /// Case-folded, punctuation-free, lemmatized deduplication key.
    pub canonical: String,
}

impl NormalizedTerm {
    pub fn new(original: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            canonical: canonical.into(),
        }
    }
}

/// Part of speech of one dictionary sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
    Unknown,
}

impl PartOfSpeech {
    /// Maps a single-character lexical code (`n|v|a|s|r`).
    pub fn from_code(code: char) -> Self {
        match code {
            'n' => Self::Noun,
            'v' => Self::Verb,
            'a' => Self::Adjective,
            's' => Self::AdjectiveSatellite,
            'r' => Self::Adverb,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label used on flashcards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Noun => "Noun",
            Self::Verb => "Verb",
            Self::Adjective => "Adjective",
            Self::AdjectiveSatellite => "Adjective Satellite",
            Self::Adverb => "Adverb",
            Self::Unknown => "Unknown",
        }
    }
}

/// One presentation-ready dictionary sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSense {
    pub definition: String,
    pub part_of_speech: PartOfSpeech,
    pub examples: Vec<String>,
}

/// A term with at least one resolved sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinedTerm {
    pub term: NormalizedTerm,
    pub senses: Vec<DefinitionSense>,
}
