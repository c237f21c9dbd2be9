//! In-process dictionary backend.

use super::{DictionaryProvider, Lexicon, ProviderError, RawSense, WordClass};
use std::collections::{HashMap, HashSet};

/// Dictionary held entirely in memory, assembled with builder calls.
///
/// Senses are keyed by exact lemma; registering a sense also registers the
/// lemma for its word class.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDictionary {
    lemmas: HashSet<(String, WordClass)>,
    exceptions: HashMap<(String, WordClass), Vec<String>>,
    senses: HashMap<String, Vec<RawSense>>,
    failing: HashSet<String>,
}

impl InMemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lemma(mut self, lemma: &str, class: WordClass) -> Self {
        self.lemmas.insert((lemma.to_string(), class));
        self
    }

    pub fn with_exception(mut self, form: &str, class: WordClass, base: &str) -> Self {
        self.exceptions
            .entry((form.to_string(), class))
            .or_default()
            .push(base.to_string());
        self
    }

    /// Appends one sense for `lemma`; call order is rank order.
    pub fn with_sense(
        mut self,
        lemma: &str,
        pos_code: char,
        definition: &str,
        examples: &[&str],
    ) -> Self {
        if let Some(class) = WordClass::from_code(pos_code) {
            self.lemmas.insert((lemma.replace(' ', "_"), class));
        }
        self.senses
            .entry(lemma.to_string())
            .or_default()
            .push(RawSense {
                definition: definition.to_string(),
                pos_code,
                examples: examples.iter().map(|example| example.to_string()).collect(),
            });
        self
    }

    /// Makes every lookup of `lemma` fail with `ProviderError::Unavailable`.
    pub fn with_failure(mut self, lemma: &str) -> Self {
        self.failing.insert(lemma.to_string());
        self
    }
}

impl Lexicon for InMemoryDictionary {
    fn has_lemma(&self, lemma: &str, class: WordClass) -> bool {
        self.lemmas.contains(&(lemma.to_string(), class))
    }

    fn exceptions(&self, form: &str, class: WordClass) -> &[String] {
        self.exceptions
            .get(&(form.to_string(), class))
            .map_or(&[], Vec::as_slice)
    }
}

impl DictionaryProvider for InMemoryDictionary {
    fn provider_id(&self) -> &str {
        "memory"
    }

    fn senses(&self, lemma: &str) -> Result<Vec<RawSense>, ProviderError> {
        if self.failing.contains(lemma) {
            return Err(ProviderError::Unavailable(format!(
                "lookup of `{lemma}` is configured to fail"
            )));
        }
        Ok(self.senses.get(lemma).cloned().unwrap_or_default())
    }
}
