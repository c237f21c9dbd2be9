//! Morphological reduction of inflected forms to dictionary headwords.
//!
//! Exception lists are consulted first; otherwise suffix detachment rules
//! are applied repeatedly and filtered against the lemma index.

use super::{Lexicon, WordClass};

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn rules(class: WordClass) -> &'static [(&'static str, &'static str)] {
    match class {
        WordClass::Noun => NOUN_RULES,
        WordClass::Verb => VERB_RULES,
        WordClass::Adjective => ADJECTIVE_RULES,
        WordClass::Adverb => &[],
    }
}

fn detach(forms: &[String], class: WordClass) -> Vec<String> {
    let mut detached = Vec::new();
    for form in forms {
        for (suffix, replacement) in rules(class) {
            if let Some(stem) = form.strip_suffix(suffix) {
                detached.push(format!("{stem}{replacement}"));
            }
        }
    }
    detached
}

fn known_forms(lexicon: &dyn Lexicon, forms: Vec<String>, class: WordClass) -> Vec<String> {
    let mut known: Vec<String> = Vec::new();
    for form in forms {
        if lexicon.has_lemma(&form, class) && !known.contains(&form) {
            known.push(form);
        }
    }
    known
}

/// Returns the headwords of `class` that `form` may be an inflection of.
///
/// `form` is expected in index spelling: lower-case, spaces as underscores.
pub fn morphy(lexicon: &dyn Lexicon, form: &str, class: WordClass) -> Vec<String> {
    let exceptions = lexicon.exceptions(form, class);
    if !exceptions.is_empty() {
        let mut forms = vec![form.to_string()];
        forms.extend(exceptions.iter().cloned());
        return known_forms(lexicon, forms, class);
    }

    let mut forms = detach(&[form.to_string()], class);
    let mut candidates = vec![form.to_string()];
    candidates.extend(forms.iter().cloned());
    let found = known_forms(lexicon, candidates, class);
    if !found.is_empty() {
        return found;
    }

    while !forms.is_empty() {
        forms = detach(&forms, class);
        let found = known_forms(lexicon, forms.clone(), class);
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// Upper bound on chained reductions for one term.
const MAX_REDUCTIONS: usize = 8;

/// Reduces `term` to its dictionary base form.
///
/// Word classes are tried in `WordClass::ALL` order; the first class whose
/// shortest headword differs from the current form wins. The result is
/// reduced again until no class changes it, so a lemma is its own lemma.
/// Unknown terms come back as-is.
pub fn lemmatize(lexicon: &dyn Lexicon, term: &str) -> String {
    if term.is_empty() {
        return String::new();
    }

    let mut form = term.replace(' ', "_");
    for _ in 0..MAX_REDUCTIONS {
        match reduce_once(lexicon, &form) {
            Some(base) => form = base,
            None => break,
        }
    }
    form.replace('_', " ")
}

fn reduce_once(lexicon: &dyn Lexicon, form: &str) -> Option<String> {
    WordClass::ALL.into_iter().find_map(|class| {
        morphy(lexicon, form, class)
            .into_iter()
            .min_by_key(|candidate| candidate.chars().count())
            .filter(|base| base != form)
    })
}
