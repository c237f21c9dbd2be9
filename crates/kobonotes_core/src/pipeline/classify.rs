//! Word/quote split by highlight length.

use crate::model::annotation::AnnotationRecord;
use log::info;

/// Stable partition of an annotation set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Records with `word_count <= max_word_len`.
    pub words: Vec<AnnotationRecord>,
    /// Records with `word_count > max_word_len`.
    pub quotes: Vec<AnnotationRecord>,
}

/// Splits `records` into vocabulary candidates and quotes.
///
/// The threshold is inclusive on the word side. Relative input order is
/// preserved in both outputs.
pub fn classify(records: &[AnnotationRecord], max_word_len: usize) -> Classified {
    let (words, quotes): (Vec<_>, Vec<_>) = records
        .iter()
        .cloned()
        .partition(|record| record.word_count() <= max_word_len);

    info!(
        "event=classify module=pipeline status=ok records={} words={} quotes={} max_word_len={}",
        records.len(),
        words.len(),
        quotes.len(),
        max_word_len
    );
    Classified { words, quotes }
}
