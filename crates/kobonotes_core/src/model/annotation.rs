//! Annotation record as produced by the e-reader query.
//!
//! # Responsibility
//! - Carry one highlighted passage with its book metadata.
//! - Group quotes that share book and reading date.
//!
//! # Invariants
//! - `date_last_read` keeps the raw source value; parsing happens at format time.

use serde::{Deserialize, Serialize};

/// One highlighted passage with associated book metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Highlighted text exactly as stored on the device.
    pub text: String,
    /// Book title.
    pub title: String,
    /// Book author(s).
    pub attribution: String,
    /// ISO-8601 timestamp string, `None` when the device never recorded one.
    pub date_last_read: Option<String>,
}

impl AnnotationRecord {
    pub fn new(
        text: impl Into<String>,
        title: impl Into<String>,
        attribution: impl Into<String>,
        date_last_read: Option<&str>,
    ) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            attribution: attribution.into(),
            date_last_read: date_last_read.map(str::to_string),
        }
    }

    /// Number of whitespace-delimited tokens in `text`.
    ///
    /// Empty or whitespace-only text yields zero.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Quotes sharing one `(date_last_read, title, attribution)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteGroup {
    pub title: String,
    pub attribution: String,
    pub date_last_read: Option<String>,
    /// Cleaned quote texts in input order.
    pub quotes: Vec<String>,
}
