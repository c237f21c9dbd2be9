//! Domain model for highlights, vocabulary terms and dictionary senses.
//!
//! # Responsibility
//! - Define the records that flow between pipeline stages.
//! - Keep every stage's output an owned value handed to the next stage.
//!
//! # Invariants
//! - Records are immutable once read from the annotation source.
//! - A `NormalizedTerm` always remembers the original highlight text.

pub mod annotation;
pub mod vocab;
