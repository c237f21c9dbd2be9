//! Annotation classification and enrichment stages.
//!
//! # Responsibility
//! - Split highlights into vocabulary candidates and quotes.
//! - Render quotes into an outline document.
//! - Normalize, define and render vocabulary terms as flashcards.
//!
//! # Invariants
//! - Stages never mutate their input; each returns an owned outcome.
//! - Recoverable diagnostics are returned as values, not only logged.

pub mod classify;
pub mod flashcards;
pub mod quotes;
pub mod resolve;
pub mod terms;
