//! Core logic for turning e-reader highlights into an Org quote collection
//! and an Anki vocabulary deck.

pub mod config;
pub mod dictionary;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod service;
pub mod source;

pub use config::{OrgHeader, OutputPaths, RunConfig};
pub use dictionary::{
    lookup, DictionaryError, DictionaryProvider, InMemoryDictionary, Lexicon, LookupOutcome,
    ProviderError, RawSense, WordClass, WordNet,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::annotation::{AnnotationRecord, QuoteGroup};
pub use model::vocab::{DefinedTerm, DefinitionSense, NormalizedTerm, PartOfSpeech};
pub use pipeline::classify::{classify, Classified};
pub use pipeline::flashcards::{format_flashcards, read_flashcards, write_flashcards, Flashcard};
pub use pipeline::quotes::{format_quotes, group_quotes, FormatError, FormatResult};
pub use pipeline::resolve::{resolve, resolve_strict, LookupFailure, Resolution};
pub use pipeline::terms::{normalize, normalize_texts, NormalizeOutcome};
pub use report::{DroppedDuplicate, RunReport, UndefinedReason, UndefinedTerm};
pub use service::extract_service::{ExtractService, ServiceError, ServiceResult};
pub use source::{load_annotations, open_kobo_db, AnnotationQuery, SourceError, SourceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
