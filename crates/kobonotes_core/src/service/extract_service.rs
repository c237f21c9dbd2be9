//! Extraction run orchestration.
//!
//! # Responsibility
//! - Drive classify -> normalize -> resolve -> render for one annotation snapshot.
//! - Write the Org document and flashcard CSV through scoped file sinks.
//! - Return recoverable diagnostics in a `RunReport`.
//!
//! # Invariants
//! - Every aborting failure (input, format, strict provider) happens before
//!   any output file is created.
//! - Output files are flushed explicitly and closed on every exit path.

use crate::config::RunConfig;
use crate::dictionary::{DictionaryProvider, Lexicon};
use crate::model::annotation::AnnotationRecord;
use crate::pipeline::classify::classify;
use crate::pipeline::flashcards::{format_flashcards, write_flashcards};
use crate::pipeline::quotes::{format_quotes, group_quotes, FormatError};
use crate::pipeline::resolve::{resolve, resolve_strict};
use crate::pipeline::terms::normalize;
use crate::report::RunReport;
use crate::source::{load_annotations, open_kobo_db, AnnotationQuery, SourceError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Run-aborting failure.
#[derive(Debug)]
pub enum ServiceError {
    Source(SourceError),
    Format(FormatError),
    /// Only raised in strict mode.
    Provider {
        term: String,
        message: String,
    },
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Provider { term, message } => {
                write!(f, "dictionary lookup failed for `{term}`: {message}")
            }
            Self::Output { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Provider { .. } => None,
            Self::Output { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

impl From<SourceError> for ServiceError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<FormatError> for ServiceError {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

/// Use-case service for one extraction run.
pub struct ExtractService<D: Lexicon + DictionaryProvider> {
    dictionary: D,
    config: RunConfig,
}

impl<D: Lexicon + DictionaryProvider> ExtractService<D> {
    pub fn new(dictionary: D, config: RunConfig) -> Self {
        Self { dictionary, config }
    }

    /// Loads annotations from the device database, then runs the pipeline.
    ///
    /// The connection is dropped before any output is written.
    pub fn run_from_db(
        &self,
        db_path: impl AsRef<Path>,
        query: &AnnotationQuery,
    ) -> ServiceResult<RunReport> {
        let records = {
            let conn = open_kobo_db(db_path)?;
            load_annotations(&conn, query)?
        };
        self.run(&records)
    }

    /// Runs the pipeline over an annotation snapshot and writes both outputs.
    pub fn run(&self, records: &[AnnotationRecord]) -> ServiceResult<RunReport> {
        let started_at = Instant::now();
        info!(
            "event=extract_run module=service status=start records={} max_word_len={} strict={}",
            records.len(),
            self.config.max_word_len,
            self.config.strict
        );

        let result = self.run_inner(records);
        match &result {
            Ok(report) => info!(
                "event=extract_run module=service status=ok duration_ms={} {}",
                started_at.elapsed().as_millis(),
                report.summary()
            ),
            Err(err) => error!(
                "event=extract_run module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn run_inner(&self, records: &[AnnotationRecord]) -> ServiceResult<RunReport> {
        let classified = classify(records, self.config.max_word_len);

        let normalized = normalize(&self.dictionary, &classified.words);
        for dropped in &normalized.dropped {
            info!(
                "event=duplicate_dropped module=service original={:?} canonical={:?} kept={:?}",
                dropped.original, dropped.canonical, dropped.kept
            );
        }

        let resolution = if self.config.strict {
            resolve_strict(&self.dictionary, normalized.terms).map_err(|failed| {
                ServiceError::Provider {
                    term: failed.term,
                    message: failed.message,
                }
            })?
        } else {
            resolve(&self.dictionary, normalized.terms)
        };
        if !resolution.undefined.is_empty() {
            let terms: Vec<&str> = resolution
                .undefined
                .iter()
                .map(|term| term.term.as_str())
                .collect();
            warn!(
                "event=undefined_terms module=service count={} terms={}",
                terms.len(),
                terms.join(", ")
            );
        }

        let document = if classified.quotes.is_empty() {
            None
        } else {
            Some(format_quotes(&classified.quotes, &self.config.org)?)
        };
        let cards = format_flashcards(&resolution.defined);

        let org_file = match document {
            Some(document) => {
                let path = &self.config.output.org_file;
                write_output(path, |writer| writer.write_all(document.as_bytes()))?;
                Some(path.clone())
            }
            None => {
                info!("event=write_quotes module=service status=skipped reason=no_quotes");
                None
            }
        };

        let csv_path = &self.config.output.anki_csv;
        let file = create_output(csv_path)?;
        write_flashcards(file, &cards).map_err(|source| ServiceError::Csv {
            path: csv_path.clone(),
            source,
        })?;

        Ok(RunReport {
            annotations: records.len(),
            word_candidates: classified.words.len(),
            quotes: classified.quotes.len(),
            quote_groups: group_quotes(&classified.quotes).len(),
            dropped_duplicates: normalized.dropped,
            defined_terms: resolution.defined.len(),
            undefined_terms: resolution.undefined,
            org_file,
            anki_csv: Some(csv_path.clone()),
        })
    }
}

fn create_output(path: &Path) -> ServiceResult<BufWriter<File>> {
    let file = File::create(path).map_err(|source| ServiceError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "event=open_output module=service status=ok path={}",
        path.display()
    );
    Ok(BufWriter::new(file))
}

fn write_output(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> ServiceResult<()> {
    let mut writer = create_output(path)?;
    write(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|source| ServiceError::Output {
            path: path.to_path_buf(),
            source,
        })
}
