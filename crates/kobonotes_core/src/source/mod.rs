//! E-reader database access and annotation extraction.
//!
//! # Responsibility
//! - Open the device SQLite database without ever writing to it.
//! - Execute the annotation query and map rows into `AnnotationRecord`s.
//!
//! # Invariants
//! - Connections are opened read-only.
//! - A missing required column aborts before any record is produced.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;
mod query;

pub use open::open_kobo_db;
pub use query::{load_annotations, AnnotationQuery, BUNDLED_ANNOTATION_SQL, REQUIRED_COLUMNS};

pub type SourceResult<T> = Result<T, SourceError>;

/// Input-side failure: the annotation set cannot be read as expected.
#[derive(Debug)]
pub enum SourceError {
    Sqlite(rusqlite::Error),
    QueryFile {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingColumn(&'static str),
    InvalidValue {
        row: usize,
        column: &'static str,
        message: String,
    },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::QueryFile { path, source } => {
                write!(f, "failed to read query file `{}`: {source}", path.display())
            }
            Self::MissingColumn(name) => {
                write!(f, "annotation query did not return required column `{name}`")
            }
            Self::InvalidValue {
                row,
                column,
                message,
            } => write!(f, "invalid value in row {row} column `{column}`: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::QueryFile { source, .. } => Some(source),
            Self::MissingColumn(_) => None,
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for SourceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
