//! Run configuration.
//!
//! Every knob of an extraction run is an explicit field here; callers build
//! it once and hand it to [`crate::service::extract_service::ExtractService`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Header directives of the generated Org document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgHeader {
    pub title: String,
    pub user: String,
    pub date: String,
    /// Org `#+STARTUP` visibility (`fold`, `content`, `showall`, ...).
    pub visibility: String,
}

impl Default for OrgHeader {
    fn default() -> Self {
        Self {
            title: "Kobo Annotations".to_string(),
            user: String::new(),
            date: String::new(),
            visibility: "fold".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub org_file: PathBuf,
    pub anki_csv: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            org_file: PathBuf::from("annotations.org"),
            anki_csv: PathBuf::from("anki.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Highlights with at most this many words are vocabulary candidates.
    pub max_word_len: usize,
    pub org: OrgHeader,
    pub output: OutputPaths,
    /// Abort on the first dictionary provider failure instead of recording it.
    pub strict: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_word_len: 2,
            org: OrgHeader::default(),
            output: OutputPaths::default(),
            strict: false,
        }
    }
}
