//! Quote cleaning, grouping and outline-document rendering.
//!
//! # Responsibility
//! - Normalize quote whitespace.
//! - Order quotes by last-read date and group them per book reading.
//! - Render the grouped quotes as an Org document.
//!
//! # Invariants
//! - Sorting is stable; undated records sort first.
//! - Groups appear in the sort position of their first member.
//! - A group whose date cannot be rendered fails the whole document.

use crate::config::OrgHeader;
use crate::model::annotation::{AnnotationRecord, QuoteGroup};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\u{a0}]+").expect("valid whitespace regex"));

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

pub type FormatResult<T> = Result<T, FormatError>;

/// Quote rendering failure naming the offending record.
///
/// `index` is the record position within the quote set handed to the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    MissingDate {
        index: usize,
        title: String,
    },
    InvalidDate {
        index: usize,
        title: String,
        value: String,
    },
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDate { index, title } => {
                write!(f, "quote #{index} from `{title}` has no DateLastRead")
            }
            Self::InvalidDate {
                index,
                title,
                value,
            } => write!(
                f,
                "quote #{index} from `{title}` has unparseable DateLastRead `{value}`"
            ),
        }
    }
}

impl Error for FormatError {}

/// Trims `text` and collapses newlines, non-breaking spaces and whitespace runs
/// into single spaces in one pass.
pub fn clean_quote_text(text: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(text.trim(), " ").into_owned()
}

/// Parses an ISO-8601 `DateLastRead` value.
pub fn parse_date_last_read(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

struct SortedGroup {
    first_index: usize,
    read_at: Option<NaiveDateTime>,
    group: QuoteGroup,
}

fn sorted_groups(quotes: &[AnnotationRecord]) -> Vec<SortedGroup> {
    let mut keyed: Vec<(usize, Option<NaiveDateTime>, &AnnotationRecord)> = quotes
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let read_at = record
                .date_last_read
                .as_deref()
                .and_then(parse_date_last_read);
            (index, read_at, record)
        })
        .collect();
    keyed.sort_by_key(|(_, read_at, _)| *read_at);

    let mut groups: Vec<SortedGroup> = Vec::new();
    let mut positions: HashMap<(Option<&str>, &str, &str), usize> = HashMap::new();
    for (index, read_at, record) in keyed {
        let key = (
            record.date_last_read.as_deref(),
            record.title.as_str(),
            record.attribution.as_str(),
        );
        let cleaned = clean_quote_text(&record.text);
        match positions.get(&key) {
            Some(&position) => groups[position].group.quotes.push(cleaned),
            None => {
                positions.insert(key, groups.len());
                groups.push(SortedGroup {
                    first_index: index,
                    read_at,
                    group: QuoteGroup {
                        title: record.title.clone(),
                        attribution: record.attribution.clone(),
                        date_last_read: record.date_last_read.clone(),
                        quotes: vec![cleaned],
                    },
                });
            }
        }
    }
    groups
}

/// Cleans, sorts and groups quotes by `(date_last_read, title, attribution)`.
pub fn group_quotes(quotes: &[AnnotationRecord]) -> Vec<QuoteGroup> {
    sorted_groups(quotes)
        .into_iter()
        .map(|sorted| sorted.group)
        .collect()
}

/// Renders `quotes` as an Org document under `header`.
///
/// # Errors
/// - `MissingDate` / `InvalidDate` for the first record of any group whose
///   `date_last_read` is absent or not ISO-8601.
pub fn format_quotes(quotes: &[AnnotationRecord], header: &OrgHeader) -> FormatResult<String> {
    let mut document = String::new();
    document.push_str(&format!("#+TITLE: {}\n", header.title));
    document.push_str(&format!("#+AUTHOR: {}\n", header.user));
    document.push_str(&format!("#+DATE: {}\n", header.date));
    document.push_str(&format!("#+STARTUP: {}\n", header.visibility));

    let groups = sorted_groups(quotes);
    for sorted in &groups {
        let group = &sorted.group;
        let read_at = match (&group.date_last_read, sorted.read_at) {
            (Some(_), Some(read_at)) => read_at,
            (None, _) => {
                return Err(FormatError::MissingDate {
                    index: sorted.first_index,
                    title: group.title.clone(),
                })
            }
            (Some(value), None) => {
                return Err(FormatError::InvalidDate {
                    index: sorted.first_index,
                    title: group.title.clone(),
                    value: value.clone(),
                })
            }
        };

        document.push_str(&format!("\n* {}\n", group.title));
        document.push_str(":PROPERTIES:\n");
        document.push_str(&format!(":AUTHOR: {}\n", group.attribution));
        document.push_str(&format!(
            ":DATE_LAST_READ: {}\n",
            read_at.date().format("%Y-%m-%d")
        ));
        document.push_str(":END:\n");
        for quote in &group.quotes {
            document.push_str(&format!(" + /\"{quote}\"/\n"));
        }
        debug!(
            "event=quote_group module=pipeline status=ok quotes={} title={} author={}",
            group.quotes.len(),
            group.title,
            group.attribution
        );
    }

    info!(
        "event=format_quotes module=pipeline status=ok quotes={} groups={}",
        quotes.len(),
        groups.len()
    );
    Ok(document)
}
