//! Annotation query execution and row mapping.
//!
//! # Responsibility
//! - Run either the bundled Kobo query or a caller-supplied SQL file.
//! - Resolve required columns by name so query authors can reorder them.
//!
//! # Invariants
//! - Output order equals the row order returned by the query.
//! - NULL text columns become empty strings; NULL/blank dates become `None`.

use super::{SourceError, SourceResult};
use crate::model::annotation::AnnotationRecord;
use log::info;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use std::path::PathBuf;

/// Kobo highlight query shipped with the crate.
pub const BUNDLED_ANNOTATION_SQL: &str = include_str!("extract_annotations.sql");

/// Columns every annotation query must return.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Text", "Title", "Attribution", "DateLastRead"];

/// Which SQL statement produces the annotation table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnnotationQuery {
    #[default]
    Bundled,
    File(PathBuf),
    Inline(String),
}

impl AnnotationQuery {
    fn sql(&self) -> SourceResult<String> {
        match self {
            Self::Bundled => Ok(BUNDLED_ANNOTATION_SQL.to_string()),
            Self::Inline(sql) => Ok(sql.clone()),
            Self::File(path) => {
                std::fs::read_to_string(path).map_err(|source| SourceError::QueryFile {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

struct ColumnIndexes {
    text: usize,
    title: usize,
    attribution: usize,
    date_last_read: usize,
}

/// Executes the annotation query and returns one record per row.
///
/// # Errors
/// - `MissingColumn` when any of [`REQUIRED_COLUMNS`] is absent.
/// - `InvalidValue` when a column holds a non-text value.
pub fn load_annotations(
    conn: &Connection,
    query: &AnnotationQuery,
) -> SourceResult<Vec<AnnotationRecord>> {
    let sql = query.sql()?;
    info!(
        "event=annotation_query module=source status=start sql={}",
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    );

    let mut stmt = conn.prepare(&sql)?;
    let column_names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let indexes = resolve_columns(&column_names)?;

    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let row_index = records.len();
        records.push(parse_annotation_row(row, row_index, &indexes)?);
    }

    info!(
        "event=annotation_query module=source status=ok rows={} columns={}",
        records.len(),
        column_names.join(",")
    );
    Ok(records)
}

fn resolve_columns(names: &[String]) -> SourceResult<ColumnIndexes> {
    let find = |wanted: &'static str| {
        names
            .iter()
            .position(|name| name == wanted)
            .ok_or(SourceError::MissingColumn(wanted))
    };

    Ok(ColumnIndexes {
        text: find("Text")?,
        title: find("Title")?,
        attribution: find("Attribution")?,
        date_last_read: find("DateLastRead")?,
    })
}

fn parse_annotation_row(
    row: &Row<'_>,
    row_index: usize,
    indexes: &ColumnIndexes,
) -> SourceResult<AnnotationRecord> {
    let text = optional_text(row, row_index, indexes.text, "Text")?.unwrap_or_default();
    let title = optional_text(row, row_index, indexes.title, "Title")?.unwrap_or_default();
    let attribution =
        optional_text(row, row_index, indexes.attribution, "Attribution")?.unwrap_or_default();
    let date_last_read =
        optional_text(row, row_index, indexes.date_last_read, "DateLastRead")?
            .filter(|value| !value.trim().is_empty());

    Ok(AnnotationRecord {
        text,
        title,
        attribution,
        date_last_read,
    })
}

fn optional_text(
    row: &Row<'_>,
    row_index: usize,
    column_index: usize,
    column: &'static str,
) -> SourceResult<Option<String>> {
    match row.get_ref(column_index)? {
        ValueRef::Null => Ok(None),
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|err| SourceError::InvalidValue {
                row: row_index,
                column,
                message: err.to_string(),
            }),
        other => Err(SourceError::InvalidValue {
            row: row_index,
            column,
            message: format!("expected text, found {:?}", other.data_type()),
        }),
    }
}
