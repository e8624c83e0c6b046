//! Ingestion pipeline boundary
//!
//! External tabular sources are reduced to `(rubrics, text, created_date)`
//! rows. Every row is validated before the writer session opens, and the
//! whole batch lands behind a single commit, so a bad or partially read
//! source never produces a partially visible index.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::engine::SearchEngine;
use crate::error::{EngineError, Result};
use crate::models::{parse_created_date, DocumentSource};

/// One row of an external tabular source, the date still in surface form
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SourceRow {
    pub rubrics: String,
    pub text: String,
    pub created_date: String,
}

impl SourceRow {
    pub fn new(
        rubrics: impl Into<String>,
        text: impl Into<String>,
        created_date: impl Into<String>,
    ) -> Self {
        Self {
            rubrics: rubrics.into(),
            text: text.into(),
            created_date: created_date.into(),
        }
    }

    /// Validate the row, parsing the timestamp
    ///
    /// `line` is the 1-based data row number used in error reports.
    fn into_source(self, line: usize) -> Result<DocumentSource> {
        let created_date =
            parse_created_date(&self.created_date).map_err(|e| EngineError::MalformedRow {
                line,
                reason: format!("unparseable created_date {:?}: {}", self.created_date, e),
            })?;
        Ok(DocumentSource {
            rubrics: self.rubrics,
            text: self.text,
            created_date,
        })
    }
}

/// Ingest pre-parsed rows; returns the number of documents committed
///
/// Validation happens for the whole batch before any write is staged, so a
/// `MalformedRow` leaves the index untouched.
pub fn ingest_rows<I>(engine: &SearchEngine, rows: I) -> Result<usize>
where
    I: IntoIterator<Item = SourceRow>,
{
    let sources = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.into_source(i + 1))
        .collect::<Result<Vec<_>>>()?;

    if sources.is_empty() {
        return Ok(0);
    }

    let mut session = engine.writer()?;
    let count = sources.len();
    for source in sources {
        session.add_document(source);
    }
    session.commit()?;

    info!(count, "ingested batch");
    Ok(count)
}

/// Ingest a CSV source with a `rubrics,text,created_date` header row
pub fn ingest_csv_reader<R: Read>(engine: &SearchEngine, reader: R) -> Result<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader
        .deserialize::<SourceRow>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    ingest_rows(engine, rows)
}

/// Ingest a CSV file from disk
pub fn ingest_csv_path(engine: &SearchEngine, path: impl AsRef<Path>) -> Result<usize> {
    let file = File::open(path)?;
    ingest_csv_reader(engine, file)
}
