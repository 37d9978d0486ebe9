//! File ingestion
//!
//! Reads the input one line at a time, numbering lines from 1, and records
//! every token in the store. The first failure aborts the whole run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::error::IngestError;
use crate::core::model::{ConcordanceStore, OccurrenceSink};
use crate::core::tokenizer::{normalize, sanitize, split_words};

/// Counters gathered while ingesting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Lines read (a final line without newline counts)
    pub lines: usize,
    /// Tokens recorded in the store
    pub tokens: usize,
    /// Non-printable bytes replaced by separators
    pub sanitized_bytes: usize,
}

/// Ingest the file at `path` into `store`.
///
/// The file handle is dropped before returning on every path.
pub fn ingest(path: &Path, store: &mut ConcordanceStore) -> Result<IngestSummary, IngestError> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    tracing::debug!(path = %path.display(), "opened input");

    let summary = ingest_reader(BufReader::new(file), store)?;
    tracing::debug!(
        lines = summary.lines,
        tokens = summary.tokens,
        words = store.len(),
        "ingestion finished"
    );
    Ok(summary)
}

/// Ingest from any buffered reader into any sink.
///
/// Lines are split on `\n` only and have no length limit. The terminator
/// itself is not part of the line.
pub fn ingest_reader<R: BufRead, S: OccurrenceSink>(
    mut reader: R,
    store: &mut S,
) -> Result<IngestSummary, IngestError> {
    let mut summary = IngestSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| IngestError::Read {
                line: summary.lines,
                source,
            })?;
        if read == 0 {
            break;
        }
        summary.lines += 1;
        let line_number = summary.lines;

        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let line = sanitize(raw);
        if line.replaced > 0 {
            tracing::trace!(
                line = line_number,
                replaced = line.replaced,
                "replaced non-printable bytes"
            );
        }
        summary.sanitized_bytes += line.replaced;

        for word in split_words(&line.text) {
            store
                .add_occurrence(&normalize(word), line_number)
                .map_err(|source| IngestError::Store {
                    line: line_number,
                    source,
                })?;
            summary.tokens += 1;
        }
    }

    Ok(summary)
}
