use csv::{ReaderBuilder, Trim};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::quote::{QuoteTable, RawRow, FIELD_COUNT};

/// Reads a downloaded quote file into a [`QuoteTable`].
///
/// - The first line is a header and is always skipped, even when blank.
/// - Every other line is split on `,`; surrounding whitespace is trimmed.
///   Quotes are ordinary characters.
/// - Lines with fewer than [`FIELD_COUNT`] fields are dropped and counted.
/// - Blank lines are ignored.
pub struct SeriesParser;

impl SeriesParser {
    /// Parse a file on disk. An unreadable file is a `CoreError::FileIO`.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<QuoteTable, CoreError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            CoreError::FileIO(format!("Cannot open {}: {e}", path.display()))
        })?;
        Self::parse_reader(file)
    }

    /// Parse CSV text from any reader.
    ///
    /// The first physical line is consumed before the CSV reader sees the
    /// input, so a blank or garbled line 1 is still the header. Invalid UTF-8
    /// is decoded lossily.
    pub fn parse_reader<R: Read>(reader: R) -> Result<QuoteTable, CoreError> {
        let mut input = BufReader::new(reader);
        let mut header = Vec::new();
        input.read_until(b'\n', &mut header)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(input);

        let mut rows = Vec::new();
        let mut dropped = 0;

        for result in reader.byte_records() {
            let record = result?;
            let fields = record.iter().map(String::from_utf8_lossy);
            match RawRow::from_fields(fields) {
                Some(row) => rows.push(row),
                None => {
                    // Line numbers count the header consumed above.
                    let line = record.position().map(|p| p.line() + 1).unwrap_or_default();
                    debug!(
                        line,
                        fields = record.len(),
                        "Dropping row with fewer than {FIELD_COUNT} fields"
                    );
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            warn!(dropped, kept = rows.len(), "Skipped malformed rows");
        }

        Ok(QuoteTable::new(rows, dropped))
    }

    /// Parse CSV text held in memory.
    pub fn parse_str(text: &str) -> Result<QuoteTable, CoreError> {
        Self::parse_reader(text.as_bytes())
    }
}
