use std::borrow::Cow;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use super::ColumnSelector;
use crate::models::AttributeCell;

/// Reads one column of a delimited file (CSV, TSV, or a spreadsheet export).
///
/// Rows are numbered the way a spreadsheet shows them: with headers enabled
/// the header is row 1 and the first value is row 2. Short rows that do not
/// reach the selected column are skipped. Bytes that are not valid UTF-8
/// (legacy spreadsheet encodings) are replaced with `U+FFFD` and logged.
pub struct CsvReader {
    column: ColumnSelector,
    has_headers: bool,
    delimiter: u8,
}

impl CsvReader {
    pub fn new(column: ColumnSelector, has_headers: bool, delimiter: u8) -> Self {
        Self {
            column,
            has_headers,
            delimiter,
        }
    }

    fn resolve_column(
        &self,
        reader: &mut ::csv::Reader<std::fs::File>,
        path: &Path,
    ) -> Result<usize> {
        match &self.column {
            ColumnSelector::Index(i) => Ok(*i),
            ColumnSelector::Name(name) => {
                if !self.has_headers {
                    bail!(
                        "column `{}` selected by name but {} is read without headers",
                        name,
                        path.display()
                    );
                }
                let headers = reader
                    .byte_headers()
                    .with_context(|| format!("Failed to read headers of {}", path.display()))?;
                headers
                    .iter()
                    .position(|h| String::from_utf8_lossy(h).trim() == name)
                    .with_context(|| format!("column `{}` not found in {}", name, path.display()))
            }
        }
    }
}

impl super::AttributeReader for CsvReader {
    fn read(&self, path: &Path) -> Result<Vec<AttributeCell>> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let column = self.resolve_column(&mut reader, path)?;
        let mut cells = Vec::new();

        for (idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Malformed row in {}", path.display()))?;
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1 + usize::from(self.has_headers));
            if let Some(bytes) = record.get(column) {
                let value = String::from_utf8_lossy(bytes);
                if matches!(value, Cow::Owned(_)) {
                    warn!(path = %path.display(), row, "invalid UTF-8 in cell, bytes replaced");
                }
                cells.push(AttributeCell {
                    row,
                    value: value.into_owned(),
                });
            }
        }

        debug!(path = %path.display(), column, cells = cells.len(), "read delimited input");
        Ok(cells)
    }
}
