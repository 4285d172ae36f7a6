use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;

use crate::models::AttributeCell;

pub mod csv;
pub mod text;

/// Source of raw attribute values, keyed by row.
pub trait AttributeReader {
    fn read(&self, path: &Path) -> Result<Vec<AttributeCell>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Tsv,
    Text,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "CSV"),
            InputFormat::Tsv => write!(f, "TSV"),
            InputFormat::Text => write!(f, "text"),
        }
    }
}

/// Which column of a delimited file holds the attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// 0-based column index.
    Index(usize),
    /// Header name, matched after trimming.
    Name(String),
}

impl ColumnSelector {
    /// `"3"` selects the third column (1-based), anything else a header name.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => ColumnSelector::Index(n - 1),
            _ => ColumnSelector::Name(raw.trim().to_string()),
        }
    }
}

impl Default for ColumnSelector {
    fn default() -> Self {
        ColumnSelector::Index(0)
    }
}

/// Options shared by the delimited readers.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub column: ColumnSelector,
    pub has_headers: bool,
    pub delimiter: Option<u8>,
}

/// Detect the input format from the file extension. Unknown extensions are read as CSV.
pub fn detect_format(path: &Path) -> InputFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("tsv") | Some("tab") => InputFormat::Tsv,
        Some("txt") | Some("lst") => InputFormat::Text,
        _ => InputFormat::Csv,
    }
}

pub fn reader_for(format: InputFormat, options: &ReaderOptions) -> Box<dyn AttributeReader> {
    match format {
        InputFormat::Csv => Box::new(csv::CsvReader::new(
            options.column.clone(),
            options.has_headers,
            options.delimiter.unwrap_or(b','),
        )),
        InputFormat::Tsv => Box::new(csv::CsvReader::new(
            options.column.clone(),
            options.has_headers,
            options.delimiter.unwrap_or(b'\t'),
        )),
        InputFormat::Text => Box::new(text::TextReader::new()),
    }
}

/// Non-blank values with exact duplicates removed, in first-occurrence order.
pub fn distinct_values(cells: &[AttributeCell]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    cells
        .iter()
        .map(|c| c.value.as_str())
        .filter(|v| !v.trim().is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cell(row: usize, value: &str) -> AttributeCell {
        AttributeCell {
            row,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(&PathBuf::from("a.csv")), InputFormat::Csv);
        assert_eq!(detect_format(&PathBuf::from("a.TSV")), InputFormat::Tsv);
        assert_eq!(detect_format(&PathBuf::from("a.txt")), InputFormat::Text);
        assert_eq!(detect_format(&PathBuf::from("attributes")), InputFormat::Csv);
    }

    #[test]
    fn test_column_selector_parse() {
        assert_eq!(ColumnSelector::parse("2"), ColumnSelector::Index(1));
        assert_eq!(
            ColumnSelector::parse(" Attribute "),
            ColumnSelector::Name("Attribute".to_string())
        );
        assert_eq!(
            ColumnSelector::parse("0"),
            ColumnSelector::Name("0".to_string())
        );
    }

    #[test]
    fn test_distinct_values_drops_blanks_and_duplicates() {
        let cells = vec![
            cell(2, "Color"),
            cell(3, "  "),
            cell(4, "color"),
            cell(5, "Color"),
            cell(6, ""),
            cell(7, "Color "),
        ];
        assert_eq!(distinct_values(&cells), vec!["Color", "color", "Color "]);
    }
}
