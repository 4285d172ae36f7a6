use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::AttributeCell;

/// Reads a plain list with one attribute per line.
pub struct TextReader;

impl TextReader {
    pub fn new() -> Self {
        Self
    }
}

impl super::AttributeReader for TextReader {
    fn read(&self, path: &Path) -> Result<Vec<AttributeCell>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let cells: Vec<AttributeCell> = content
            .lines()
            .enumerate()
            .map(|(i, line)| AttributeCell {
                row: i + 1,
                value: line.to_string(),
            })
            .collect();

        debug!(path = %path.display(), cells = cells.len(), "read text input");
        Ok(cells)
    }
}
