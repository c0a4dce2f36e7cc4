//! Column layout: which sheet columns hold SKUs, handles and results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{column_index, A1Range, Rows, SheetError};
use crate::record::InputRecord;

/// `[sheet]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// JSON sheet store; the CLI `--sheet` flag overrides it.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Sheet (tab) name.
    pub name: String,
    /// First data row (1-based).
    pub start_row: u32,
    /// Maximum number of data rows read per run.
    pub max_rows: u32,
    /// Column holding the product SKU.
    pub sku_column: String,
    /// Column holding the product title/handle, for the handle strategy.
    #[serde(default)]
    pub handle_column: Option<String>,
    /// Column receiving the resolved image URL.
    pub url_column: String,
    /// Column receiving the status marker.
    pub status_column: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            path: None,
            name: "Backup".to_string(),
            start_row: 4,
            max_rows: 100,
            sku_column: "AP".to_string(),
            handle_column: None,
            url_column: "AR".to_string(),
            status_column: "AH".to_string(),
        }
    }
}

impl SheetLayout {
    pub fn sku_range(&self) -> Result<A1Range, SheetError> {
        self.input_range(&self.sku_column)
    }

    pub fn handle_range(&self) -> Result<Option<A1Range>, SheetError> {
        self.handle_column
            .as_deref()
            .map(|col| self.input_range(col))
            .transpose()
    }

    /// URL output range covering `len` rows.
    pub fn url_range(&self, len: usize) -> Result<A1Range, SheetError> {
        self.output_range(&self.url_column, len)
    }

    /// Status output range covering `len` rows.
    pub fn status_range(&self, len: usize) -> Result<A1Range, SheetError> {
        self.output_range(&self.status_column, len)
    }

    /// Map raw SKU (and optional handle) rows to input records.
    ///
    /// The SKU rows decide how many records there are; a missing handle cell
    /// leaves that record without a handle.
    pub fn records(&self, sku_rows: &Rows, handle_rows: Option<&Rows>) -> Vec<InputRecord> {
        sku_rows
            .iter()
            .enumerate()
            .map(|(offset, row)| InputRecord {
                identifier: first_cell(Some(row)).unwrap_or_default(),
                handle: handle_rows.and_then(|rows| first_cell(rows.get(offset))),
                row_index: self.start_row.saturating_add(offset as u32),
            })
            .collect()
    }

    fn input_range(&self, column: &str) -> Result<A1Range, SheetError> {
        A1Range::column(
            &self.name,
            self.column(column)?,
            self.first_row()?,
            self.max_rows,
        )
    }

    fn output_range(&self, column: &str, len: usize) -> Result<A1Range, SheetError> {
        let len = u32::try_from(len).map_err(|_| SheetError::InvalidRange {
            range: format!("{}!{}{}", self.name, column, self.start_row),
            reason: "too many rows",
        })?;
        A1Range::column(&self.name, self.column(column)?, self.first_row()?, len)
    }

    fn first_row(&self) -> Result<u32, SheetError> {
        if self.start_row == 0 {
            return Err(SheetError::InvalidRange {
                range: format!("{}!{}", self.name, self.start_row),
                reason: "sheet.start_row must be at least 1",
            });
        }
        Ok(self.start_row)
    }

    fn column(&self, letters: &str) -> Result<u32, SheetError> {
        column_index(letters.trim()).ok_or_else(|| SheetError::InvalidRange {
            range: format!("{}!{}", self.name, letters),
            reason: "bad column label",
        })
    }
}

fn first_cell(row: Option<&Vec<String>>) -> Option<String> {
    row.and_then(|r| r.first()).cloned()
}
