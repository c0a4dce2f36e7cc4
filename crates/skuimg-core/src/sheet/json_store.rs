//! File-backed sheet store: a JSON document of named cell grids.
//!
//! ```json
//! { "sheets": { "Backup": [["SKU", "Title"], ["ABCDE1234", "Olive Oil"]] } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{A1Range, RecordSink, RecordSource, Rows, SheetError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    sheets: BTreeMap<String, Vec<Vec<String>>>,
}

/// Sheet store persisted as one JSON file.
///
/// Writes go to a sibling `.<name>.tmp` file that is then renamed over the
/// store, so an interrupted write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonSheetStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSheetStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document, SheetError> {
        let data = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    async fn save(&self, doc: &Document) -> Result<(), SheetError> {
        let data = serde_json::to_vec_pretty(doc)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::File::open(&tmp).await?.sync_all().await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sheet".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl RecordSource for JsonSheetStore {
    async fn fetch_records(&self, range: &A1Range) -> Result<Rows, SheetError> {
        let doc = self.load().await?;
        let grid = doc
            .sheets
            .get(&range.sheet)
            .ok_or_else(|| SheetError::UnknownSheet(range.sheet.clone()))?;
        let first = range.first_row_offset().ok_or_else(|| row_zero(range))?;
        Ok(slice_grid(grid, first, range))
    }
}

impl RecordSink for JsonSheetStore {
    async fn write_column(&self, range: &A1Range, values: Rows) -> Result<(), SheetError> {
        if !range.is_column() {
            return Err(SheetError::NotAColumn(range.to_string()));
        }
        let first = range.first_row_offset().ok_or_else(|| row_zero(range))?;
        if values.len() > range.row_count() as usize {
            return Err(SheetError::SizeMismatch {
                range: range.to_string(),
                len: values.len(),
            });
        }

        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;
        let grid = doc
            .sheets
            .get_mut(&range.sheet)
            .ok_or_else(|| SheetError::UnknownSheet(range.sheet.clone()))?;

        let col = range.start_col as usize;
        for (offset, row_values) in values.into_iter().enumerate() {
            let row_idx = first + offset;
            if grid.len() <= row_idx {
                grid.resize_with(row_idx + 1, Vec::new);
            }
            let row = &mut grid[row_idx];
            if row.len() <= col {
                row.resize(col + 1, String::new());
            }
            row[col] = row_values.into_iter().next().unwrap_or_default();
        }

        self.save(&doc).await?;
        tracing::debug!(range = %range, path = %self.path.display(), "column written");
        Ok(())
    }
}

fn row_zero(range: &A1Range) -> SheetError {
    SheetError::InvalidRange {
        range: range.to_string(),
        reason: "rows start at 1",
    }
}

/// Cells inside `range` (first row at grid offset `first`), with trailing
/// empty cells and trailing empty rows dropped.
fn slice_grid(grid: &[Vec<String>], first: usize, range: &A1Range) -> Rows {
    let last = (range.end_row as usize).min(grid.len());
    let (c0, c1) = (range.start_col as usize, range.end_col as usize + 1);

    let mut rows: Rows = grid
        .get(first..last)
        .unwrap_or_default()
        .iter()
        .map(|row| {
            let mut cells: Vec<String> = row
                .get(c0.min(row.len())..c1.min(row.len()))
                .unwrap_or_default()
                .to_vec();
            while cells.last().is_some_and(|c| c.is_empty()) {
                cells.pop();
            }
            cells
        })
        .collect();

    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows
}
