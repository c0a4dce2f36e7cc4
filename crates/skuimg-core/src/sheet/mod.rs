//! Sheet boundary: A1 ranges, record source/sink traits, and a file-backed store.
//!
//! Failures here are whole-run failures and propagate to the caller.

mod a1;
mod json_store;
mod layout;

use std::future::Future;

use thiserror::Error;

pub use a1::{column_index, column_letters, A1Range};
pub use json_store::JsonSheetStore;
pub use layout::SheetLayout;

/// Raw cell values, one inner vector per row.
pub type Rows = Vec<Vec<String>>;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("invalid A1 range {range:?}: {reason}")]
    InvalidRange { range: String, reason: &'static str },
    #[error("range {0} must span a single column")]
    NotAColumn(String),
    #[error("sheet {0:?} not found")]
    UnknownSheet(String),
    #[error("{len} values do not fit range {range}")]
    SizeMismatch { range: String, len: usize },
    #[error("sheet store I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("sheet store format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Reads raw row values for a range.
pub trait RecordSource: Send + Sync {
    fn fetch_records(
        &self,
        range: &A1Range,
    ) -> impl Future<Output = Result<Rows, SheetError>> + Send;
}

/// Writes a single column of values, one single-cell row per input row.
pub trait RecordSink: Send + Sync {
    fn write_column(
        &self,
        range: &A1Range,
        values: Rows,
    ) -> impl Future<Output = Result<(), SheetError>> + Send;
}
