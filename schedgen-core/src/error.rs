//! Error types for schedgen-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while reading the company spreadsheet.
///
/// Every variant is fatal for the whole run: if the spreadsheet cannot be
/// read there are no rows to recover per-row.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The workbook could not be opened or parsed at all.
    #[error("failed to open spreadsheet at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// The workbook contains no worksheets.
    #[error("spreadsheet at {path} has no worksheets")]
    NoWorksheet { path: PathBuf },

    /// The first worksheet exists but its cell range could not be read.
    #[error("failed to read worksheet in {path}: {source}")]
    Range {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },
}
