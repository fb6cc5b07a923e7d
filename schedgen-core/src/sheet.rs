//! Spreadsheet row source.
//!
//! Column layout is fixed by position: A = letterhead text, B = company
//! number, C = company initial. Physical row 1 is the header row and is
//! never yielded as data; rows 2..N become one [`CompanyRecord`] each.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::error::SheetError;
use crate::types::CompanyRecord;

/// Read every data row of the first worksheet into [`CompanyRecord`]s.
///
/// Yields exactly one record per physical data row; presence checks are
/// the caller's concern. Missing or empty cells map to empty strings,
/// never to a failure.
pub fn read_company_rows(path: &Path) -> Result<Vec<CompanyRecord>, SheetError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| SheetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|source| SheetError::Range {
            path: path.to_path_buf(),
            source,
        })?;

    let records = range
        .rows()
        .skip(1)
        .map(|row| {
            CompanyRecord::new(
                cell_text(row.first()),
                cell_text(row.get(1)),
                cell_text(row.get(2)),
            )
        })
        .collect();

    Ok(records)
}

/// Text content of a cell; numbers render via `Display` so `100.0`
/// comes back as `"100"`.
fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_owned(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string().trim().to_owned(),
    }
}
