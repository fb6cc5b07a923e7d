//! Domain types for a schedgen batch run.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Field values are always stored trimmed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// File-name suffix shared by every generated document pair.
pub const DOCUMENT_SUFFIX: &str = "Schedule 9_CC";

// ---------------------------------------------------------------------------
// CompanyRecord
// ---------------------------------------------------------------------------

/// One spreadsheet row reduced to the three merge fields.
///
/// A record is *complete* only when all three fields are non-empty after
/// trimming; incomplete records are skipped by the batch loop without
/// touching the success or error counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Column A — free-text letterhead line.
    pub header: String,
    /// Column B — registered company number.
    pub number: String,
    /// Column C — company initial used in the output file name.
    pub initial: String,
}

impl CompanyRecord {
    /// Build a record, trimming surrounding whitespace from every field.
    pub fn new(
        header: impl Into<String>,
        number: impl Into<String>,
        initial: impl Into<String>,
    ) -> Self {
        Self {
            header: header.into().trim().to_owned(),
            number: number.into().trim().to_owned(),
            initial: initial.into().trim().to_owned(),
        }
    }

    /// All three fields non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.header.is_empty() && !self.number.is_empty() && !self.initial.is_empty()
    }

    /// `{number}_{initial} Schedule 9_CC`, the stem shared by both output files.
    ///
    /// Two records produce the same stem iff their `(number, initial)` pairs
    /// are equal; a duplicate pair means the later row overwrites the earlier
    /// one (last-write-wins, not guarded).
    pub fn document_stem(&self) -> String {
        format!("{}_{} {}", self.number, self.initial, DOCUMENT_SUFFIX)
    }

    /// Editable output file name (`.docx`).
    pub fn docx_name(&self) -> String {
        format!("{}.docx", self.document_stem())
    }

    /// Fixed-format output file name (`.pdf`).
    pub fn pdf_name(&self) -> String {
        format!("{}.pdf", self.document_stem())
    }
}

impl fmt::Display for CompanyRecord {
    /// Shows the company number, the traceability key used in log lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.number.fmt(f)
    }
}
