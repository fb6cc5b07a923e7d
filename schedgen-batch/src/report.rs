//! Run report — the tally and per-row outcomes of one batch run.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What happened to one data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Both the editable and the fixed-format document were written.
    Generated { number: String, stem: String },

    /// The editable document was written but conversion failed. Still a
    /// success for the tally; the reason keeps the degradation visible.
    DocOnly {
        number: String,
        stem: String,
        reason: String,
    },

    /// A required field was missing; merger and converter never ran.
    /// Neither a success nor an error.
    Skipped { number: String },

    /// Merge or write failed for this row; counted as an error.
    Failed { number: String, reason: String },

    /// Dry-run: both documents would have been generated.
    WouldGenerate { number: String, stem: String },
}

/// Summary of one batch run. The only state that outlives the loop;
/// nothing is persisted across runs.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Rows whose editable document was produced (conversion failures
    /// included, by policy).
    pub success_count: u32,
    /// Rows that failed to merge or write.
    pub error_count: u32,
    /// Rows skipped for missing required fields.
    pub skipped_count: u32,
    pub rows: Vec<RowOutcome>,
}
