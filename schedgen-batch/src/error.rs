//! Error types for schedgen-batch.
//!
//! Only run-fatal conditions become a [`BatchError`]; per-row failures are
//! folded into the [`RunReport`](crate::report::RunReport) by the pipeline
//! and never escape the loop.

use std::path::PathBuf;

use thiserror::Error;

use schedgen_core::SheetError;
use schedgen_merge::{MergeError, TemplateIssue};

/// All run-fatal errors of the batch pipeline.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The template file could not be read from disk.
    #[error("failed to read template at {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template could not be parsed, or its placeholder markup is
    /// structurally broken (see [`BatchError::template_issues`]).
    #[error("template error: {0}")]
    Template(#[from] MergeError),

    /// The company spreadsheet could not be read.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// An I/O error at a run-fatal point, with path context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BatchError {
    /// Markup issues when this is a broken-template error, empty otherwise.
    /// The CLI uses this to print remediation guidance instead of a trace.
    pub fn template_issues(&self) -> &[TemplateIssue] {
        match self {
            BatchError::Template(err) => err.issues(),
            _ => &[],
        }
    }
}

/// Convenience constructor for [`BatchError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BatchError {
    BatchError::Io {
        path: path.into(),
        source,
    }
}
