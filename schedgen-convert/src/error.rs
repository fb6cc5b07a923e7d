//! Error types for schedgen-convert.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// All errors a conversion call can produce. Every variant is per-document;
/// none of them should abort a batch.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Could not stage the input document (temp dir or write failure).
    #[error("failed to stage document for conversion: {0}")]
    Stage(#[source] std::io::Error),

    /// The converter binary could not be launched at all.
    #[error("failed to launch converter '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Polling the running converter process failed.
    #[error("failed to poll converter process: {0}")]
    Wait(#[source] std::io::Error),

    /// The converter exited unsuccessfully.
    #[error("converter exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    /// The wall-clock budget elapsed; the process was killed.
    #[error("conversion timed out after {0:?}")]
    Timeout(Duration),

    /// The converter reported success but wrote no output file.
    #[error("converter produced no output file at {path}")]
    MissingOutput { path: PathBuf },

    /// The produced output file could not be read back.
    #[error("failed to read converted output: {0}")]
    ReadOutput(#[source] std::io::Error),

    /// The remote conversion service call failed (transport or HTTP status).
    #[error("conversion service call failed: {0}")]
    Http(#[source] Box<ureq::Error>),

    /// The remote service responded but its body could not be read.
    #[error("failed to read conversion service response: {0}")]
    HttpRead(#[source] std::io::Error),
}
