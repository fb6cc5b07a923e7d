//! # schedgen-batch
//!
//! The batch orchestrator: one sequential pass over the company
//! spreadsheet, merging and converting one row at a time.
//!
//! Call [`run_batch`] with a [`RunConfig`](schedgen_core::RunConfig) and a
//! converter; it returns the [`RunReport`] tally. Fatal input problems
//! (unreadable spreadsheet, broken template) abort before any row is
//! processed; per-row failures are absorbed into the tally.

pub mod error;
pub mod pipeline;
pub mod report;
pub mod writer;

pub use error::BatchError;
pub use pipeline::run_batch;
pub use report::{RowOutcome, RunReport};
pub use writer::{atomic_write, WriteResult};
