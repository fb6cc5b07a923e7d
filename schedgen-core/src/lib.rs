//! Schedgen core library — domain types, run configuration, spreadsheet
//! row source, errors.
//!
//! Public API surface:
//! - [`types`] — [`CompanyRecord`] and output-name derivation
//! - [`config`] — [`RunConfig`] with the fixed input/output paths
//! - [`sheet`] — [`read_company_rows`]
//! - [`error`] — [`SheetError`]

pub mod config;
pub mod error;
pub mod sheet;
pub mod types;

pub use config::{ConverterKind, RunConfig};
pub use error::SheetError;
pub use sheet::read_company_rows;
pub use types::{CompanyRecord, DOCUMENT_SUFFIX};
