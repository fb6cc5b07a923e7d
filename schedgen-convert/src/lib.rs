//! # schedgen-convert
//!
//! PDF rendering of merged documents. The capability is one trait,
//! [`PdfConverter`], with two interchangeable strategies behind it:
//!
//! - [`SofficeConverter`] — headless LibreOffice as an external process,
//!   with a bounded wall-clock timeout per call;
//! - [`HttpConverter`] — a remote conversion service reached over HTTP.
//!
//! Conversion failures are always per-document; callers log them and keep
//! going, they never abort a batch.

pub mod error;
pub mod remote;
pub mod soffice;

pub use error::ConvertError;
pub use remote::HttpConverter;
pub use soffice::SofficeConverter;

/// A strategy that renders docx bytes to pdf bytes.
pub trait PdfConverter {
    fn convert(&self, docx: &[u8]) -> Result<Vec<u8>, ConvertError>;
}
