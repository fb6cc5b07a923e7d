//! # schedgen-merge
//!
//! The docx template merge engine. A `.docx` file is a zip archive whose
//! main part is `word/document.xml`; [`DocxTemplate`] loads that part once,
//! validates the placeholder markup up front, and produces one merged
//! document per [`MergeFields`] without ever mutating the template bytes.

pub mod engine;
pub mod error;
pub mod fields;

pub use engine::DocxTemplate;
pub use error::{MergeError, TemplateIssue};
pub use fields::{MergeFields, PLACEHOLDER_NAMES};
