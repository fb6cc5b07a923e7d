//! Fixed run configuration.
//!
//! schedgen deliberately has no config file and no environment lookups:
//! the input/output paths are compile-time constants surfaced through
//! [`RunConfig::default`]. Tests construct a [`RunConfig`] by hand against
//! a `TempDir`.

use std::path::PathBuf;
use std::time::Duration;

/// Default template location, relative to the working directory.
pub const TEMPLATE_PATH: &str = "input/template.docx";

/// Default company spreadsheet location.
pub const SHEET_PATH: &str = "input/companyList.xlsx";

/// Default output directory (created on demand).
pub const OUTPUT_DIR: &str = "output";

/// Wall-clock budget for a single PDF conversion.
pub const CONVERT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which PDF conversion strategy the run uses.
///
/// The two strategies are functionally interchangeable; the choice is made
/// here, at configuration time, never per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterKind {
    /// Headless LibreOffice invoked as an external process.
    Soffice,
    /// Remote HTTP conversion service at the given endpoint URL.
    Remote(String),
}

/// Everything a batch run needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path to the `.docx` template containing the merge placeholders.
    pub template_path: PathBuf,
    /// Path to the `.xlsx` company list.
    pub sheet_path: PathBuf,
    /// Directory the generated documents are written into.
    pub output_dir: PathBuf,
    /// Conversion strategy for the fixed-format copy.
    pub converter: ConverterKind,
    /// Per-conversion timeout.
    pub convert_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(TEMPLATE_PATH),
            sheet_path: PathBuf::from(SHEET_PATH),
            output_dir: PathBuf::from(OUTPUT_DIR),
            converter: ConverterKind::Soffice,
            convert_timeout: CONVERT_TIMEOUT,
        }
    }
}
