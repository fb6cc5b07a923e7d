//! Error types for schedgen-merge.

use std::fmt;

use thiserror::Error;

/// One structural problem found in the template markup.
///
/// Issues are reported in document order so the operator can fix them
/// top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateIssue {
    /// Human-readable description of the problem.
    pub message: String,
    /// Surrounding document text, where available.
    pub context: Option<String>,
}

impl fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (near \"{context}\")")?;
        }
        Ok(())
    }
}

/// All errors that can arise from template loading and merging.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The template bytes are not a readable zip archive.
    #[error("template is not a readable docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The archive has no `word/document.xml` part.
    #[error("template has no word/document.xml part; is it a real .docx?")]
    MissingDocumentPart,

    /// The main document part could not be read as UTF-8 XML.
    #[error("failed to read word/document.xml: {0}")]
    DocumentRead(#[from] std::io::Error),

    /// The placeholder markup is structurally broken. Fatal for the whole
    /// run: skipping rows cannot fix the template itself.
    #[error("template markup is broken ({} issue{})", issues.len(), if issues.len() == 1 { "" } else { "s" })]
    TemplateFormat { issues: Vec<TemplateIssue> },

    /// A single merge call failed (archive rebuild, unexpected data).
    /// Recoverable: the caller skips the row and moves on.
    #[error("row merge failed: {message}")]
    Render { message: String },
}

impl MergeError {
    /// Issues attached to a [`MergeError::TemplateFormat`], empty otherwise.
    pub fn issues(&self) -> &[TemplateIssue] {
        match self {
            MergeError::TemplateFormat { issues } => issues,
            _ => &[],
        }
    }
}

/// Convenience constructor for [`MergeError::Render`].
pub(crate) fn render_err(message: impl fmt::Display) -> MergeError {
    MergeError::Render {
        message: message.to_string(),
    }
}
