//! Merge fields — the values substituted into the template placeholders.

use schedgen_core::CompanyRecord;

/// Placeholder names the template may use, in the order they are
/// documented for template authors.
pub const PLACEHOLDER_NAMES: &[&str] = &["CompanyHeader", "CompanyNumber", "CompanyInitial"];

/// Values for one merge call, keyed by placeholder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeFields {
    pub header: String,
    pub number: String,
    pub initial: String,
}

impl MergeFields {
    /// Value for a placeholder name, or `None` if the name is not one of
    /// [`PLACEHOLDER_NAMES`].
    pub fn value_of(&self, name: &str) -> Option<&str> {
        match name {
            "CompanyHeader" => Some(&self.header),
            "CompanyNumber" => Some(&self.number),
            "CompanyInitial" => Some(&self.initial),
            _ => None,
        }
    }

    /// Whether `name` is a placeholder this engine knows how to fill.
    pub fn is_known(name: &str) -> bool {
        PLACEHOLDER_NAMES.contains(&name)
    }
}

impl From<&CompanyRecord> for MergeFields {
    fn from(record: &CompanyRecord) -> Self {
        Self {
            header: record.header.clone(),
            number: record.number.clone(),
            initial: record.initial.clone(),
        }
    }
}
