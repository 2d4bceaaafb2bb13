//! Error types for procura-core.

/// A submission was rejected because one or more required fields were
/// missing or malformed.
///
/// `fields` holds the wire names of every offending field so the caller can
/// report them all at once instead of failing on the first one.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid or missing fields: {}", fields.join(", "))]
pub struct ValidationError {
    /// Wire names of the fields that failed validation.
    pub fields: Vec<&'static str>,
}

impl ValidationError {
    /// Create a validation error for the given wire field names.
    #[must_use]
    pub fn new(fields: Vec<&'static str>) -> Self {
        Self { fields }
    }
}
