//! FieldError for catalog record numerics

/// Error type for parsing the string numerics of a catalog record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The field holds a value that does not parse as the expected number.
    #[error("Field '{field}' has invalid value {value:?}: expected {expected}")]
    Invalid {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl FieldError {
    /// Creates a new invalid field error.
    pub fn invalid(field: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::Invalid {
            field,
            value: value.into(),
            expected,
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Invalid { field, .. } => field,
        }
    }
}
