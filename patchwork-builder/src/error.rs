//! Error types for building records.

use thiserror::Error;

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised when a builder cannot produce its target value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// One or more required fields were never set on the builder.
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The assembled value violates a rule declared by its record type.
    #[error("validation rule `{rule}` violated: {reason}")]
    Validation { rule: String, reason: String },
}

impl BuildError {
    /// Shorthand for a validation failure.
    pub fn validation(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Names of the missing fields, empty for validation failures.
    #[must_use]
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
            Self::Validation { .. } => &[],
        }
    }
}
