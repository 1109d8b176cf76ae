//! Error types for JSON updates.

use patchwork_builder::BuildError;
use std::io;
use serde_json::error::Category;
use thiserror::Error;

/// Result type for update operations.
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Errors that can occur while applying a JSON fragment.
///
/// No variant ever comes with a partially updated value: an update either
/// succeeds as a whole or returns one of these.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The fragment is not a well-formed JSON object (syntax error anywhere
    /// in the text, premature end of input, wrong top-level type, trailing
    /// characters).
    #[error("malformed JSON fragment: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A syntactically valid value for a specific key could not be bound to
    /// its field, or the key is unknown and unknown keys are rejected.
    #[error("invalid value for field `{field}`: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// The fragment's byte stream could not be read.
    #[error("failed to read JSON fragment: {0}")]
    Io(#[from] io::Error),

    /// The merged builder rejected its field state.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl UpdateError {
    /// Sorts a `serde_json` failure into the right variant.
    ///
    /// `field` is the key whose value was being bound when the error
    /// occurred, if any. Only data errors are attributed to it; a syntax
    /// error inside a value is still a malformed fragment.
    pub(crate) fn from_json(source: serde_json::Error, field: Option<String>) -> Self {
        match (source.classify(), field) {
            (Category::Io, _) => Self::Io(source.into()),
            (Category::Data, Some(field)) => Self::InvalidField { field, source },
            (Category::Syntax | Category::Eof | Category::Data, _) => Self::Malformed(source),
        }
    }

    /// Whether the error is caused by the fragment's content.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::InvalidField { .. })
    }

    /// Key of the offending field, when the error is tied to one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }

    /// One-based `(line, column)` of the offending token, when known.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Malformed(source) | Self::InvalidField { source, .. } if source.line() > 0 => {
                Some((source.line(), source.column()))
            }
            _ => None,
        }
    }
}
