//! Error types for schema resolution

use thiserror::Error;

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generator operations
///
/// Every variant is fatal for the artifact being generated: no partial output
/// is produced once one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A declared type token does not fit the type grammar
    #[error("cannot classify type `{token}`: {reason}")]
    Classification { token: String, reason: String },

    /// Two members collide when compared case-insensitively
    #[error("duplicate member `{name}` (collides with `{existing}`)")]
    DuplicateMember { name: String, existing: String },

    /// A member or parameter name is not a valid identifier
    #[error("invalid identifier: `{0}`")]
    InvalidIdentifier(String),

    /// Options contradict each other for one member
    #[error("conflicting options for `{member}`: {reason}")]
    ConflictingOptions { member: String, reason: String },

    /// The schema source is not in a supported form
    #[error("unsupported schema source: {0}")]
    UnsupportedSource(String),
}

impl GenError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            GenError::Classification { .. } => 1,
            GenError::DuplicateMember { .. } => 2,
            GenError::InvalidIdentifier(_) => 3,
            GenError::ConflictingOptions { .. } => 4,
            GenError::UnsupportedSource(_) => 5,
        }
    }

    pub(crate) fn classification(token: &str, reason: impl Into<String>) -> Self {
        GenError::Classification {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
