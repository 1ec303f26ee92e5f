//! Error types for protocol execution

use thiserror::Error;

/// Result type alias for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Error type for encoding and decoding instances
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The parcel ended before the expected value
    #[error("unexpected end of parcel at offset {offset} (needed {needed} bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    /// A value does not have the shape the statement expects
    #[error("type mismatch for `{member}`: expected {expected}, found {found}")]
    TypeMismatch {
        member: String,
        expected: String,
        found: String,
    },

    /// A class name is not in the registry
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// A required JSON key is absent or null
    #[error("JSONObject[\"{0}\"] not found")]
    MissingKey(String),

    /// A default value literal cannot be evaluated
    #[error("unsupported literal `{literal}` for `{member}`")]
    UnsupportedLiteral { member: String, literal: String },

    /// The class was generated without the requested protocol method
    #[error("class `{class}` has no {method} method")]
    MissingMethod { class: String, method: &'static str },

    /// A statement appeared in a method it does not belong to
    #[error("statement not executable in {method}: {statement}")]
    UnexpectedStatement {
        method: &'static str,
        statement: String,
    },

    /// A parcel value tag is not known
    #[error("unknown value tag {0}")]
    UnknownTag(i32),

    /// A parcel string is not valid UTF-8
    #[error("invalid UTF-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// Embedded JSON (serializable blobs) failed to (de)serialize
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RuntimeError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            RuntimeError::UnexpectedEof { .. } => 1,
            RuntimeError::TypeMismatch { .. } => 2,
            RuntimeError::UnknownClass(_) => 3,
            RuntimeError::MissingKey(_) => 4,
            RuntimeError::UnsupportedLiteral { .. } => 5,
            RuntimeError::MissingMethod { .. } => 6,
            RuntimeError::UnexpectedStatement { .. } => 7,
            RuntimeError::UnknownTag(_) => 8,
            RuntimeError::Json(_) => 9,
            RuntimeError::InvalidUtf8 { .. } => 10,
        }
    }

    pub(crate) fn mismatch(member: &str, expected: impl Into<String>, found: &crate::Value) -> Self {
        RuntimeError::TypeMismatch {
            member: member.to_string(),
            expected: expected.into(),
            found: found.kind_name().to_string(),
        }
    }
}
