//! Error types for check constraints.

use thiserror::Error;

/// The main error type for building, validating and rendering checks.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A check was built from an empty set of lookups.
    #[error("No lookup conditions supplied")]
    NoArguments,

    /// Malformed lookup key, bad case-fold token, or a value whose shape
    /// does not fit its operator.
    #[error("Invalid syntax: {0}")]
    Syntax(String),

    /// The operator suffix is not in the lookup table.
    #[error("Lookup '{0}' not found in lookup table")]
    LookupNotFound(String),

    /// A referenced field is not part of the model.
    #[error(
        "Field '{field}' not found{}",
        .suggestion.as_ref().map(|s| format!(". Did you mean '{}'?", s)).unwrap_or_default()
    )]
    NonExistentField {
        field: String,
        suggestion: Option<String>,
    },

    /// The target engine has no check constraint support here.
    #[error("Database engine '{0}' does not support check constraints")]
    UnsupportedEngine(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    /// Create a syntax error.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Create a missing field error with an optional suggestion.
    pub fn missing_field(field: impl Into<String>, suggestion: Option<String>) -> Self {
        Self::NonExistentField {
            field: field.into(),
            suggestion,
        }
    }
}

/// Result type alias for check constraint operations.
pub type CheckResult<T> = Result<T, CheckError>;
