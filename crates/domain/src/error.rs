//! Unified error types for the domain layer
//!
//! Provides a common error type for parsing and identity failures, plus the
//! dedicated [`ValidationError`] used by the player rules.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid ID format or value
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    /// Parse error (query parameters, enum names)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations and query parameter parsing when
    /// the input string doesn't match any known variant or format.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for Race {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "ELF" => Ok(Self::Elf),
    ///             _ => Err(DomainError::parse(format!("Unknown race: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Player rule violations.
///
/// Raised by the field validator and the length constraint checker. All
/// variants map to a client "bad request" outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field_name} is required")]
    Missing { field_name: &'static str },

    #[error("{field_name} cannot be empty")]
    Empty { field_name: &'static str },

    #[error("{field_name} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field_name: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("{field_name} exceeds maximum length of {max}")]
    TooLong { field_name: &'static str, max: usize },
}
