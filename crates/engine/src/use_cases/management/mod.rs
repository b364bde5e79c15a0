//! Management use cases for CRUD-style operations.
//!
//! These use cases keep HTTP handlers thin: id checks, validation, progression
//! and the single store call all happen here.

mod player;

pub use player::PlayerCrud;

use roster_domain::{DomainError, ValidationError};

use crate::infrastructure::ports::RepoError;

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    /// Unparsable parameter or an id that can never exist.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for ManagementError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(e) => Self::Validation(e),
            DomainError::InvalidId(msg) | DomainError::Parse(msg) => Self::MalformedRequest(msg),
        }
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub player: PlayerCrud,
}

impl ManagementUseCases {
    pub fn new(player: PlayerCrud) -> Self {
        Self { player }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_split_into_bad_input_kinds() {
        let err: ManagementError = DomainError::parse("Unknown race: GNOME").into();
        assert!(matches!(err, ManagementError::MalformedRequest(_)));

        let err: ManagementError = DomainError::invalid_id("got -1").into();
        assert!(matches!(err, ManagementError::MalformedRequest(_)));

        let err: ManagementError =
            DomainError::from(ValidationError::Empty { field_name: "name" }).into();
        assert!(matches!(
            err,
            ManagementError::Validation(ValidationError::Empty { field_name: "name" })
        ));
    }
}
