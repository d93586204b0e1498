// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Companion ID is required")]
    MissingCompanionId,
    #[error("Companion not found: {0}")]
    CompanionNotFound(String),
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("Store unreachable: {0}")]
    Transport(String),
    #[error("Malformed store response: {0}")]
    MalformedResponse(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    /// True when the error carries a reason worth showing to the caller verbatim.
    pub fn is_descriptive(&self) -> bool {
        matches!(
            self,
            DomainError::CompanionNotFound(_) | DomainError::Remote { .. }
        )
    }
}
