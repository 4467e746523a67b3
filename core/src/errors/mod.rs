//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, IdentityServiceError, ValidationError};

use thiserror::Error;

/// Core domain errors
///
/// Each variant corresponds to one class of HTTP outcome in the API layer:
/// configuration (503), validation and conflicts (400), not found (404),
/// throttling (429) and upstream/internal failures (500).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Service not configured: {service}")]
    Configuration { service: String },

    #[error("Upstream service failure: {message}")]
    Upstream { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Missing credentials for an external service
    pub fn configuration(service: impl Into<String>) -> Self {
        DomainError::Configuration {
            service: service.into(),
        }
    }

    /// Failure reported by the identity service or the database
    pub fn upstream(message: impl Into<String>) -> Self {
        DomainError::Upstream {
            message: message.into(),
        }
    }
}

impl From<IdentityServiceError> for DomainError {
    fn from(error: IdentityServiceError) -> Self {
        match error {
            IdentityServiceError::NotConfigured => DomainError::configuration("identity"),
            IdentityServiceError::AlreadyExists => {
                DomainError::Auth(AuthError::EmailAlreadyRegistered)
            }
            IdentityServiceError::NotFound => DomainError::Auth(AuthError::UserNotFound),
            IdentityServiceError::Rejected(message) | IdentityServiceError::Unavailable(message) => {
                DomainError::Upstream { message }
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
