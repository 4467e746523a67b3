//! Error types for authentication, validation and the identity service
//!
//! Messages here are for logs. User-facing, localised text is chosen in the
//! presentation layer from the variant.

use thiserror::Error;

/// Authentication-flow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already confirmed")]
    EmailAlreadyConfirmed,

    #[error("Active verification code exists: {minutes_left} minutes left")]
    ActiveCodeExists { minutes_left: i64 },

    #[error("Invalid verification code")]
    InvalidVerificationCode,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password too short (min: {min})")]
    PasswordTooShort { min: usize },

    #[error("Invalid code format (expected {expected_length} digits)")]
    InvalidCodeFormat { expected_length: usize },
}

/// Errors reported by an identity service implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityServiceError {
    #[error("Identity service not configured")]
    NotConfigured,

    #[error("An account with this email already exists")]
    AlreadyExists,

    #[error("Account not found")]
    NotFound,

    #[error("Identity service rejected the request: {0}")]
    Rejected(String),

    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}
