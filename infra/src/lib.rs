//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the FitAI Pro backend,
//! following Clean Architecture principles. It provides concrete
//! implementations of the ports defined in `fit_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: PostgreSQL verification store using SQLx
//! - **Identity**: HTTP client for the external identity service
//! - **Email**: Verification email delivery through the Resend API
//!
//! ## Features
//!
//! - `postgres`: Enable the PostgreSQL store (default)
//! - `resend-email`: Enable Resend email delivery (default)

/// Database module - PostgreSQL implementations using SQLx
#[cfg(feature = "postgres")]
pub mod database;

/// Email delivery module
pub mod email;

/// Identity service HTTP client
pub mod identity;

#[cfg(feature = "postgres")]
pub use database::{DatabasePool, PostgresVerificationRepository};
pub use email::{create_email_service, DisabledEmailService, EmailDelivery};
pub use identity::HttpIdentityService;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),
}
