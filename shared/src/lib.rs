//! Shared utilities and common types for the FitAI Pro server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelopes shared by the HTTP layer
//! - Input validators (email format, password length, code format)
//! - Language negotiation for localised messages

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CleanupConfig, CorsConfig, DatabaseConfig, EmailConfig, Environment,
    IdentityConfig, ServerConfig,
};
pub use types::{ErrorResponse, Language};
pub use utils::validation;
