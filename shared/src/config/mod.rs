//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging defaults
//! - `server` - HTTP server and CORS configuration
//! - `database` - Verification store connection pool
//! - `identity` - External identity service endpoint and keys
//! - `email` - Outbound email provider
//! - `cleanup` - Expired verification record cleanup

pub mod cleanup;
pub mod database;
pub mod email;
pub mod environment;
pub mod identity;
pub mod server;

use serde::{Deserialize, Serialize};

pub use cleanup::CleanupConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LoggingConfig};
pub use identity::IdentityConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Identity service configuration
    pub identity: IdentityConfig,

    /// Email provider configuration
    pub email: EmailConfig,

    /// Verification record cleanup
    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            identity: IdentityConfig::default(),
            email: EmailConfig::default(),
            cleanup: CleanupConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Missing identity or email credentials are not an error here; they
    /// surface per request as "service unavailable" or a disabled mailer.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            identity: IdentityConfig::from_env(),
            email: EmailConfig::from_env(),
            cleanup: CleanupConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

/// Read a trimmed, non-empty environment variable
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable, falling back to `default`
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_non_empty(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
