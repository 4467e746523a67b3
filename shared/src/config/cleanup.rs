//! Expired verification record cleanup configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Settings for the periodic verification record cleanup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether to run the cleanup task at all
    pub enabled: bool,

    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,

    /// Unverified records are kept this long past their expiry
    pub grace_minutes: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600,
            grace_minutes: 60,
        }
    }
}

impl CleanupConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_parse("CLEANUP_ENABLED", defaults.enabled),
            interval_seconds: env_parse("CLEANUP_INTERVAL_SECONDS", defaults.interval_seconds),
            grace_minutes: env_parse("CLEANUP_GRACE_MINUTES", defaults.grace_minutes),
        }
    }
}
