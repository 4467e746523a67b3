//! Identity service configuration
//!
//! The identity service owns accounts and sessions. Admin operations
//! (create, delete, confirm, look up) need the service-role key; the
//! passwordless login and callback flows only need the anonymous key.

use serde::{Deserialize, Serialize};

use super::env_non_empty;

/// Connection settings for the external identity service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Base URL, e.g. `https://project.supabase.co`
    pub url: Option<String>,

    /// Public (anonymous) API key
    pub anon_key: Option<String>,

    /// Service-role API key for admin endpoints
    pub service_role_key: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            service_role_key: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl IdentityConfig {
    /// Create from environment variables
    ///
    /// `IDENTITY_*` names win; the hosted-provider names are accepted so an
    /// existing front-end `.env` can be reused as is.
    pub fn from_env() -> Self {
        Self {
            url: env_non_empty("IDENTITY_SERVICE_URL")
                .or_else(|| env_non_empty("NEXT_PUBLIC_SUPABASE_URL")),
            anon_key: env_non_empty("IDENTITY_ANON_KEY")
                .or_else(|| env_non_empty("NEXT_PUBLIC_SUPABASE_ANON_KEY")),
            service_role_key: env_non_empty("IDENTITY_SERVICE_ROLE_KEY")
                .or_else(|| env_non_empty("SUPABASE_SERVICE_ROLE_KEY")),
            request_timeout_secs: super::env_parse(
                "IDENTITY_REQUEST_TIMEOUT_SECS",
                default_request_timeout(),
            ),
        }
    }

    /// URL and service-role key are both present
    pub fn has_admin_access(&self) -> bool {
        self.url.is_some() && self.service_role_key.is_some()
    }

    /// URL and anonymous key are both present
    pub fn has_public_access(&self) -> bool {
        self.url.is_some() && self.anon_key.is_some()
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> Option<&str> {
        self.url.as_deref().map(|u| u.trim_end_matches('/'))
    }
}

fn default_request_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_levels() {
        let mut config = IdentityConfig::default();
        assert!(!config.has_admin_access());
        assert!(!config.has_public_access());

        config.url = Some("https://id.example.com/".to_string());
        config.anon_key = Some("anon".to_string());
        assert!(config.has_public_access());
        assert!(!config.has_admin_access());

        config.service_role_key = Some("service".to_string());
        assert!(config.has_admin_access());
        assert_eq!(config.base_url(), Some("https://id.example.com"));
    }
}
