//! Outbound email configuration

use serde::{Deserialize, Serialize};

use super::env_non_empty;

/// Email provider settings. Without an API key outbound email is disabled
/// and codes are only written to the log.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider API key (`RESEND_API_KEY`)
    pub api_key: Option<String>,

    /// Sender, e.g. `FitAI Pro <onboarding@resend.dev>`
    pub from: String,

    /// Provider endpoint for sending a single email
    pub api_url: String,

    /// Product name shown in the message
    pub product_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from: String::from("FitAI Pro <onboarding@resend.dev>"),
            api_url: String::from("https://api.resend.com/emails"),
            product_name: String::from("FitAI Pro"),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_non_empty("RESEND_API_KEY"),
            from: env_non_empty("EMAIL_FROM").unwrap_or(defaults.from),
            api_url: env_non_empty("EMAIL_API_URL").unwrap_or(defaults.api_url),
            product_name: env_non_empty("EMAIL_PRODUCT_NAME").unwrap_or(defaults.product_name),
        }
    }

    /// Whether outbound email is enabled
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}
