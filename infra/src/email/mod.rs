//! Email delivery module
//!
//! This module provides verification email delivery:
//!
//! - **Resend**: Production delivery through the Resend HTTP API
//! - **Disabled**: Used when no API key is configured; codes only go to the log
//! - **Template**: Branded HTML body carrying the code and its lifetime

use async_trait::async_trait;

use fit_core::services::EmailServiceTrait;
use fit_shared::EmailConfig;

pub mod disabled;
#[cfg(feature = "resend-email")]
pub mod resend;
pub mod template;

pub use disabled::DisabledEmailService;
#[cfg(feature = "resend-email")]
pub use resend::ResendEmailService;

use crate::InfrastructureError;

/// Email sender selected from configuration
pub enum EmailDelivery {
    #[cfg(feature = "resend-email")]
    Resend(ResendEmailService),
    Disabled(DisabledEmailService),
}

#[async_trait]
impl EmailServiceTrait for EmailDelivery {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        match self {
            #[cfg(feature = "resend-email")]
            EmailDelivery::Resend(service) => service.send_verification_code(email, code).await,
            EmailDelivery::Disabled(service) => service.send_verification_code(email, code).await,
        }
    }

    fn is_enabled(&self) -> bool {
        match self {
            #[cfg(feature = "resend-email")]
            EmailDelivery::Resend(service) => service.is_enabled(),
            EmailDelivery::Disabled(service) => service.is_enabled(),
        }
    }
}

/// Create an email service based on configuration
///
/// Returns the Resend sender when an API key is configured and the
/// disabled sender otherwise.
pub fn create_email_service(config: &EmailConfig) -> Result<EmailDelivery, InfrastructureError> {
    #[cfg(feature = "resend-email")]
    if let Some(api_key) = config.api_key.clone() {
        tracing::info!("Using Resend email delivery");
        return Ok(EmailDelivery::Resend(ResendEmailService::new(
            api_key,
            config.clone(),
        )?));
    }

    tracing::warn!("RESEND_API_KEY not configured; verification emails will not be sent");
    Ok(EmailDelivery::Disabled(DisabledEmailService::new(
        config.product_name.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_without_key_is_disabled() {
        let service = create_email_service(&EmailConfig::default()).unwrap();
        assert!(matches!(service, EmailDelivery::Disabled(_)));
        assert!(!service.is_enabled());
    }

    #[cfg(feature = "resend-email")]
    #[test]
    fn test_factory_with_key_is_resend() {
        let config = EmailConfig {
            api_key: Some("re_test".to_string()),
            ..EmailConfig::default()
        };
        let service = create_email_service(&config).unwrap();
        assert!(matches!(service, EmailDelivery::Resend(_)));
        assert!(service.is_enabled());
    }
}
