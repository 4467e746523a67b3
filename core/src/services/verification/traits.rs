//! Trait for email delivery integration

use async_trait::async_trait;

/// Trait for email service integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code by email, returning the provider message id
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String>;
    /// Whether a delivery provider is configured
    fn is_enabled(&self) -> bool;
}
