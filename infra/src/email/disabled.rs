//! Email sender used when no provider is configured

use async_trait::async_trait;
use tracing::warn;

use fit_core::services::EmailServiceTrait;
use fit_shared::validation::mask_email;

/// Writes the code to the log instead of sending it
///
/// Lets the registration flow be exercised locally without a provider key.
pub struct DisabledEmailService {
    product_name: String,
}

impl DisabledEmailService {
    pub fn new(product_name: String) -> Self {
        Self { product_name }
    }
}

#[async_trait]
impl EmailServiceTrait for DisabledEmailService {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        warn!(
            email = %mask_email(email),
            code = code,
            product = %self.product_name,
            event = "email_disabled",
            "Email delivery disabled; verification code not sent"
        );
        Ok(String::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
