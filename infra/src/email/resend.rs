//! Resend email service implementation
//!
//! Sends verification emails through the Resend HTTP API. A single attempt
//! is made per code; failures are returned to the caller, which reports
//! them without failing the request.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use fit_core::services::EmailServiceTrait;
use fit_shared::validation::mask_email;
use fit_shared::EmailConfig;

use super::template::{verification_html, verification_subject};
use crate::InfrastructureError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
pub(crate) struct SendEmailBody<'a> {
    pub from: &'a str,
    pub to: Vec<&'a str>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Resend email service
pub struct ResendEmailService {
    client: Client,
    api_key: String,
    config: EmailConfig,
}

impl ResendEmailService {
    /// Create a new Resend email service
    pub fn new(api_key: String, config: EmailConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        info!("Resend email service initialized with sender: {}", config.from);

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    pub(crate) fn build_body<'a>(&'a self, email: &'a str, code: &str) -> SendEmailBody<'a> {
        SendEmailBody {
            from: &self.config.from,
            to: vec![email],
            subject: verification_subject(&self.config.product_name),
            html: verification_html(&self.config.product_name, code, Utc::now().year()),
        }
    }

    async fn send(&self, email: &str, code: &str) -> Result<String, InfrastructureError> {
        let body = self.build_body(email, code);

        debug!(email = %mask_email(email), "Sending verification email");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Email(format!(
                "Resend send failed (status={}): {}",
                status, text
            )));
        }

        let sent: SendEmailResponse = response.json().await?;
        Ok(sent.id)
    }
}

#[async_trait]
impl EmailServiceTrait for ResendEmailService {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        self.send(email, code).await.map_err(|e| {
            error!(email = %mask_email(email), error = %e, "Failed to send verification email");
            e.to_string()
        })
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
