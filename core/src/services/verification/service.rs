//! Main verification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use fit_shared::validation::mask_email;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{Issued, NotificationOutcome};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::VerificationRepository;

use super::config::VerificationServiceConfig;
use super::traits::EmailServiceTrait;

/// Verification service for issuing and checking email codes
pub struct VerificationService<E: EmailServiceTrait, V: VerificationRepository> {
    /// Email service for delivering codes
    email_service: Arc<E>,
    /// Store for verification records
    repository: Arc<V>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<E: EmailServiceTrait, V: VerificationRepository> VerificationService<E, V> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `email_service` - Email service implementation
    /// * `repository` - Verification store implementation
    /// * `config` - Service configuration
    pub fn new(email_service: Arc<E>, repository: Arc<V>, config: VerificationServiceConfig) -> Self {
        Self {
            email_service,
            repository,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a fresh code for an account and email it
    ///
    /// The new record replaces any previous record for the email. Storage
    /// failures are returned; delivery failures are only reported in the
    /// notification outcome.
    pub async fn issue_code(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> DomainResult<Issued<VerificationRecord>> {
        let record = VerificationRecord::issued_at(
            user_id,
            email.to_string(),
            Utc::now(),
            self.config.code_expiration_minutes,
        );

        let stored = self.repository.upsert(record).await.map_err(|e| {
            tracing::error!(
                email = %mask_email(email),
                error = %e,
                event = "otp_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        tracing::info!(
            email = %mask_email(email),
            event = "otp_generated",
            record_id = %stored.id,
            expires_at = %stored.expires_at,
            "Issued new verification code"
        );

        let notification = self.dispatch(&stored).await;
        Ok(Issued::new(stored, notification))
    }

    /// The unverified, unexpired record for an email, if any
    pub async fn active_code(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        let latest = self.repository.find_latest_unverified(email).await?;
        Ok(latest.filter(|record| record.is_active_at(now)))
    }

    /// Check a submitted code against the newest unverified record
    ///
    /// Unknown email, missing record, expiry and mismatch all produce the
    /// same `InvalidVerificationCode` error.
    pub async fn verify(&self, email: &str, code: &str) -> DomainResult<VerificationRecord> {
        let now = Utc::now();
        let candidate = self.repository.find_latest_unverified(email).await?;

        match candidate {
            Some(record) if record.is_active_at(now) && record.matches(code) => {
                tracing::info!(
                    email = %mask_email(email),
                    event = "otp_verified",
                    record_id = %record.id,
                    "Verification code accepted"
                );
                Ok(record)
            }
            other => {
                let reason = match &other {
                    None => "no_record",
                    Some(record) if record.is_expired_at(now) => "expired",
                    Some(_) => "mismatch",
                };
                tracing::warn!(
                    email = %mask_email(email),
                    event = "otp_rejected",
                    reason = reason,
                    "Verification code rejected"
                );
                Err(AuthError::InvalidVerificationCode.into())
            }
        }
    }

    /// Flip the record to verified
    ///
    /// Returns false when the record was already replaced or verified.
    pub async fn mark_verified(&self, record: &VerificationRecord) -> DomainResult<bool> {
        self.repository.mark_verified(record.id).await
    }

    async fn dispatch(&self, record: &VerificationRecord) -> NotificationOutcome {
        let masked = mask_email(&record.email);

        match self
            .email_service
            .send_verification_code(&record.email, &record.otp_code)
            .await
        {
            Ok(_) if !self.email_service.is_enabled() => NotificationOutcome::Disabled,
            Ok(message_id) => {
                tracing::info!(
                    email = %masked,
                    message_id = %message_id,
                    event = "otp_email_sent",
                    "Verification email sent"
                );
                NotificationOutcome::Sent { message_id }
            }
            Err(reason) => {
                tracing::warn!(
                    email = %masked,
                    error = %reason,
                    event = "otp_email_failed",
                    "Failed to send verification email"
                );
                NotificationOutcome::Failed { reason }
            }
        }
    }
}
