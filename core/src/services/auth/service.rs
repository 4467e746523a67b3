//! Main authentication service implementation

use chrono::Utc;
use std::sync::Arc;

use fit_shared::validation::{self, mask_email, MIN_PASSWORD_LENGTH};

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{check_code_input, CallbackParams, CallbackRedirect, Issued};
use crate::domain::value_objects::callback::sanitize_next;
use crate::errors::{AuthError, DomainError, DomainResult, IdentityServiceError, ValidationError};
use crate::repositories::VerificationRepository;
use crate::services::identity::IdentityServiceTrait;
use crate::services::verification::{EmailServiceTrait, VerificationService};

use super::types::{RegisteredUser, VerifiedUser};

const IDENTITY_SERVICE: &str = "identity";

/// Authentication service coordinating the identity service and the
/// verification code workflow
pub struct AuthService<I, E, V>
where
    I: IdentityServiceTrait,
    E: EmailServiceTrait,
    V: VerificationRepository,
{
    /// External account backend
    identity_service: Arc<I>,
    /// Verification service for email code handling
    verification_service: Arc<VerificationService<E, V>>,
}

impl<I, E, V> AuthService<I, E, V>
where
    I: IdentityServiceTrait,
    E: EmailServiceTrait,
    V: VerificationRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `identity_service` - Identity service implementation
    /// * `verification_service` - Service for email verification codes
    pub fn new(
        identity_service: Arc<I>,
        verification_service: Arc<VerificationService<E, V>>,
    ) -> Self {
        Self {
            identity_service,
            verification_service,
        }
    }

    /// Register a new account and send it a verification code
    ///
    /// This method:
    /// 1. Requires admin identity credentials
    /// 2. Validates email format and password length
    /// 3. Creates the account (rejected if the email is taken)
    /// 4. Issues and stores a code; deletes the account if storing fails
    /// 5. Emails the code, reporting but never failing on delivery errors
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> DomainResult<Issued<RegisteredUser>> {
        self.require_admin()?;
        let email = validate_email(email)?;
        validate_password(password)?;

        let user = self
            .identity_service
            .create_user(&email, password)
            .await
            .map_err(|e| {
                if e == IdentityServiceError::AlreadyExists {
                    tracing::warn!(
                        email = %mask_email(&email),
                        event = "register_duplicate",
                        "Registration rejected: email already registered"
                    );
                }
                DomainError::from(e)
            })?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %user.id,
            event = "user_created",
            "Created unconfirmed account"
        );

        let issued = match self.verification_service.issue_code(user.id, &email).await {
            Ok(issued) => issued,
            Err(e) => {
                self.compensate_registration(&user.id, &email).await;
                return Err(DomainError::upstream(format!(
                    "failed to store verification code: {}",
                    e
                )));
            }
        };

        Ok(issued.map(|record| RegisteredUser {
            user_id: record.user_id,
            email: record.email,
        }))
    }

    /// Send a new code unless the current one is still active
    ///
    /// # Errors
    ///
    /// * `UserNotFound` - No account for the email
    /// * `EmailAlreadyConfirmed` - Nothing left to verify
    /// * `ActiveCodeExists` - A code is still valid; carries the minutes left
    pub async fn resend_code(&self, email: &str) -> DomainResult<Issued<VerificationRecord>> {
        self.require_admin()?;
        let email = validate_email(email)?;

        let user = self
            .identity_service
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_confirmed() {
            return Err(AuthError::EmailAlreadyConfirmed.into());
        }

        let now = Utc::now();
        if let Some(active) = self.verification_service.active_code(&email, now).await? {
            let minutes_left = active.minutes_left_at(now);
            tracing::warn!(
                email = %mask_email(&email),
                minutes_left = minutes_left,
                event = "resend_throttled",
                "Resend rejected: active code exists"
            );
            return Err(AuthError::ActiveCodeExists { minutes_left }.into());
        }

        self.verification_service.issue_code(user.id, &email).await
    }

    /// Verify a code and confirm the account it belongs to
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<VerifiedUser> {
        self.require_admin()?;
        let email = validate_email(email)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "code".to_string(),
            }
            .into());
        }
        check_code_input(code)?;

        let record = self.verification_service.verify(&email, code).await?;

        self.identity_service
            .confirm_email(record.user_id)
            .await
            .map_err(|e| match e {
                IdentityServiceError::NotFound => {
                    DomainError::Auth(AuthError::InvalidVerificationCode)
                }
                other => DomainError::from(other),
            })?;

        if !self.verification_service.mark_verified(&record).await? {
            tracing::warn!(
                email = %mask_email(&email),
                record_id = %record.id,
                event = "otp_mark_skipped",
                "Verification record was replaced before it could be marked"
            );
        }

        tracing::info!(
            email = %mask_email(&email),
            user_id = %record.user_id,
            event = "email_confirmed",
            "Account email confirmed"
        );

        Ok(VerifiedUser {
            user_id: record.user_id,
            email,
        })
    }

    /// Ask the identity service to email a passwordless sign-in code
    ///
    /// Returns the normalised email the code was sent to.
    pub async fn send_login_code(&self, email: &str) -> DomainResult<String> {
        if !self.identity_service.has_public_access() {
            tracing::error!(event = "config_missing", "Public identity credentials are not configured");
            return Err(DomainError::configuration(IDENTITY_SERVICE));
        }
        let email = validate_email(email)?;

        self.identity_service
            .send_login_code(&email)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "login_code_failed",
                    "Failed to send login code"
                );
                DomainError::from(e)
            })?;

        tracing::info!(
            email = %mask_email(&email),
            event = "login_code_sent",
            "Passwordless login code sent"
        );
        Ok(email)
    }

    /// Resolve a confirmation-link callback into a redirect target
    pub async fn confirm_callback(&self, params: &CallbackParams) -> CallbackRedirect {
        if let Some(code) = params.code() {
            return match self
                .identity_service
                .exchange_code_for_session(code, params.code_verifier())
                .await
            {
                Ok(()) if params.is_email_confirmation() => CallbackRedirect::Confirmed,
                Ok(()) => CallbackRedirect::Next(sanitize_next(params.next.as_deref())),
                Err(e) => {
                    tracing::warn!(error = %e, event = "callback_exchange_failed", "Code exchange failed");
                    CallbackRedirect::ConfirmationFailed
                }
            };
        }

        if let (Some(token_hash), Some(kind)) = (params.token_hash(), params.kind()) {
            return match self.identity_service.verify_token_hash(token_hash, kind).await {
                Ok(()) => CallbackRedirect::Confirmed,
                Err(e) => {
                    tracing::warn!(error = %e, event = "callback_verify_failed", "Token hash verification failed");
                    CallbackRedirect::ConfirmationFailed
                }
            };
        }

        CallbackRedirect::Login
    }

    fn require_admin(&self) -> DomainResult<()> {
        if self.identity_service.has_admin_access() {
            Ok(())
        } else {
            tracing::error!(event = "config_missing", "Admin identity credentials are not configured");
            Err(DomainError::configuration(IDENTITY_SERVICE))
        }
    }

    async fn compensate_registration(&self, user_id: &uuid::Uuid, email: &str) {
        match self.identity_service.delete_user(*user_id).await {
            Ok(()) => tracing::warn!(
                email = %mask_email(email),
                user_id = %user_id,
                event = "register_rolled_back",
                "Deleted account after verification store failure"
            ),
            Err(e) => tracing::error!(
                email = %mask_email(email),
                user_id = %user_id,
                error = %e,
                event = "register_rollback_failed",
                "Failed to delete account after verification store failure"
            ),
        }
    }
}

/// Trim, require, normalise and format-check an email
fn validate_email(raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }
    let email = validation::normalize_email(raw);
    if !validation::is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "password".to_string(),
        });
    }
    if !validation::is_valid_password(password) {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}
