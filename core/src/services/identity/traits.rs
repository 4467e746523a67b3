use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::IdentityUser;
use crate::errors::IdentityServiceError;

/// Trait for identity service integration
#[async_trait]
pub trait IdentityServiceTrait: Send + Sync {
    /// Whether privileged (service-role) credentials are configured
    fn has_admin_access(&self) -> bool;

    /// Whether public (anon) credentials are configured
    fn has_public_access(&self) -> bool;

    /// Create an unconfirmed account
    ///
    /// Atomic create-or-reject: an existing account for the email yields
    /// `IdentityServiceError::AlreadyExists`.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityUser, IdentityServiceError>;

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<IdentityUser>, IdentityServiceError>;

    async fn delete_user(&self, id: Uuid) -> Result<(), IdentityServiceError>;

    /// Mark the account's email as confirmed
    async fn confirm_email(&self, id: Uuid) -> Result<(), IdentityServiceError>;

    /// Deliver a passwordless sign-in code, creating the account if absent
    async fn send_login_code(&self, email: &str) -> Result<(), IdentityServiceError>;

    /// Exchange an authorization code from a confirmation link for a session
    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<(), IdentityServiceError>;

    /// Verify a token hash from a confirmation link
    async fn verify_token_hash(
        &self,
        token_hash: &str,
        kind: &str,
    ) -> Result<(), IdentityServiceError>;
}
