//! Business services containing domain logic and use cases.

pub mod auth;
pub mod cleanup;
pub mod identity;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, RegisteredUser, VerifiedUser};
pub use cleanup::{CleanupResult, VerificationCleanupConfig, VerificationCleanupService};
pub use identity::{IdentityServiceTrait, MockIdentityService};
pub use verification::{
    EmailServiceTrait, MockEmailService, VerificationService, VerificationServiceConfig,
};
