//! Domain entities representing core business objects.

pub mod identity_user;
pub mod verification_record;


// Re-export commonly used types
pub use identity_user::IdentityUser;
pub use verification_record::{
    generate_code, VerificationRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
};
