//! Port to the external identity service that owns user accounts
//!
//! Accounts, passwords and sessions live in the identity service. This crate
//! only creates, looks up, confirms and (on compensation) deletes accounts,
//! and forwards passwordless-login and confirmation-callback requests.

pub mod mock;
mod traits;

pub use mock::MockIdentityService;
pub use traits::IdentityServiceTrait;
