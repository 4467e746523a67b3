//! Authentication service module
//!
//! This module provides the account confirmation flow:
//! - Registration with a one-time email code
//! - Code resend with a throttle while a code is still active
//! - Code verification and account confirmation
//! - Passwordless login and confirmation-link callbacks

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::AuthService;
pub use types::{RegisteredUser, VerifiedUser};
