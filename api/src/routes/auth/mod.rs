//! Authentication route handlers
//!
//! This module contains the email verification endpoints:
//! - Registration with an emailed verification code
//! - Resending and verifying that code
//! - Passwordless login codes
//! - The confirmation-link callback

pub mod callback;
pub mod login;
pub mod register;
pub mod resend;
pub mod verify;

use std::sync::Arc;

use fit_core::repositories::VerificationRepository;
use fit_core::services::{AuthService, EmailServiceTrait, IdentityServiceTrait};

/// Application state that holds shared services
pub struct AppState<I, E, V>
where
    I: IdentityServiceTrait,
    E: EmailServiceTrait,
    V: VerificationRepository,
{
    pub auth_service: Arc<AuthService<I, E, V>>,
}

impl<I, E, V> AppState<I, E, V>
where
    I: IdentityServiceTrait,
    E: EmailServiceTrait,
    V: VerificationRepository,
{
    pub fn new(auth_service: Arc<AuthService<I, E, V>>) -> Self {
        Self { auth_service }
    }
}
