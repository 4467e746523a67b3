//! Verification service module for email-based account confirmation
//!
//! This module provides the one-time-code workflow:
//! - Code generation and persistence (one record per email)
//! - Best-effort email dispatch with a reported outcome
//! - Code verification against the newest unverified record

mod config;
pub mod mock;
mod service;
mod traits;


pub use config::VerificationServiceConfig;
pub use mock::MockEmailService;
pub use service::VerificationService;
pub use traits::EmailServiceTrait;
