//! Shared fixtures for the API integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use fit_api::routes::auth::AppState;
use fit_core::repositories::MockVerificationRepository;
use fit_core::services::{
    AuthService, MockEmailService, MockIdentityService, VerificationService,
    VerificationServiceConfig,
};

pub const EMAIL: &str = "athlete@example.com";
pub const PASSWORD: &str = "secret1";

pub type TestState = AppState<MockIdentityService, MockEmailService, MockVerificationRepository>;

/// Mock-backed application state plus handles to inspect the mocks
pub struct TestContext {
    pub identity: Arc<MockIdentityService>,
    pub email: Arc<MockEmailService>,
    pub repo: Arc<MockVerificationRepository>,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_identity(MockIdentityService::new())
    }

    pub fn with_identity(identity: MockIdentityService) -> Self {
        let identity = Arc::new(identity);
        let email = Arc::new(MockEmailService::new(false));
        let repo = Arc::new(MockVerificationRepository::new());
        let verification = Arc::new(VerificationService::new(
            email.clone(),
            repo.clone(),
            VerificationServiceConfig::default(),
        ));
        let auth_service = Arc::new(AuthService::new(identity.clone(), verification));

        Self {
            identity,
            email,
            repo,
            state: web::Data::new(AppState::new(auth_service)),
        }
    }
}
