mod service_tests;

use std::sync::Arc;

use crate::repositories::MockVerificationRepository;
use crate::services::auth::AuthService;
use crate::services::identity::MockIdentityService;
use crate::services::verification::{
    MockEmailService, VerificationService, VerificationServiceConfig,
};

type TestAuthService =
    AuthService<MockIdentityService, MockEmailService, MockVerificationRepository>;

struct Harness {
    identity: Arc<MockIdentityService>,
    email: Arc<MockEmailService>,
    repo: Arc<MockVerificationRepository>,
    service: TestAuthService,
}

fn harness_with(identity: MockIdentityService) -> Harness {
    let identity = Arc::new(identity);
    let email = Arc::new(MockEmailService::new(false));
    let repo = Arc::new(MockVerificationRepository::new());
    let verification = Arc::new(VerificationService::new(
        email.clone(),
        repo.clone(),
        VerificationServiceConfig::default(),
    ));
    let service = AuthService::new(identity.clone(), verification);
    Harness {
        identity,
        email,
        repo,
        service,
    }
}

fn harness() -> Harness {
    harness_with(MockIdentityService::new())
}
