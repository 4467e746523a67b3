//! Integration tests for the full account confirmation flow

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fit_core::domain::value_objects::{
        AuthFlowEvent, AuthFlowState, SignInFailure,
    };
    use fit_core::errors::{AuthError, DomainError};
    use fit_core::repositories::MockVerificationRepository;
    use fit_core::services::{
        AuthService, MockEmailService, MockIdentityService, VerificationService,
        VerificationServiceConfig,
    };

    const EMAIL: &str = "athlete@example.com";

    fn build() -> (
        Arc<MockIdentityService>,
        Arc<MockEmailService>,
        Arc<MockVerificationRepository>,
        AuthService<MockIdentityService, MockEmailService, MockVerificationRepository>,
    ) {
        let identity = Arc::new(MockIdentityService::new());
        let email = Arc::new(MockEmailService::new(false));
        let repo = Arc::new(MockVerificationRepository::new());
        let verification = Arc::new(VerificationService::new(
            email.clone(),
            repo.clone(),
            VerificationServiceConfig::default(),
        ));
        let auth = AuthService::new(identity.clone(), verification);
        (identity, email, repo, auth)
    }

    #[tokio::test]
    async fn test_register_resend_verify() {
        let (identity, email, repo, auth) = build();

        let registered = auth.register(EMAIL, "hunter22").await.unwrap();
        assert_eq!(registered.value.email, EMAIL);

        // Immediate resend is throttled with the minutes left on the code
        match auth.resend_code(EMAIL).await {
            Err(DomainError::Auth(AuthError::ActiveCodeExists { minutes_left })) => {
                assert_eq!(minutes_left, 10);
            }
            other => panic!("expected throttle, got {:?}", other),
        }
        assert_eq!(repo.count().await, 1);

        let code = email.last_code(EMAIL).unwrap();
        let verified = auth.verify_code(EMAIL, &code).await.unwrap();
        assert_eq!(verified.user_id, registered.value.user_id);
        assert!(identity.user(EMAIL).unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn test_form_flow_follows_service_results() {
        let (_, email, _, auth) = build();

        // Sign up, then land on the code form
        let state = AuthFlowState::SignIn
            .transition(AuthFlowEvent::Toggle)
            .unwrap();
        let registered = auth.register(EMAIL, "hunter22").await.unwrap();
        let state = state
            .transition(AuthFlowEvent::SignUpSucceeded {
                email: registered.value.email.clone(),
            })
            .unwrap();
        assert_eq!(state.pending_email(), Some(EMAIL));

        // Leaving and signing in again with an unconfirmed email returns to the form
        let state = state.transition(AuthFlowEvent::Toggle).unwrap();
        let state = state
            .transition(AuthFlowEvent::SignInFailed {
                email: EMAIL.to_string(),
                reason: SignInFailure::classify("Email not confirmed"),
            })
            .unwrap();

        let code = email.last_code(EMAIL).unwrap();
        auth.verify_code(EMAIL, &code).await.unwrap();
        let state = state.transition(AuthFlowEvent::CodeVerified).unwrap();
        assert_eq!(
            state,
            AuthFlowState::Authenticated {
                redirect_to: "/".to_string()
            }
        );
    }
}
