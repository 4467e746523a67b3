//! Unit tests for the registration, resend and verification flows

use chrono::{Duration, Utc};

use crate::domain::entities::{VerificationRecord, CODE_LENGTH};
use crate::domain::value_objects::NotificationOutcome;
use crate::errors::{AuthError, DomainError, ValidationError};

use super::{harness, harness_with};
use crate::services::identity::MockIdentityService;

const EMAIL: &str = "runner@example.com";
const PASSWORD: &str = "secret1";

#[tokio::test]
async fn test_register_creates_account_and_record() {
    let h = harness();

    let issued = h.service.register(EMAIL, PASSWORD).await.unwrap();

    let user = h.identity.user(EMAIL).unwrap();
    assert_eq!(issued.value.user_id, user.id);
    assert_eq!(issued.value.email, EMAIL);
    assert!(!user.is_confirmed());
    assert!(issued.notification.is_sent());

    let record = h.repo.get(EMAIL).await.unwrap();
    assert_eq!(record.user_id, user.id);
    assert_eq!(record.otp_code.len(), CODE_LENGTH);
    assert!(!record.verified);
    assert_eq!(record.expires_at - record.created_at, Duration::minutes(10));
    assert_eq!(h.email.last_code(EMAIL), Some(record.otp_code));
}

#[tokio::test]
async fn test_register_normalises_email() {
    let h = harness();
    let issued = h.service.register("  Runner@Example.COM ", PASSWORD).await.unwrap();
    assert_eq!(issued.value.email, EMAIL);
    assert!(h.repo.get(EMAIL).await.is_some());
}

#[tokio::test]
async fn test_register_duplicate_email_writes_nothing() {
    let h = harness();
    h.identity.insert_user(EMAIL, false);

    let result = h.service.register(EMAIL, PASSWORD).await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::EmailAlreadyRegistered)
    );
    assert_eq!(h.repo.count().await, 0);
    assert_eq!(h.email.sent_count(EMAIL), 0);
}

#[tokio::test]
async fn test_register_validation_happens_before_identity_calls() {
    let h = harness();

    let cases = [
        ("", PASSWORD),
        ("not-an-email", PASSWORD),
        ("a@b", PASSWORD),
        (EMAIL, ""),
        (EMAIL, "12345"),
    ];
    for (email, password) in cases {
        let err = h.service.register(email, password).await.unwrap_err();
        assert!(
            matches!(err, DomainError::ValidationErr(_)),
            "expected validation error for {:?}/{:?}, got {:?}",
            email,
            password,
            err
        );
    }
    assert_eq!(h.identity.call_count(), 0);
}

#[tokio::test]
async fn test_register_password_boundary() {
    let h = harness();

    let short = h.service.register(EMAIL, "abc12").await.unwrap_err();
    assert_eq!(
        short,
        DomainError::ValidationErr(ValidationError::PasswordTooShort { min: 6 })
    );

    assert!(h.service.register(EMAIL, "abc123").await.is_ok());
}

#[tokio::test]
async fn test_register_missing_admin_config() {
    let h = harness_with(MockIdentityService::with_access(false, true));
    let err = h.service.register(EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(err, DomainError::configuration("identity"));
}

#[tokio::test]
async fn test_register_store_failure_deletes_account() {
    let h = harness();
    h.repo.fail_writes(true);

    let err = h.service.register(EMAIL, PASSWORD).await.unwrap_err();

    assert!(matches!(err, DomainError::Upstream { .. }));
    assert!(h.identity.user(EMAIL).is_none());
    assert_eq!(h.email.sent_count(EMAIL), 0);
}

#[tokio::test]
async fn test_register_email_failure_still_succeeds() {
    let h = harness();
    h.email.set_should_fail(true);

    let issued = h.service.register(EMAIL, PASSWORD).await.unwrap();

    assert!(matches!(issued.notification, NotificationOutcome::Failed { .. }));
    assert!(h.repo.get(EMAIL).await.is_some());
}

#[tokio::test]
async fn test_resend_while_active_is_throttled() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD).await.unwrap();
    let before = h.repo.get(EMAIL).await.unwrap();

    let err = h.service.resend_code(EMAIL).await.unwrap_err();

    match err {
        DomainError::Auth(AuthError::ActiveCodeExists { minutes_left }) => {
            assert!((1..=10).contains(&minutes_left));
        }
        other => panic!("expected throttle error, got {:?}", other),
    }
    assert_eq!(h.repo.get(EMAIL).await.unwrap(), before);
    assert_eq!(h.email.sent_count(EMAIL), 1);
}

#[tokio::test]
async fn test_resend_after_expiry_issues_new_record() {
    let h = harness();
    let user = h.identity.insert_user(EMAIL, false);
    let expired = VerificationRecord::issued_at(
        user.id,
        EMAIL.to_string(),
        Utc::now() - Duration::minutes(11),
        10,
    );
    h.repo.seed(expired.clone()).await;

    let issued = h.service.resend_code(EMAIL).await.unwrap();

    assert_ne!(issued.value.id, expired.id);
    assert!(issued.value.expires_at > Utc::now() + Duration::minutes(9));
    assert!(!issued.value.verified);
    assert_eq!(h.repo.count().await, 1);
    assert_eq!(h.repo.get(EMAIL).await.unwrap().id, issued.value.id);
}

#[tokio::test]
async fn test_resend_unknown_email() {
    let h = harness();
    let err = h.service.resend_code("ghost@example.com").await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::UserNotFound));
}

#[tokio::test]
async fn test_resend_confirmed_account() {
    let h = harness();
    h.identity.insert_user(EMAIL, true);
    let err = h.service.resend_code(EMAIL).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::EmailAlreadyConfirmed));
}

#[tokio::test]
async fn test_resend_malformed_email() {
    let h = harness();
    let err = h.service.resend_code("nope").await.unwrap_err();
    assert_eq!(err, DomainError::ValidationErr(ValidationError::InvalidEmail));
    assert_eq!(h.identity.call_count(), 0);
}

#[tokio::test]
async fn test_verify_confirms_account_and_marks_record() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD).await.unwrap();
    let code = h.email.last_code(EMAIL).unwrap();

    let verified = h.service.verify_code(EMAIL, &code).await.unwrap();

    assert_eq!(verified.email, EMAIL);
    assert!(h.identity.user(EMAIL).unwrap().is_confirmed());
    assert!(h.repo.get(EMAIL).await.unwrap().verified);

    // Once confirmed, resend is refused
    let err = h.service.resend_code(EMAIL).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::EmailAlreadyConfirmed));
}

#[tokio::test]
async fn test_verify_wrong_code_is_generic() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD).await.unwrap();
    let code = h.email.last_code(EMAIL).unwrap();
    let wrong = if code == "9999" { "1000" } else { "9999" };

    let err = h.service.verify_code(EMAIL, wrong).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InvalidVerificationCode));

    let unknown = h
        .service
        .verify_code("ghost@example.com", "1234")
        .await
        .unwrap_err();
    assert_eq!(unknown, err);
    assert!(!h.identity.user(EMAIL).unwrap().is_confirmed());
}

#[tokio::test]
async fn test_verify_rejects_bad_code_format() {
    let h = harness();
    for code in ["123", "12345", "12a4"] {
        let err = h.service.verify_code(EMAIL, code).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::ValidationErr(ValidationError::InvalidCodeFormat { expected_length: 4 })
        );
    }
    let missing = h.service.verify_code(EMAIL, "").await.unwrap_err();
    assert!(matches!(
        missing,
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
}

#[tokio::test]
async fn test_send_login_code() {
    let h = harness();
    let email = h.service.send_login_code(" Runner@Example.com").await.unwrap();
    assert_eq!(email, EMAIL);
    assert_eq!(h.identity.login_codes_sent(), vec![EMAIL.to_string()]);
}

#[tokio::test]
async fn test_send_login_code_malformed_email_skips_identity() {
    let h = harness();
    let err = h.service.send_login_code("bad-email").await.unwrap_err();
    assert_eq!(err, DomainError::ValidationErr(ValidationError::InvalidEmail));
    assert_eq!(h.identity.call_count(), 0);
}

#[tokio::test]
async fn test_send_login_code_missing_public_config() {
    let h = harness_with(MockIdentityService::with_access(true, false));
    let err = h.service.send_login_code(EMAIL).await.unwrap_err();
    assert_eq!(err, DomainError::configuration("identity"));
}

#[tokio::test]
async fn test_send_login_code_upstream_failure() {
    let h = harness();
    h.identity.set_unavailable(true);
    let err = h.service.send_login_code(EMAIL).await.unwrap_err();
    assert!(matches!(err, DomainError::Upstream { .. }));
}
