mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::json;

use common::{TestContext, EMAIL};
use fit_api::app::create_app;
use fit_core::domain::entities::VerificationRecord;
use fit_shared::config::AppConfig;

fn seed_record(ctx: &TestContext, issued_minutes_ago: i64) -> VerificationRecord {
    let user = ctx.identity.insert_user(EMAIL, false);
    VerificationRecord::issued_at(
        user.id,
        EMAIL.to_string(),
        Utc::now() - Duration::minutes(issued_minutes_ago),
        10,
    )
}

#[actix_web::test]
async fn test_verify_confirms_account() {
    let ctx = TestContext::new();
    let record = seed_record(&ctx, 1);
    ctx.repo.seed(record.clone()).await;
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/verify")
        .set_json(json!({ "email": EMAIL, "code": record.otp_code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["email"], EMAIL);

    assert!(ctx.identity.user(EMAIL).unwrap().is_confirmed());
    assert!(ctx.repo.get(EMAIL).await.unwrap().verified);
}

#[actix_web::test]
async fn test_verify_failures_share_one_response() {
    let ctx = TestContext::new();
    let record = seed_record(&ctx, 1);
    ctx.repo.seed(record.clone()).await;
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    let wrong_code = if record.otp_code == "1234" { "4321" } else { "1234" };
    let attempts = vec![
        json!({ "email": EMAIL, "code": wrong_code }),
        json!({ "email": "stranger@example.com", "code": record.otp_code }),
    ];

    let mut bodies = Vec::new();
    for attempt in attempts {
        let req = test::TestRequest::post()
            .uri("/api/auth/verify")
            .set_json(attempt)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        bodies.push((body["code"].clone(), body["error"].clone()));
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0].0, "invalid_verification_code");
    assert!(!ctx.identity.user(EMAIL).unwrap().is_confirmed());
}

#[actix_web::test]
async fn test_verify_expired_code_is_rejected() {
    let ctx = TestContext::new();
    let record = seed_record(&ctx, 11);
    ctx.repo.seed(record.clone()).await;
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/verify")
        .set_json(json!({ "email": EMAIL, "code": record.otp_code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "invalid_verification_code");
}

#[actix_web::test]
async fn test_verify_rejects_malformed_code() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    for code in ["12a4", "123", "12345"] {
        let req = test::TestRequest::post()
            .uri("/api/auth/verify")
            .set_json(json!({ "email": EMAIL, "code": code }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "code {}", code);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_code_format");
    }
    assert_eq!(ctx.identity.call_count(), 0);
}

#[actix_web::test]
async fn test_verified_code_cannot_be_reused() {
    let ctx = TestContext::new();
    let record = seed_record(&ctx, 1);
    ctx.repo.seed(record.clone()).await;
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
        let req = test::TestRequest::post()
            .uri("/api/auth/verify")
            .set_json(json!({ "email": EMAIL, "code": record.otp_code }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}
