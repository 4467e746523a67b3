mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{TestContext, EMAIL};
use fit_api::app::create_app;
use fit_core::services::MockIdentityService;
use fit_shared::config::AppConfig;

#[actix_web::test]
async fn test_login_sends_code() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "Athlete@Example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["email"], EMAIL);
    assert_eq!(ctx.identity.login_codes_sent(), vec![EMAIL.to_string()]);
}

#[actix_web::test]
async fn test_login_malformed_email_never_reaches_identity_service() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    for payload in [json!({ "email": "bad@" }), json!({})] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(ctx.identity.call_count(), 0);
}

#[actix_web::test]
async fn test_login_without_public_credentials_is_unavailable() {
    let ctx = TestContext::with_identity(MockIdentityService::with_access(true, false));
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_login_upstream_failure_is_generic() {
    let ctx = TestContext::new();
    ctx.identity.set_unavailable(true);
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "internal_error");
}
