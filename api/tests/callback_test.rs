mod common;

use actix_web::{
    cookie::Cookie,
    http::{header, StatusCode},
    test,
};

use common::TestContext;
use fit_api::app::create_app;
use fit_api::routes::auth::callback::CODE_VERIFIER_COOKIE;
use fit_shared::config::AppConfig;

async fn location_for(ctx: &TestContext, uri: &str) -> String {
    let app = test::init_service(create_app(ctx.state.clone(), &AppConfig::default())).await;
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(Cookie::new(CODE_VERIFIER_COOKIE, "verifier-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn test_signup_code_redirects_to_confirmed_login() {
    let ctx = TestContext::new();
    ctx.identity.accept_auth_code("abc");

    let location = location_for(&ctx, "/auth/callback?code=abc&type=signup").await;
    assert_eq!(location, "/login?confirmed=true");
}

#[actix_web::test]
async fn test_code_without_confirmation_type_follows_next() {
    let ctx = TestContext::new();
    ctx.identity.accept_auth_code("abc");

    let location = location_for(&ctx, "/auth/callback?code=abc&next=%2Fdashboard").await;
    assert_eq!(location, "/dashboard");
}

#[actix_web::test]
async fn test_external_next_falls_back_to_root() {
    let ctx = TestContext::new();
    ctx.identity.accept_auth_code("abc");

    let location = location_for(&ctx, "/auth/callback?code=abc&next=%2F%2Fevil.example").await;
    assert_eq!(location, "/");
}

#[actix_web::test]
async fn test_next_with_control_characters_falls_back_to_root() {
    let ctx = TestContext::new();

    for next in ["%2F%09%2Fevil.example", "%2Fa%0Ab", "%2F%0D%0A%2Fevil.example"] {
        ctx.identity.accept_auth_code("abc");
        let uri = format!("/auth/callback?code=abc&next={}", next);
        assert_eq!(location_for(&ctx, &uri).await, "/", "next {}", next);
    }
}

#[actix_web::test]
async fn test_rejected_code_redirects_with_error() {
    let ctx = TestContext::new();

    let location = location_for(&ctx, "/auth/callback?code=stale&type=signup").await;
    assert_eq!(location, "/login?error=confirmation_failed");
}

#[actix_web::test]
async fn test_token_hash_confirmation() {
    let ctx = TestContext::new();
    ctx.identity.accept_token_hash("hash-1");

    let location = location_for(&ctx, "/auth/callback?token_hash=hash-1&type=email").await;
    assert_eq!(location, "/login?confirmed=true");

    // Token hashes are single use
    let location = location_for(&ctx, "/auth/callback?token_hash=hash-1&type=email").await;
    assert_eq!(location, "/login?error=confirmation_failed");
}

#[actix_web::test]
async fn test_missing_parameters_redirect_to_login() {
    let ctx = TestContext::new();

    assert_eq!(location_for(&ctx, "/auth/callback").await, "/login");
    assert_eq!(location_for(&ctx, "/auth/callback?token_hash=hash-1").await, "/login");
    assert_eq!(ctx.identity.call_count(), 0);
}
