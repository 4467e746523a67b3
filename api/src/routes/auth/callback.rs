use actix_web::{http::header, web, HttpRequest, HttpResponse};

use fit_core::domain::value_objects::CallbackParams;
use fit_core::repositories::VerificationRepository;
use fit_core::services::{EmailServiceTrait, IdentityServiceTrait};

use super::AppState;
use crate::handlers::request_id;

/// Cookie holding the PKCE code verifier set by the web client
pub const CODE_VERIFIER_COOKIE: &str = "fitai-code-verifier";

/// Handler for GET /auth/callback
///
/// Always answers with a temporary redirect; malformed query strings are
/// treated like an empty one and land on the login page.
pub async fn callback<I, E, V>(
    req: HttpRequest,
    state: web::Data<AppState<I, E, V>>,
) -> HttpResponse
where
    I: IdentityServiceTrait + 'static,
    E: EmailServiceTrait + 'static,
    V: VerificationRepository + 'static,
{
    let request_id = request_id(&req);

    let mut params = web::Query::<CallbackParams>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_else(|e| {
            log::warn!("[{}] Ignoring malformed callback query: {}", request_id, e);
            CallbackParams::default()
        });
    params.code_verifier = req
        .cookie(CODE_VERIFIER_COOKIE)
        .map(|cookie| cookie.value().to_string());

    let redirect = state.auth_service.confirm_callback(&params).await;
    let location = redirect.location();

    log::info!("[{}] Confirmation callback redirecting to {}", request_id, location);

    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
}
