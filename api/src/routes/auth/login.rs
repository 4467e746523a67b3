use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use fit_core::repositories::VerificationRepository;
use fit_core::services::{EmailServiceTrait, IdentityServiceTrait};
use fit_shared::validation::mask_email;

use super::AppState;
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::{
    handle_domain_error_with_lang, language_from_request, request_id, validation_error_response,
};
use crate::i18n::get_message;

/// Handler for POST /api/auth/login
///
/// Passwordless sign-in: the identity service emails a one-time code.
pub async fn login<I, E, V>(
    req: HttpRequest,
    state: web::Data<AppState<I, E, V>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    I: IdentityServiceTrait + 'static,
    E: EmailServiceTrait + 'static,
    V: VerificationRepository + 'static,
{
    let request_id = request_id(&req);
    let lang = language_from_request(&req);

    log::info!(
        "[{}] Processing login request for email: {}",
        request_id,
        mask_email(&request.email)
    );

    if let Err(validation_errors) = request.validate() {
        log::warn!("[{}] Validation failed for login request: {:?}", request_id, validation_errors);
        return validation_error_response(&validation_errors, lang);
    }

    match state.auth_service.send_login_code(&request.email).await {
        Ok(email) => HttpResponse::Ok().json(LoginResponse {
            success: true,
            message: get_message("login_code_sent", lang),
            email,
        }),
        Err(error) => {
            log::warn!("[{}] Login request failed: {}", request_id, error);
            handle_domain_error_with_lang(error, lang)
        }
    }
}
