use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use fit_core::repositories::VerificationRepository;
use fit_core::services::{EmailServiceTrait, IdentityServiceTrait};
use fit_shared::validation::mask_email;

use super::AppState;
use crate::dto::auth::{VerifyRequest, VerifyResponse};
use crate::handlers::{
    handle_domain_error_with_lang, language_from_request, request_id, validation_error_response,
};
use crate::i18n::get_message;

/// Handler for POST /api/auth/verify
///
/// Confirms the account when the code matches the active record. Every
/// mismatch, expiry or unknown email produces the same 400 response.
pub async fn verify<I, E, V>(
    req: HttpRequest,
    state: web::Data<AppState<I, E, V>>,
    request: web::Json<VerifyRequest>,
) -> HttpResponse
where
    I: IdentityServiceTrait + 'static,
    E: EmailServiceTrait + 'static,
    V: VerificationRepository + 'static,
{
    let request_id = request_id(&req);
    let lang = language_from_request(&req);

    log::info!(
        "[{}] Processing verify request for email: {}",
        request_id,
        mask_email(&request.email)
    );

    if let Err(validation_errors) = request.validate() {
        log::warn!("[{}] Validation failed for verify request: {:?}", request_id, validation_errors);
        return validation_error_response(&validation_errors, lang);
    }

    match state
        .auth_service
        .verify_code(&request.email, &request.code)
        .await
    {
        Ok(verified) => {
            log::info!(
                "[{}] Email confirmed for user {} ({})",
                request_id,
                verified.user_id,
                mask_email(&verified.email)
            );

            HttpResponse::Ok().json(VerifyResponse {
                success: true,
                message: get_message("email_verified", lang),
                email: verified.email,
            })
        }
        Err(error) => {
            log::warn!("[{}] Verify request failed: {}", request_id, error);
            handle_domain_error_with_lang(error, lang)
        }
    }
}
