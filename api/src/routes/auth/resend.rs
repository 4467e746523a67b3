use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use fit_core::domain::value_objects::NotificationOutcome;
use fit_core::repositories::VerificationRepository;
use fit_core::services::{EmailServiceTrait, IdentityServiceTrait};
use fit_shared::validation::mask_email;

use super::AppState;
use crate::dto::auth::{ResendRequest, ResendResponse};
use crate::handlers::{
    handle_domain_error_with_lang, language_from_request, request_id, validation_error_response,
};
use crate::i18n::get_message;

/// Handler for POST /api/auth/resend
///
/// Sends a fresh verification code unless the previous one is still active.
///
/// ## Errors
/// - 400: Invalid email or account already confirmed
/// - 404: No account for the email
/// - 429: A code is still active; the body carries `minutesLeft`
/// - 500/503: Upstream failure or missing configuration
pub async fn resend<I, E, V>(
    req: HttpRequest,
    state: web::Data<AppState<I, E, V>>,
    request: web::Json<ResendRequest>,
) -> HttpResponse
where
    I: IdentityServiceTrait + 'static,
    E: EmailServiceTrait + 'static,
    V: VerificationRepository + 'static,
{
    let request_id = request_id(&req);
    let lang = language_from_request(&req);

    log::info!(
        "[{}] Processing resend request for email: {}",
        request_id,
        mask_email(&request.email)
    );

    if let Err(validation_errors) = request.validate() {
        log::warn!("[{}] Validation failed for resend request: {:?}", request_id, validation_errors);
        return validation_error_response(&validation_errors, lang);
    }

    match state.auth_service.resend_code(&request.email).await {
        Ok(issued) => {
            if let NotificationOutcome::Failed { reason } = &issued.notification {
                log::warn!("[{}] Code stored but email failed: {}", request_id, reason);
            }

            HttpResponse::Ok().json(ResendResponse {
                success: true,
                message: get_message("code_resent", lang),
            })
        }
        Err(error) => {
            log::warn!("[{}] Resend request failed: {}", request_id, error);
            handle_domain_error_with_lang(error, lang)
        }
    }
}
