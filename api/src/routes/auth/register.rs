use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use fit_core::domain::value_objects::NotificationOutcome;
use fit_core::repositories::VerificationRepository;
use fit_core::services::{EmailServiceTrait, IdentityServiceTrait};
use fit_shared::validation::mask_email;

use super::AppState;
use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::{
    handle_domain_error_with_lang, language_from_request, request_id, validation_error_response,
};
use crate::i18n::get_message;

/// Handler for POST /api/auth/register
///
/// Creates an unconfirmed account and emails it a 4-digit verification code.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "athlete@example.com",
///     "password": "secret1"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "message": "Account created. Check your email for the verification code",
///     "userId": "550e8400-e29b-41d4-a716-446655440000",
///     "email": "athlete@example.com"
/// }
/// ```
///
/// ## Errors
/// - 400: Invalid email, short password or email already registered
/// - 500: Identity service or store failure
/// - 503: Identity service not configured
pub async fn register<I, E, V>(
    req: HttpRequest,
    state: web::Data<AppState<I, E, V>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    I: IdentityServiceTrait + 'static,
    E: EmailServiceTrait + 'static,
    V: VerificationRepository + 'static,
{
    let request_id = request_id(&req);
    let lang = language_from_request(&req);

    log::info!(
        "[{}] Processing register request for email: {}",
        request_id,
        mask_email(&request.email)
    );

    if let Err(validation_errors) = request.validate() {
        log::warn!(
            "[{}] Validation failed for register request: {:?}",
            request_id,
            validation_errors
        );
        return validation_error_response(&validation_errors, lang);
    }

    match state
        .auth_service
        .register(&request.email, &request.password)
        .await
    {
        Ok(issued) => {
            if let NotificationOutcome::Failed { reason } = &issued.notification {
                log::warn!(
                    "[{}] Account created but verification email failed: {}",
                    request_id,
                    reason
                );
            }

            log::info!(
                "[{}] Registered user {} ({})",
                request_id,
                issued.value.user_id,
                mask_email(&issued.value.email)
            );

            HttpResponse::Created().json(RegisterResponse {
                success: true,
                message: get_message("registered", lang),
                user_id: issued.value.user_id,
                email: issued.value.email,
            })
        }
        Err(error) => {
            log::warn!("[{}] Register request failed: {}", request_id, error);
            handle_domain_error_with_lang(error, lang)
        }
    }
}
