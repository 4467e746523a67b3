use actix_web::{
    error::JsonPayloadError,
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use std::collections::HashMap;
use validator::ValidationErrors;

use fit_core::errors::{AuthError, DomainError, ValidationError};
use fit_shared::{ErrorResponse, Language};

use crate::i18n::{format_message, get_error_message};

/// Detect language preference from the Accept-Language header
pub fn language_from_request(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// Build an error response from a catalog entry
///
/// Falls back to `fallback_code`, `fallback_text` and `fallback_status`
/// when the entry is missing from the catalog.
fn catalog_response(
    category: &str,
    key: &str,
    lang: Language,
    params: &HashMap<&str, String>,
    fallback_status: StatusCode,
    fallback_text: &str,
) -> (StatusCode, ErrorResponse) {
    match get_error_message(category, key, lang) {
        Some((code, template, status)) => {
            let status = StatusCode::from_u16(status).unwrap_or(fallback_status);
            (status, ErrorResponse::new(code, format_message(&template, params)))
        }
        None => (fallback_status, ErrorResponse::new(key, fallback_text)),
    }
}

pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    handle_domain_error_with_lang(error, Language::English)
}

/// Handle domain errors with language support
///
/// Upstream and internal details are only logged; clients receive a generic
/// message.
pub fn handle_domain_error_with_lang(error: DomainError, lang: Language) -> HttpResponse {
    let mut params = HashMap::new();
    let mut minutes_left = None;

    let (category, key, fallback_status) = match &error {
        DomainError::Configuration { service } => {
            log::error!("Service not configured: {}", service);
            ("general", "service_unavailable", StatusCode::SERVICE_UNAVAILABLE)
        }
        DomainError::Upstream { message } => {
            log::error!("Upstream failure: {}", message);
            ("general", "internal_error", StatusCode::INTERNAL_SERVER_ERROR)
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            ("general", "internal_error", StatusCode::INTERNAL_SERVER_ERROR)
        }
        DomainError::Auth(auth_error) => {
            log::info!("Request rejected: {}", auth_error);
            match auth_error {
                AuthError::EmailAlreadyRegistered => {
                    ("auth", "email_already_registered", StatusCode::BAD_REQUEST)
                }
                AuthError::UserNotFound => ("auth", "user_not_found", StatusCode::NOT_FOUND),
                AuthError::EmailAlreadyConfirmed => {
                    ("auth", "email_already_confirmed", StatusCode::BAD_REQUEST)
                }
                AuthError::ActiveCodeExists { minutes_left: minutes } => {
                    params.insert("minutes", minutes.to_string());
                    minutes_left = Some(*minutes);
                    ("auth", "active_code_exists", StatusCode::TOO_MANY_REQUESTS)
                }
                AuthError::InvalidVerificationCode => {
                    ("auth", "invalid_verification_code", StatusCode::BAD_REQUEST)
                }
            }
        }
        DomainError::ValidationErr(validation_error) => {
            log::warn!("Validation failed: {}", validation_error);
            match validation_error {
                ValidationError::RequiredField { field } => {
                    params.insert("field", field.clone());
                    ("validation", "required_field", StatusCode::BAD_REQUEST)
                }
                ValidationError::InvalidEmail => {
                    ("validation", "invalid_email", StatusCode::BAD_REQUEST)
                }
                ValidationError::PasswordTooShort { min } => {
                    params.insert("min", min.to_string());
                    ("validation", "password_too_short", StatusCode::BAD_REQUEST)
                }
                ValidationError::InvalidCodeFormat { expected_length } => {
                    params.insert("length", expected_length.to_string());
                    ("validation", "invalid_code_format", StatusCode::BAD_REQUEST)
                }
            }
        }
    };

    let (status, mut body) = catalog_response(
        category,
        key,
        lang,
        &params,
        fallback_status,
        &error.to_string(),
    );
    if let Some(minutes) = minutes_left {
        body = body.with_minutes_left(minutes);
    }

    HttpResponse::build(status).json(body)
}

/// 400 response listing the fields that failed request validation
pub fn validation_error_response(errors: &ValidationErrors, lang: Language) -> HttpResponse {
    let mut field_errors = HashMap::new();
    for (field, errors) in errors.field_errors() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        field_errors.insert(field.to_string(), messages);
    }

    let (status, body) = catalog_response(
        "validation",
        "invalid_request",
        lang,
        &HashMap::new(),
        StatusCode::BAD_REQUEST,
        "Invalid request data",
    );
    HttpResponse::build(status).json(body.with_fields(field_errors))
}

/// Localised 404 body
pub fn not_found_response(lang: Language) -> HttpResponse {
    let (status, body) = catalog_response(
        "general",
        "not_found",
        lang,
        &HashMap::new(),
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    );
    HttpResponse::build(status).json(body)
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body for {}: {}", req.path(), err);

    let (status, body) = catalog_response(
        "validation",
        "invalid_request",
        language_from_request(req),
        &HashMap::new(),
        StatusCode::BAD_REQUEST,
        "Invalid request data",
    );
    actix_web::error::InternalError::from_response(err, HttpResponse::build(status).json(body))
        .into()
}
