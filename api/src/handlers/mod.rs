pub mod error;

pub use error::{
    handle_domain_error, handle_domain_error_with_lang, json_error_handler, language_from_request,
    not_found_response, validation_error_response,
};

use actix_web::HttpRequest;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id from the `x-request-id` header, or a fresh one
pub fn request_id(req: &HttpRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= 64)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
