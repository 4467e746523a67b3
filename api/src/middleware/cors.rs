//! CORS middleware configuration for the web client.
//!
//! Development and staging accept any origin unless `ALLOWED_ORIGINS` is
//! set; production only accepts the configured origins.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use fit_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    if environment.is_production() || !config.allowed_origins.is_empty() {
        create_restricted_cors(environment, config)
    } else {
        create_development_cors(config.max_age)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![Method::GET, Method::POST, Method::OPTIONS]
}

/// Permissive configuration for local testing.
fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
        .supports_credentials()
}

/// Only the configured origins; credentials are allowed so the browser
/// sends the PKCE verifier cookie.
fn create_restricted_cors(environment: Environment, config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for {:?} environment", environment);

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age)
        .supports_credentials();

    for origin in &config.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    if config.allowed_origins.is_empty() {
        log::warn!("No ALLOWED_ORIGINS configured; cross-origin requests will be rejected");
    }

    cors
}
