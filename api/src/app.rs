//! Application factory
//!
//! Builds the Actix-web application around an [`AppState`] so the binary and
//! the integration tests share the same routing and middleware.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, HttpRequest, HttpResponse,
};

use fit_core::repositories::VerificationRepository;
use fit_core::services::{EmailServiceTrait, IdentityServiceTrait};
use fit_shared::config::AppConfig;

use crate::handlers::{json_error_handler, language_from_request, not_found_response};
use crate::middleware::{cors::create_cors, security::SecurityMiddleware};
use crate::routes::auth::{
    callback::callback, login::login, register::register, resend::resend, verify::verify,
    AppState,
};

pub const SERVICE_NAME: &str = "fitai-auth-api";

/// Create and configure the application with all dependencies
pub fn create_app<I, E, V>(
    app_state: web::Data<AppState<I, E, V>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    I: IdentityServiceTrait + 'static,
    E: EmailServiceTrait + 'static,
    V: VerificationRepository + 'static,
{
    let cors = create_cors(config.environment, &config.cors);
    let security = SecurityMiddleware::for_environment(config.environment)
        .with_trusted_proxies_from_env();
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Registration order is reversed at runtime: security runs first
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(register::<I, E, V>))
                .route("/resend", web::post().to(resend::<I, E, V>))
                .route("/verify", web::post().to(verify::<I, E, V>))
                .route("/login", web::post().to(login::<I, E, V>)),
        )
        .route("/auth/callback", web::get().to(callback::<I, E, V>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    not_found_response(language_from_request(&req))
}
