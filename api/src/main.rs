use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use fit_api::{app::create_app, routes::auth::AppState};
use fit_core::services::{
    AuthService, VerificationCleanupConfig, VerificationCleanupService, VerificationService,
    VerificationServiceConfig,
};
use fit_infra::{
    create_email_service, DatabasePool, HttpIdentityService, PostgresVerificationRepository,
};
use fit_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );
    if !config.logging.timestamp {
        logger.format_timestamp(None);
    }
    logger.init();

    info!(
        "Starting FitAI auth API ({:?} environment)",
        config.environment
    );

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let repository = Arc::new(PostgresVerificationRepository::new(
        database.get_pool().clone(),
    ));
    let identity_service = Arc::new(
        HttpIdentityService::new(&config.identity)
            .context("failed to build the identity service client")?,
    );
    let email_service = Arc::new(
        create_email_service(&config.email).context("failed to build the email service")?,
    );

    let verification_service = Arc::new(VerificationService::new(
        email_service,
        repository.clone(),
        VerificationServiceConfig::default(),
    ));
    let auth_service = Arc::new(AuthService::new(identity_service, verification_service));

    Arc::new(VerificationCleanupService::new(
        repository,
        VerificationCleanupConfig::from(&config.cleanup),
    ))
    .start_background_task();

    let app_state = web::Data::new(AppState::new(auth_service));
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    Ok(())
}
