use actix_web::{web, App, HttpServer};
use anyhow::Context;
use pm_api::{
    config::Config,
    dto::ErrorResponseExt,
    routes,
    telemetry::init_tracing,
};
use pm_core::services::token::TokenService;
use pm_shared::{error_codes, Environment, ErrorResponse};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first so its values take precedence over `.env`
    dotenvy::from_filename(Environment::from_env().unwrap_or_default().dotenv_file()).ok();
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("refusing to start")?;
    init_tracing(&config.app.logging);

    info!(environment = %config.environment(), "Starting pension auth API");
    if config.app.jwt.is_weak_secret() {
        warn!("JWT_SECRET is shorter than recommended for HMAC signing");
    }

    let token_service = Arc::new(
        TokenService::new(config.token.clone()).context("failed to build token service")?,
    );
    info!(
        algorithm = ?config.token.algorithm,
        ttl_seconds = config.token.ttl.num_seconds(),
        issuer = %config.token.issuer,
        "Token service ready"
    );

    let bind_address = config.app.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        let token_service = Arc::clone(&token_service);
        App::new()
            .wrap(TracingLogger::default())
            .configure(move |cfg| routes::configure(cfg, token_service))
            .default_service(web::route().to(|| async {
                ErrorResponse::new(
                    404,
                    "NOT_FOUND",
                    error_codes::NOT_FOUND,
                    "The requested resource was not found",
                )
                .to_response()
            }))
    });
    if config.app.server.workers > 0 {
        server = server.workers(config.app.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;
    Ok(())
}
