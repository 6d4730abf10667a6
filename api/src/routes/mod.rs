//! Route handlers
//!
//! - `health` - Liveness probe, always public
//! - `session` - Echoes the authenticated caller, behind [`JwtAuth`]

pub mod health;
pub mod session;

use actix_web::web;
use pm_core::services::token::TokenService;
use std::sync::Arc;

use crate::middleware::auth::JwtAuth;

/// Registers every route; everything under `/api/v1` requires a bearer token
pub fn configure(cfg: &mut web::ServiceConfig, token_service: Arc<TokenService>) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api/v1")
            .wrap(JwtAuth::new(token_service))
            .route("/session", web::get().to(session::current_session)),
    );
}
