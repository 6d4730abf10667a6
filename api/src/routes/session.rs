//! Current-session endpoint for clients that need to know who they are.

use actix_web::HttpResponse;

use crate::middleware::auth::AuthContext;

/// Returns the subject, authorities and expiry of the presented token
pub async fn current_session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "subject": auth.subject,
        "authorities": auth.authorities,
        "expiresAt": auth.expires_at.to_rfc3339(),
    }))
}
