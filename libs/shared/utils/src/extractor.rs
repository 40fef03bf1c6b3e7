use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
    body::Body,
};
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_models::auth::Session;

use crate::jwt::open_session;

/// Reads an optional bearer token and, when it validates, attaches a
/// [`Session`] to the request. Screens decide for themselves what an
/// anonymous visitor sees, so a missing or rejected token never fails the
/// request here.
pub async fn session_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(session) = session_from_headers(request.headers(), &config.supabase_jwt_secret) {
        request.extensions_mut().insert(session);
    }

    next.run(request).await
}

pub fn session_from_headers(headers: &HeaderMap, jwt_secret: &str) -> Option<Session> {
    let auth_value = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let token = match auth_value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => token.trim(),
        _ => {
            debug!("Ignoring authorization header without bearer token");
            return None;
        }
    };

    match open_session(token, jwt_secret) {
        Ok(session) => Some(session),
        Err(reason) => {
            warn!("Treating request as anonymous: {}", reason);
            None
        }
    }
}
