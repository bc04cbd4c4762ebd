use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use core_dba::AuthConfig;

use super::session::{parse_session_cookie, validate_session_token};

/// Middleware gating the API routes on a verified caller identity.
/// With no `AuthConfig` the gate is off and every request passes. With one,
/// the request must carry a session cookie holding a valid, unexpired token.
pub async fn require_auth(
    State(auth_config): State<Arc<Option<AuthConfig>>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let config = match auth_config.as_ref() {
        Some(cfg) => cfg,
        None => {
            debug!("Auth not enabled, passing request through");
            return Ok(next.run(request).await);
        }
    };

    let cookie_header = request.headers().get(header::COOKIE).and_then(|h| h.to_str().ok());

    let is_authenticated = cookie_header
        .and_then(parse_session_cookie)
        .map(|token| {
            validate_session_token(&token, &config.session_secret, config.session_duration_seconds).unwrap_or(false)
        })
        .unwrap_or(false);

    if is_authenticated {
        debug!("Request authenticated");
        Ok(next.run(request).await)
    } else {
        debug!("Request not authenticated, returning 401");
        Err(unauthorized_response())
    }
}

fn unauthorized_response() -> Response {
    let body = Json(serde_json::json!({
        "error": "Authentication required"
    }));

    (StatusCode::UNAUTHORIZED, body).into_response()
}
