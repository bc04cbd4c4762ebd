use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use core_dba::{AuthConfig, LlmProvider};

use crate::auth;

pub mod chat;
pub mod logging_middleware;
pub mod schema;

/// Shared handler state: the one provider instance, used read-only. Each
/// request runs independently; nothing here is mutated.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmProvider>,
}

//
// Router
//

pub fn router(llm: Arc<dyn LlmProvider>, auth_config: Option<AuthConfig>) -> Router {
    let auth_config = Arc::new(auth_config);
    let state = AppState { llm };

    // API routes (authentication required when enabled)
    let api_routes = Router::new()
        .route("/api/generate-schema", post(schema::post_generate_schema))
        .route("/api/chat", post(chat::post_chat))
        .route("/api/generate-diagram", post(schema::post_validate_diagram))
        .route_layer(middleware::from_fn_with_state(auth_config.clone(), auth::require_auth))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        // Custom route access logging
        .layer(middleware::from_fn(logging_middleware::log_route_access))
        // Tracing middleware
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}
