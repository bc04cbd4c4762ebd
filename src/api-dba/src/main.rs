use std::sync::Arc;

use core_dba::llms::OpenAi;
use core_dba::{LlmProvider, get_api_base_url, get_auth_config, setup_logging};

use api_dba::routes;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    setup_logging("api_dba=debug,tower_http=debug");

    let provider: Arc<dyn LlmProvider> = Arc::new(OpenAi::from_env());
    let app = routes::router(provider, get_auth_config());

    let addr = get_api_base_url().expect("Invalid HOST or PORT");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to address {}: {}", addr, e));
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await.unwrap();
}
