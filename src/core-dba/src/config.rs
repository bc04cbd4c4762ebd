//! Environment-driven configuration for the binaries.

use std::env;
use std::net::SocketAddr;
use std::num::ParseIntError;

/// Chat-completion model used for every generation and chat request.
/// Overridable with GENERATION_MODEL.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Gets the model id to request from the upstream service.
pub fn generation_model() -> String {
    env::var("GENERATION_MODEL")
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// True if the named environment variable is set to a non-empty value.
pub fn is_env_set(name: &str) -> bool {
    env::var(name).map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Gets the host:port to bind from the env vars HOST and PORT.
/// Uses defaults `127.0.0.1:3000` if env vars are empty.
pub fn get_api_base_url() -> Result<SocketAddr, HostPortError> {
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = match env::var("PORT") {
        Ok(p) => p.parse::<u16>()?,
        Err(_) => 3000,
    };
    let address = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    Ok(address)
}

#[derive(Debug, thiserror::Error)]
pub enum HostPortError {
    #[error("Invalid port: {0}")]
    InvalidPort(#[from] ParseIntError),

    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] std::net::AddrParseError),
}

/// Configuration for the session-token gate on the API routes.
/// The external identity provider signs tokens with the same secret.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_secret: String,
    pub session_duration_seconds: u64,
}

/// Check if the auth gate is enabled.
/// True if the env var ENABLE_AUTH is present and is one of "1", "true", "yes", or "y".
pub fn is_auth_enabled() -> bool {
    env::var("ENABLE_AUTH")
        .map(|v| {
            let v = v.trim().to_lowercase();
            v == "1" || v == "true" || v == "yes" || v == "y"
        })
        .unwrap_or(false)
}

/// Get the auth gate configuration.
/// Returns None if the gate is disabled (every caller passes).
/// Panics if the gate is enabled but SESSION_SECRET is missing: better to
/// refuse to start than to serve unauthenticated.
pub fn get_auth_config() -> Option<AuthConfig> {
    if !is_auth_enabled() {
        return None;
    }

    let session_secret = env::var("SESSION_SECRET").expect(
        "SESSION_SECRET environment variable is required when ENABLE_AUTH=true. \
         Generate a secret with: openssl rand -base64 32",
    );

    let session_duration_seconds = env::var("SESSION_DURATION_SECONDS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(86400); // Default: 24 hours

    Some(AuthConfig {
        session_secret,
        session_duration_seconds,
    })
}
