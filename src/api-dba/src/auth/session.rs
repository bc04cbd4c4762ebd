//! Session-token verification.
//!
//! Tokens have the form `timestamp:nonce:signature` where the signature is
//! HMAC-SHA256 over `timestamp:nonce` with a secret shared with the
//! external identity provider that mints them. This service only verifies;
//! issuing tokens, login flows, and user records live elsewhere.

use base64::{Engine as _, engine::general_purpose};
use cookie::Cookie;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

const COOKIE_NAME: &str = "db_architect_session";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid token format")]
    InvalidFormat,

    #[error("HMAC error: {0}")]
    HmacError(String),

    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),
}

/// Mint a token with the shared secret: `timestamp:nonce:signature`.
/// The identity provider runs the same construction; tests and operator
/// tooling use this one.
pub fn generate_session_token(secret: &str) -> Result<String, SessionError> {
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let nonce: [u8; 16] = rand::random();
    let nonce_b64 = general_purpose::URL_SAFE_NO_PAD.encode(nonce);

    let payload = format!("{}:{}", timestamp, nonce_b64);
    let signature = sign_payload(&payload, secret)?;

    Ok(format!("{}:{}", payload, signature))
}

/// Validate a session token.
/// Returns Ok(true) if the signature checks out and the token is within
/// `max_age_secs`; Ok(false) for expired or forged tokens; Err only for
/// tokens that are not even shaped like tokens.
pub fn validate_session_token(token: &str, secret: &str, max_age_secs: u64) -> Result<bool, SessionError> {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != 3 {
        return Err(SessionError::InvalidFormat);
    }

    let timestamp_str = parts[0];
    let nonce = parts[1];
    let provided_signature = parts[2];

    let timestamp: u64 = timestamp_str.parse().map_err(|_| SessionError::InvalidFormat)?;

    let current_time = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    // saturating: a future-dated timestamp must not underflow into "fresh"
    if current_time.saturating_sub(timestamp) > max_age_secs {
        return Ok(false);
    }

    let payload = format!("{}:{}", timestamp_str, nonce);
    let expected_signature = sign_payload(&payload, secret)?;

    if provided_signature != expected_signature {
        return Ok(false);
    }

    Ok(true)
}

/// Parse the session token out of a Cookie header, if present.
pub fn parse_session_cookie(cookie_header: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| Cookie::parse(pair.trim()).ok())
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// Build a Cookie header value carrying the token. Test helper; in
/// production the identity provider sets the cookie.
pub fn session_cookie_header(token: &str) -> String {
    format!("{}={}", COOKIE_NAME, token)
}

fn sign_payload(payload: &str, secret: &str) -> Result<String, SessionError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| SessionError::HmacError(e.to_string()))?;

    mac.update(payload.as_bytes());
    let result = mac.finalize();

    Ok(general_purpose::URL_SAFE_NO_PAD.encode(result.into_bytes()))
}
