pub mod middleware;
pub mod session;

pub use middleware::require_auth;
pub use session::{generate_session_token, parse_session_cookie, validate_session_token};
