pub mod config;
pub mod diagram;
pub mod errors;
pub mod extract;
pub mod llms;
pub mod logging;
pub mod schema;

pub use config::{AuthConfig, get_api_base_url, get_auth_config, is_auth_enabled, is_env_set};
pub use diagram::{TableIdAllocator, prepare_diagram};
pub use errors::{Error, Result};
pub use extract::extract_json_object;
pub use llms::{LlmProvider, chat_reply, generate_schema};
pub use logging::setup_logging;
pub use schema::{GeneratedSchema, REQUIRED_KEYS, validate_generated};
