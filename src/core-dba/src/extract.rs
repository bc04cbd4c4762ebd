//! Locating and parsing the JSON object inside raw model output.
//!
//! The model is instructed to return bare JSON but routinely wraps it in a
//! ```json fence or surrounds it with prose. Extraction is a deterministic
//! two-step search: a fenced block wins; only when no fence exists at all is
//! the first brace-delimited span of the text considered. A fence whose
//! contents fail to parse is a dead end, never a fallback to the bare-object
//! branch.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fence pattern is valid"))
}

/// Finds the JSON object candidate in `text` and parses it.
///
/// Returns `None` when no candidate exists or the candidate is not valid
/// JSON. Failure to find JSON is not an error here; the validator owns
/// turning `None` into a reported failure.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let candidate = match fence_regex().captures(text) {
        Some(caps) => caps.get(1)?.as_str(),
        None => {
            let start = text.find('{')?;
            let end = text.rfind('}')?;
            if end < start {
                return None;
            }
            &text[start..=end]
        }
    };

    match serde_json::from_str(candidate) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!("failed to parse extracted JSON candidate: {}", err);
            None
        }
    }
}
