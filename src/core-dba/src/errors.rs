//! Error types for the schema generation pipeline.

use thiserror::Error;

/// Failures the pipeline can surface, in pipeline order. The extractor
/// itself never produces one of these; it reports "nothing found" as a
/// `None` that the validator turns into `MalformedResponse`.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller's text was empty after trimming. No upstream call is made.
    #[error("Input text is required")]
    InvalidInput,

    /// Prompt template substitution failed.
    #[error("Failed to build prompt: {0}")]
    PromptCreation(#[from] subst::Error),

    /// The upstream model call failed (network, quota, service error).
    /// A single attempt is made; resubmission is the caller's decision.
    #[error("Upstream model call failed: {0}")]
    Upstream(String),

    /// No parseable JSON object anywhere in the model output.
    #[error("Failed to parse the model's JSON response. The format might be invalid.")]
    MalformedResponse,

    /// A JSON object was found but required keys are missing or null.
    #[error("Model response is missing required keys: {}", .0.join(", "))]
    IncompleteResponse(Vec<String>),

    /// Diagram string is empty or does not start with the erDiagram marker.
    #[error("Invalid or empty diagram string: {0}")]
    InvalidDiagram(String),
}

/// Provider failures all collapse into `Upstream` with the API's own message.
impl From<async_openai::error::OpenAIError> for Error {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Error::Upstream(err.to_string())
    }
}

/// Type alias for Result with the pipeline Error.
pub type Result<T> = std::result::Result<T, Error>;
