pub mod mock;
pub mod openai;
pub mod prompts;

use async_trait::async_trait;

pub use openai::OpenAi;
pub use prompts::{prompt_chat, prompt_generate_schema};

use crate::errors::Result;
use crate::extract::extract_json_object;
use crate::schema::{GeneratedSchema, validate_generated};

/// Interface to a hosted LLM that lets us complete a prompt and await a response.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete_prompt(&self, prompt: &str) -> Result<String>;
}

/// Generates a complete schema bundle from a plain-text database description.
///
/// Strictly sequential: build the prompt, make exactly one provider call,
/// extract the JSON object from the raw reply, validate it. A rejected
/// description never reaches the provider, and a failed call is never
/// retried here; resubmission is a brand-new invocation owned by the
/// caller. Not idempotent: the model may answer identical input differently.
pub async fn generate_schema<P: LlmProvider + ?Sized>(
    provider: &P,
    description: &str,
) -> Result<GeneratedSchema> {
    let prompt = prompt_generate_schema(description)?;
    let raw = provider.complete_prompt(&prompt).await?;
    let parsed = extract_json_object(&raw);
    validate_generated(parsed)
}

/// Answers one chat message with a plain-text reply. Same single-attempt
/// rule as `generate_schema`.
pub async fn chat_reply<P: LlmProvider + ?Sized>(provider: &P, message: &str) -> Result<String> {
    let prompt = prompt_chat(message)?;
    let raw = provider.complete_prompt(&prompt).await?;
    Ok(raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::mock::{
        MockLlmProvider, sample_bare_response, sample_fenced_response, sample_generated_schema_json,
        sample_prose_response,
    };
    use super::*;
    use crate::errors::Error;

    #[tokio::test]
    async fn test_generate_schema_from_fenced_response() {
        let provider = MockLlmProvider::with_default(&sample_fenced_response());
        let generated = generate_schema(&provider, "a blog with users and posts").await.unwrap();

        assert!(generated.diagram.starts_with("erDiagram"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_schema_from_bare_response() {
        let provider = MockLlmProvider::with_default(&sample_bare_response());
        let generated = generate_schema(&provider, "a blog with users and posts").await.unwrap();

        let expected: serde_json::Value = serde_json::from_str(sample_generated_schema_json()).unwrap();
        assert_eq!(serde_json::to_value(&generated).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_blank_description_never_calls_provider() {
        let provider = MockLlmProvider::with_default(&sample_fenced_response());
        let result = generate_schema(&provider, "   ").await;

        assert!(matches!(result, Err(Error::InvalidInput)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_retried() {
        let provider = MockLlmProvider::with_failure();
        let result = generate_schema(&provider, "a blog").await;

        assert!(matches!(result, Err(Error::Upstream(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prose_only_response_is_malformed() {
        let provider = MockLlmProvider::with_default(sample_prose_response());
        let result = generate_schema(&provider, "a blog").await;

        assert!(matches!(result, Err(Error::MalformedResponse)));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_response_names_missing_key() {
        let mut value: serde_json::Value = serde_json::from_str(sample_generated_schema_json()).unwrap();
        value.as_object_mut().unwrap().remove("prismaSchema");
        let provider = MockLlmProvider::with_default(&value.to_string());

        match generate_schema(&provider, "a blog").await {
            Err(Error::IncompleteResponse(missing)) => {
                assert_eq!(missing, vec!["prismaSchema".to_string()]);
            }
            other => panic!("expected IncompleteResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chat_reply_is_trimmed() {
        let provider = MockLlmProvider::with_default("  A junction table joins two tables.\n");
        let reply = chat_reply(&provider, "What is a junction table?").await.unwrap();

        assert_eq!(reply, "A junction table joins two tables.");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_chat_message_never_calls_provider() {
        let provider = MockLlmProvider::with_default("hello");
        let result = chat_reply(&provider, "").await;

        assert!(matches!(result, Err(Error::InvalidInput)));
        assert_eq!(provider.call_count(), 0);
    }
}
