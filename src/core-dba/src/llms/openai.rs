use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

use crate::config::generation_model;
use crate::errors::{Error, Result};
use crate::llms::LlmProvider;

const SYSTEM_PROMPT: &str = "You are an expert database architect.";

/// LLM provider backed by the OpenAI chat-completions API.
///
/// One non-streaming request per prompt; the first choice's message content
/// is the raw output. Requires `OPENAI_API_KEY` in the environment (read by
/// the client itself).
#[derive(Debug, Clone)]
pub struct OpenAi {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAi {
    /// Model id comes from `GENERATION_MODEL` (default `gpt-4o-mini`).
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            model: generation_model(),
        }
    }

    pub fn with_model(model: &str) -> Self {
        Self {
            client: Client::new(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAi {
    async fn complete_prompt(&self, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::Upstream("no response from model".to_string()))
    }
}
