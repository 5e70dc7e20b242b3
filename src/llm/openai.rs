//! OpenAI-backed model client
//!
//! Chat-completions implementation of [`ModelClient`]. Structured output is
//! requested by embedding the result shape's JSON schema in the system
//! instructions and demanding JSON-only output; callers validate the
//! response at their own boundary. Search-augmented generation routes to a
//! dedicated search-preview model, which must be configured explicitly.

use crate::llm::client::{ModelClient, ResultShape};
use crate::types::{ResearchError, Result};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

/// OpenAI chat-completions client.
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
    search_model: Option<String>,
}

impl OpenAIClient {
    /// Create a client for the given API key, base URL and model.
    ///
    /// `search_model` names a search-preview model used for
    /// search-augmented generation; without one, search requests fail with
    /// a configuration error.
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        search_model: Option<String>,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
            search_model,
        }
    }

    async fn chat(&self, model: &str, system: &str, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(vec![
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                    system.to_string(),
                )),
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                    prompt.to_string(),
                )),
            ])
            .build()
            .map_err(|e| ResearchError::Provider(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ResearchError::Provider(format!("OpenAI API error: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ResearchError::Provider("No response from OpenAI".to_string()))
    }
}

#[async_trait]
impl ModelClient for OpenAIClient {
    async fn generate(&self, instructions: &str, input: &str) -> Result<String> {
        self.chat(&self.model, instructions, input).await
    }

    async fn generate_structured(
        &self,
        instructions: &str,
        input: &str,
        shape: &ResultShape,
    ) -> Result<String> {
        let system = format!(
            "{}\n\nRespond with a single JSON object named '{}' conforming to this JSON schema. \
             Only respond with valid JSON, no prose and no code fences.\n\n{}",
            instructions, shape.name, shape.schema
        );
        self.chat(&self.model, &system, input).await
    }

    async fn generate_with_search(&self, instructions: &str, input: &str) -> Result<String> {
        let search_model = self.search_model.as_deref().ok_or_else(|| {
            ResearchError::Config(
                "No search model configured; search-augmented generation requires one \
                 (set MINERVA_SEARCH_MODEL)"
                    .to_string(),
            )
        })?;
        self.chat(search_model, instructions, input).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
