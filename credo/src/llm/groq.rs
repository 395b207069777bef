//! Groq chat-completion client implementing [`LlmClient`].
//!
//! Groq exposes an OpenAI-compatible Chat Completions API, so this is `async_openai`
//! with the base URL pointed at Groq. Non-streaming, single call per invocation; the
//! dialog engine applies its own bounded timeout around `complete`.

use async_trait::async_trait;
use tracing::{debug, trace};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

use crate::message::Message;

use super::{LlmClient, LlmError};

/// Groq's OpenAI-compatible endpoint.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

const DEFAULT_MAX_TOKENS: u32 = 500;

/// Chat Completions client for Groq-hosted models.
pub struct GroqChat {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl GroqChat {
    /// Build a client against [`GROQ_API_BASE`] with the given key and model id.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(GROQ_API_BASE);
        Self::with_config(config, model)
    }

    /// Build a client against any OpenAI-compatible base URL.
    pub fn with_base(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Self::with_config(config, model)
    }

    /// Build a client with custom config (e.g. organization or query auth).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Reply token limit per completion (default 500).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for GroqChat {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .max_tokens(self.max_tokens)
            .messages(Self::messages_to_request(messages))
            .build()
            .map_err(|e| LlmError::Api(format!("request build failed: {e}")))?;

        debug!(
            model = %self.model,
            message_count = messages.len(),
            max_tokens = self.max_tokens,
            "chat completion create"
        );
        if let Ok(body) = serde_json::to_string(&request) {
            trace!(request = %body, "chat completion request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::Api(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        match choice.message.content {
            Some(content) => Ok(content),
            None => Err(LlmError::EmptyResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_points_at_groq_base() {
        let _ = GroqChat::new("test-key", "llama-3.3-70b-versatile");
    }

    #[test]
    fn builder_sets_max_tokens() {
        let client = GroqChat::new("test-key", "m").with_max_tokens(128);
        assert_eq!(client.max_tokens, 128);
    }

    #[test]
    fn messages_map_to_request_roles() {
        let request = GroqChat::messages_to_request(&[
            Message::system("s"),
            Message::user("u"),
            Message::assistant("a"),
        ]);
        assert_eq!(request.len(), 3);
        assert!(matches!(request[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(request[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(request[2], ChatCompletionRequestMessage::Assistant(_)));
    }

    /// Given a client configured with an unreachable base URL, `complete` returns an
    /// Api error rather than panicking (no real key needed).
    #[tokio::test]
    async fn complete_with_unreachable_base_returns_api_error() {
        let config = OpenAIConfig::new()
            .with_api_key("test-key")
            .with_api_base("https://127.0.0.1:1");
        let client = GroqChat::with_config(config, "llama-3.3-70b-versatile");

        let result = client.complete(&[Message::user("Hello")]).await;

        assert!(matches!(result, Err(LlmError::Api(_))));
    }

    #[tokio::test]
    #[ignore = "Requires GROQ_API_KEY; run with: cargo test -p credo complete_with_real_api -- --ignored"]
    async fn complete_with_real_api_returns_text() {
        let key = std::env::var("GROQ_API_KEY").expect("GROQ_API_KEY must be set for this test");
        let client = GroqChat::new(key, "llama-3.3-70b-versatile");

        let reply = client
            .complete(&[Message::user("Say exactly: ok")])
            .await
            .expect("complete with real API should succeed");

        assert!(!reply.is_empty());
    }
}
