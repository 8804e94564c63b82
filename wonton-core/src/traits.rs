//! Chat capability traits

use crate::error::LlmError;
use crate::streaming::{ChatStream, ChatStreamHandle};
use crate::types::{ChatMessage, ChatResponse, ProviderCapabilities};
use async_trait::async_trait;

/// Core chat capability implemented by provider clients.
#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Send a conversation and wait for the complete response.
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatResponse, LlmError>;

    /// Send a conversation and stream the response incrementally.
    async fn chat_stream(&self, messages: Vec<ChatMessage>) -> Result<ChatStream, LlmError>;

    /// Like [`chat_stream`](Self::chat_stream), but returns a handle whose
    /// cancel side aborts consumption and closes the connection.
    async fn chat_stream_with_cancel(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatStreamHandle, LlmError> {
        let stream = self.chat_stream(messages).await?;
        let (stream, cancel) = crate::utils::cancel::make_cancellable_stream(stream);
        Ok(ChatStreamHandle { stream, cancel })
    }
}

/// Convenience extensions available on every chat-capable client.
#[async_trait]
pub trait ChatExtensions: ChatCapability {
    /// Ask a single question and return the text of the answer.
    async fn ask(&self, prompt: String) -> Result<String, LlmError> {
        let message = ChatMessage::user(prompt).build();
        let response = self.chat(vec![message]).await?;
        response
            .content_text()
            .map(std::string::ToString::to_string)
            .ok_or_else(|| LlmError::InternalError("No text in response".to_string()))
    }
}

impl<T: ChatCapability> ChatExtensions for T {}

/// A provider client: chat capability plus identity and capability metadata.
pub trait LlmClient: ChatCapability {
    /// Stable provider identifier (e.g. `"zhipu"`).
    fn provider_id(&self) -> std::borrow::Cow<'static, str>;

    /// Models this client knows how to address.
    fn supported_models(&self) -> Vec<String>;

    /// Capability flags for feature detection.
    fn capabilities(&self) -> ProviderCapabilities;
}
