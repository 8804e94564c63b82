//! Zhipu Client Implementation
//!
//! Main client that implements the framework traits for the Zhipu model-api.

use async_trait::async_trait;
use std::sync::Arc;
use wonton_core::error::LlmError;
use wonton_core::streaming::ChatStream;
use wonton_core::traits::{ChatCapability, LlmClient};
use wonton_core::types::{ChatMessage, ChatResponse, ProviderCapabilities};

use super::auth::TokenSigner;
use super::chat::ZhipuChatCapability;
use super::config::ZhipuConfig;
use super::model_constants;

/// Zhipu client.
#[derive(Clone)]
pub struct ZhipuClient {
    config: ZhipuConfig,
    http_client: reqwest::Client,
    chat_capability: ZhipuChatCapability,
}

impl std::fmt::Debug for ZhipuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZhipuClient")
            .field("provider_id", &"zhipu")
            .field("model", &self.config.common_params.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl ZhipuClient {
    /// Create a new Zhipu client.
    pub fn new(config: ZhipuConfig, http_client: reqwest::Client) -> Self {
        let signer = Arc::new(TokenSigner::new(config.api_key.clone(), config.token_ttl));
        let chat_capability =
            ZhipuChatCapability::new(config.clone(), signer, http_client.clone());

        Self {
            config,
            http_client,
            chat_capability,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ZhipuConfig {
        &self.config
    }

    /// Get the HTTP client.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Get the chat capability.
    pub fn chat_capability(&self) -> &ZhipuChatCapability {
        &self.chat_capability
    }
}

impl LlmClient for ZhipuClient {
    fn provider_id(&self) -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Borrowed("zhipu")
    }

    fn supported_models(&self) -> Vec<String> {
        model_constants::all_chat_models()
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::new().with_chat().with_streaming()
    }
}

#[async_trait]
impl ChatCapability for ZhipuClient {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatResponse, LlmError> {
        self.chat_capability.chat(messages).await
    }

    async fn chat_stream(&self, messages: Vec<ChatMessage>) -> Result<ChatStream, LlmError> {
        self.chat_capability.chat_stream(messages).await
    }
}
