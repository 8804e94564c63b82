//! Zhipu Chat Capability Implementation
//!
//! Implements the `ChatCapability` trait against the `invoke` and
//! `sse-invoke` endpoints of the model-api.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::sync::Arc;
use wonton_core::error::LlmError;
use wonton_core::streaming::{ChatStream, StreamFactory};
use wonton_core::traits::ChatCapability;
use wonton_core::types::{ChatMessage, ChatResponse};

use super::auth::TokenSigner;
use super::config::ZhipuConfig;
use super::streaming::ZhipuEventConverter;
use super::transform;
use super::types::ZhipuChatResponse;

const INVOKE: &str = "invoke";
const SSE_INVOKE: &str = "sse-invoke";

/// Zhipu chat capability implementation.
#[derive(Clone)]
pub struct ZhipuChatCapability {
    config: ZhipuConfig,
    signer: Arc<TokenSigner>,
    http_client: reqwest::Client,
}

impl ZhipuChatCapability {
    /// Create a new chat capability instance.
    pub fn new(config: ZhipuConfig, signer: Arc<TokenSigner>, http_client: reqwest::Client) -> Self {
        Self {
            config,
            signer,
            http_client,
        }
    }

    fn request_url(&self, invoke_method: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.common_params.model,
            invoke_method
        )
    }

    /// Build a POST with the signed token. The `accept` header selects the
    /// response mode: `application/json` or `text/event-stream`.
    fn authorized_post(
        &self,
        url: &str,
        streaming: bool,
    ) -> Result<reqwest::RequestBuilder, LlmError> {
        let token = self.signer.token()?;
        let accept = if streaming {
            "text/event-stream"
        } else {
            "application/json"
        };
        Ok(self
            .http_client
            .post(url)
            .header(AUTHORIZATION, token)
            .header(ACCEPT, accept))
    }
}

#[async_trait]
impl ChatCapability for ZhipuChatCapability {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatResponse, LlmError> {
        let body = transform::build_request(&messages, &self.config, false)?;
        let url = self.request_url(INVOKE);
        tracing::debug!(
            model = %self.config.common_params.model,
            messages = messages.len(),
            "dispatching chat request"
        );

        let response = self
            .authorized_post(&url, false)?
            .json(&body)
            .send()
            .await
            .map_err(LlmError::from)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::api_error(status.as_u16(), text));
        }

        let envelope: ZhipuChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("Failed to decode response envelope: {e}")))?;

        transform::parse_response(&self.config.common_params.model, envelope)
    }

    async fn chat_stream(&self, messages: Vec<ChatMessage>) -> Result<ChatStream, LlmError> {
        let body = transform::build_request(&messages, &self.config, true)?;
        let url = self.request_url(SSE_INVOKE);
        tracing::debug!(
            model = %self.config.common_params.model,
            messages = messages.len(),
            "dispatching streaming chat request"
        );

        let request = self.authorized_post(&url, true)?.json(&body);
        let converter = ZhipuEventConverter::new(self.config.common_params.model.clone());
        StreamFactory::create_eventsource_stream(request, converter).await
    }
}
