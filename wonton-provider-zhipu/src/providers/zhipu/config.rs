//! Zhipu Configuration
//!
//! Configuration structures for the Zhipu `model-api` client.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use wonton_core::error::LlmError;
use wonton_core::types::{CommonParams, HttpConfig};

/// Zhipu API configuration
#[derive(Debug, Clone)]
pub struct ZhipuConfig {
    /// API key of the form `id.secret`
    pub api_key: SecretString,
    /// Base URL for the Zhipu model-api
    pub base_url: String,
    /// Common parameters (model, temperature, top_p)
    pub common_params: CommonParams,
    /// Lifetime of each signed authentication token
    pub token_ttl: Duration,
    /// Fixed request id to send with every request. When unset, a fresh id is
    /// generated per request.
    pub request_id: Option<String>,
    /// Ask the vendor for incremental deltas when streaming
    pub incremental: bool,
    /// HTTP client configuration
    pub http_config: HttpConfig,
}

impl ZhipuConfig {
    /// Default base URL for the Zhipu model-api
    pub const DEFAULT_BASE_URL: &'static str = "https://open.bigmodel.cn/api/paas/v3/model-api";

    /// Default model
    pub const DEFAULT_MODEL: &'static str = super::model_constants::chat::CHATGLM_PRO;

    /// Default token lifetime
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

    /// Create a new Zhipu configuration
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.common_params.model = model.into();
        self
    }

    /// Set the signed-token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(LlmError::ConfigurationError(
                "Zhipu API key cannot be empty".to_string(),
            ));
        }

        if self.base_url.is_empty() {
            return Err(LlmError::ConfigurationError(
                "Zhipu base URL cannot be empty".to_string(),
            ));
        }

        self.common_params.validate_params()
    }
}

impl Default for ZhipuConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            common_params: CommonParams {
                model: Self::DEFAULT_MODEL.to_string(),
                ..Default::default()
            },
            token_ttl: Self::DEFAULT_TOKEN_TTL,
            request_id: None,
            incremental: true,
            http_config: HttpConfig::default(),
        }
    }
}
