//! Zhipu Builder Implementation
//!
//! Builder pattern implementation for creating Zhipu clients.

use std::time::Duration;
use wonton_core::error::LlmError;

use super::client::ZhipuClient;
use super::config::ZhipuConfig;

/// Environment variable consulted when no API key is set explicitly.
pub const API_KEY_ENV_VAR: &str = "ZHIPUAI_API_KEY";

/// Zhipu client builder.
#[derive(Debug, Clone, Default)]
pub struct ZhipuBuilder {
    config: ZhipuConfig,
}

impl ZhipuBuilder {
    /// Create a new Zhipu builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key (`id.secret`).
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.config.api_key = secrecy::SecretString::from(api_key.into());
        self
    }

    /// Set the base URL.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the model.
    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.config.common_params.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.common_params.temperature = Some(temperature);
        self
    }

    /// Set the `top_p` sampling parameter.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.config.common_params.top_p = Some(top_p);
        self
    }

    /// Set the lifetime of signed authentication tokens.
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.config.token_ttl = ttl;
        self
    }

    /// Send a fixed request id instead of a generated one.
    pub fn request_id<S: Into<String>>(mut self, request_id: S) -> Self {
        self.config.request_id = Some(request_id.into());
        self
    }

    /// Control whether streaming responses use incremental deltas.
    pub fn incremental(mut self, incremental: bool) -> Self {
        self.config.incremental = incremental;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http_config.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.config.http_config.connect_timeout = Some(connect_timeout);
        self
    }

    /// Build the Zhipu client.
    pub fn build(self) -> Result<ZhipuClient, LlmError> {
        use secrecy::ExposeSecret;

        // Fall back to the environment when no key was set explicitly.
        let mut config = self.config;
        if config.api_key.expose_secret().is_empty() {
            let api_key = std::env::var(API_KEY_ENV_VAR).map_err(|_| {
                LlmError::ConfigurationError(format!(
                    "Zhipu API key not provided. Set {API_KEY_ENV_VAR} or use .api_key()"
                ))
            })?;
            config.api_key = secrecy::SecretString::from(api_key);
        }

        config.validate()?;

        let http_client = config.http_config.build_client()?;
        Ok(ZhipuClient::new(config, http_client))
    }
}
