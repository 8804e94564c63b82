//! Common types and enums used across the library

use crate::error::LlmError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Common sampling parameters shared by providers.
///
/// Individual providers map only the subset their wire protocol supports.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CommonParams {
    /// Model name
    pub model: String,

    /// Temperature parameter (must be non-negative)
    pub temperature: Option<f32>,

    /// `top_p` nucleus sampling parameter
    pub top_p: Option<f32>,

    /// Maximum output tokens
    pub max_tokens: Option<u32>,

    /// Stop sequences
    pub stop_sequences: Option<Vec<String>>,

    /// Random seed
    pub seed: Option<u64>,
}

impl CommonParams {
    /// Validate common parameters.
    pub fn validate_params(&self) -> Result<(), LlmError> {
        if self.model.is_empty() {
            return Err(LlmError::InvalidParameter(
                "Model name cannot be empty".to_string(),
            ));
        }

        if let Some(temp) = self.temperature {
            if temp < 0.0 {
                return Err(LlmError::InvalidParameter(
                    "Temperature must be non-negative".to_string(),
                ));
            }
        }

        if let Some(top_p) = self.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(LlmError::InvalidParameter(
                    "top_p must be between 0.0 and 1.0".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Usage statistics, passed through from the vendor unchanged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    /// Input tokens used
    pub prompt_tokens: u32,
    /// Output tokens generated
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

impl Usage {
    /// Create new usage statistics
    pub const fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of generation
    Stop,
    /// Output token limit reached
    Length,
    /// Generation was interrupted (caller abort or vendor-side cutoff)
    Interrupted,
    /// Vendor reported a generation failure
    Error,
}

/// Metadata emitted at the start of a streaming response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResponseMetadata {
    /// Response or task id, when the vendor reports one up front
    pub id: Option<String>,
    /// Model that is producing the response
    pub model: Option<String>,
    /// Timestamp at which the stream was opened
    pub created: Option<chrono::DateTime<chrono::Utc>>,
}

/// Capability flags advertised by a provider client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderCapabilities {
    /// Chat completion support
    pub chat: bool,
    /// Streaming chat support
    pub streaming: bool,
    /// Provider-specific feature flags
    pub custom_features: HashMap<String, bool>,
}

impl ProviderCapabilities {
    /// Create an empty capability set
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable chat
    pub fn with_chat(mut self) -> Self {
        self.chat = true;
        self
    }

    /// Enable streaming
    pub fn with_streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    /// Set a provider-specific feature flag
    pub fn with_custom_feature(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.custom_features.insert(name.into(), enabled);
        self
    }

    /// Check a provider-specific feature flag
    pub fn supports(&self, name: &str) -> bool {
        self.custom_features.get(name).copied().unwrap_or(false)
    }
}

/// HTTP configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Option<Duration>,
    /// Connection timeout
    pub connect_timeout: Option<Duration>,
    /// Custom headers sent with every request
    pub headers: HashMap<String, String>,
    /// Proxy URL
    pub proxy: Option<String>,
    /// User agent
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            headers: HashMap::new(),
            proxy: None,
            user_agent: Some(concat!("wonton/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl HttpConfig {
    /// Build a `reqwest::Client` from this configuration.
    pub fn build_client(&self) -> Result<reqwest::Client, LlmError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| LlmError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }

        if !self.headers.is_empty() {
            let mut header_map = reqwest::header::HeaderMap::new();
            for (name, value) in &self.headers {
                let name = reqwest::header::HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| LlmError::ConfigurationError(format!("Invalid header name: {e}")))?;
                let value = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
                    LlmError::ConfigurationError(format!("Invalid header value: {e}"))
                })?;
                header_map.insert(name, value);
            }
            builder = builder.default_headers(header_map);
        }

        builder
            .build()
            .map_err(|e| LlmError::ConfigurationError(format!("Failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_validation() {
        let ok = CommonParams {
            model: "chatglm_pro".to_string(),
            temperature: Some(0.9),
            top_p: Some(0.7),
            ..Default::default()
        };
        assert!(ok.validate_params().is_ok());

        let no_model = CommonParams::default();
        assert!(no_model.validate_params().is_err());

        let bad_top_p = CommonParams {
            model: "chatglm_pro".to_string(),
            top_p: Some(1.5),
            ..Default::default()
        };
        assert!(bad_top_p.validate_params().is_err());
    }

    #[test]
    fn usage_totals() {
        let usage = Usage::new(10, 5);
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn default_http_config_builds_a_client() {
        let config = HttpConfig::default();
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn invalid_header_is_rejected() {
        let mut config = HttpConfig::default();
        config
            .headers
            .insert("x-bad\nname".to_string(), "v".to_string());
        assert!(config.build_client().is_err());
    }
}
