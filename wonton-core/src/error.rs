//! Error types shared by all provider implementations.

use thiserror::Error;

/// Unified error type for chat-model operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Generic HTTP failure (send, body read, unexpected status without a
    /// parsable vendor envelope)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Connection could not be established
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request exceeded its deadline
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// Error reported by the vendor API
    #[error("API error {code}: {message}")]
    ApiError {
        /// HTTP status or vendor status code
        code: u16,
        /// Vendor-provided message
        message: String,
        /// Raw vendor error body, when available
        details: Option<serde_json::Value>,
    },

    /// Authentication or credential failure
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Client-side configuration problem (missing key, bad base URL, ...)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failure while consuming a streaming response
    #[error("Stream error: {0}")]
    StreamError(String),

    /// A request parameter is out of range or malformed
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The input cannot be expressed in the vendor protocol
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation is not supported by this provider
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Invariant violation inside the library
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse classification of an error, for logging and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Client,
    Server,
    Network,
    Parsing,
    Validation,
    Configuration,
    Unsupported,
    Unknown,
}

impl LlmError {
    /// Construct an `ApiError` from an HTTP status and message.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError { code, .. } => match *code {
                401 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                400..=499 => ErrorCategory::Client,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Unknown,
            },
            Self::AuthenticationError(_) => ErrorCategory::Authentication,
            Self::HttpError(_) | Self::ConnectionError(_) | Self::TimeoutError(_) => {
                ErrorCategory::Network
            }
            Self::StreamError(_) | Self::ParseError(_) => ErrorCategory::Parsing,
            Self::InvalidParameter(_) | Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::UnsupportedOperation(_) => ErrorCategory::Unsupported,
            Self::InternalError(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether a caller-side retry could plausibly succeed. The library itself
    /// never retries; this is advisory only.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Server | ErrorCategory::Network
        )
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(format!("Request timed out: {err}"))
        } else if err.is_connect() {
            Self::ConnectionError(format!("Connection failed: {err}"))
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
