//! Zhipu GLM Provider Module
//!
//! Client for the Zhipu `model-api` chat endpoints. Requests are
//! authenticated with a short-lived JWT signed from an `id.secret` API key;
//! responses come back either as a JSON envelope or as an SSE stream.
//!
//! # Architecture
//! - `client.rs` - Main Zhipu client implementing the `LlmClient` trait
//! - `config.rs` - Configuration structures and validation
//! - `builder.rs` - Builder pattern implementation for client creation
//! - `chat.rs` - Chat completion capability implementation
//! - `auth.rs` - API key parsing and JWT signing
//! - `streaming.rs` - SSE event conversion
//! - `transform.rs` - Message/role and response translation
//! - `types.rs` - Zhipu-specific wire type definitions
//! - `model_constants.rs` - Model name constants
//!
//! # Example Usage
//! ```rust,no_run
//! use wonton_provider_zhipu::ZhipuBuilder;
//! use wonton_provider_zhipu::traits::ChatCapability;
//! use wonton_provider_zhipu::types::ChatMessage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ZhipuBuilder::new()
//!         .api_key("id.secret")
//!         .model("chatglm_pro")
//!         .build()?;
//!
//!     let messages = vec![ChatMessage::user("Hello, world!").build()];
//!     let response = client.chat(messages).await?;
//!     println!("{}", response.text());
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod builder;
pub mod chat;
pub mod client;
pub mod config;
pub mod model_constants;
pub mod streaming;
pub mod transform;
pub mod types;

pub use builder::ZhipuBuilder;
pub use chat::ZhipuChatCapability;
pub use client::ZhipuClient;
pub use config::ZhipuConfig;
pub use streaming::ZhipuEventConverter;

#[cfg(test)]
mod tests;
