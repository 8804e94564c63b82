//! wonton-provider-zhipu
//!
//! Zhipu GLM provider implementation.
//!
//! This crate adapts the Zhipu `model-api` HTTP endpoints (JWT-authenticated,
//! `{ prompt: [...] }` request envelopes, SSE streaming) to the chat-model
//! abstraction defined in `wonton-core`.
#![deny(unsafe_code)]

// Re-export the provider-agnostic core modules required by the provider
// implementation, preserving `crate::types::*`-style paths.
pub use wonton_core::{LlmError, error, streaming, traits, types, utils};

pub mod providers;

pub use providers::zhipu::{
    ZhipuBuilder, ZhipuChatCapability, ZhipuClient, ZhipuConfig, model_constants,
};
