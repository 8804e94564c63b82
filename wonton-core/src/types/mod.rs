//! Chat-related types and message handling

mod chat;
mod common;

pub use chat::{ChatMessage, ChatMessageBuilder, ChatResponse, MessageContent, MessageRole};
pub use common::{
    CommonParams, FinishReason, HttpConfig, ProviderCapabilities, ResponseMetadata, Usage,
};
