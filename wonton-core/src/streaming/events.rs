//! Streaming event types for real-time responses

use crate::error::LlmError;
use crate::types::{ChatResponse, ResponseMetadata, Usage};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Chat streaming event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatStreamEvent {
    /// Stream start event with metadata
    StreamStart {
        /// Response metadata
        metadata: ResponseMetadata,
    },
    /// Content delta (incremental text)
    ContentDelta {
        /// The incremental text content
        delta: String,
        /// Index of the choice (for multiple responses)
        index: Option<usize>,
    },
    /// Usage statistics update
    UsageUpdate {
        /// Token usage information
        usage: Usage,
    },
    /// Stream end event with final response
    StreamEnd {
        /// Final response assembled from the stream
        response: ChatResponse,
    },
    /// Error occurred during streaming
    Error {
        /// Error message
        error: String,
    },
}

/// Stream of chat events
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatStreamEvent, LlmError>> + Send>>;

/// A chat stream paired with a cancellation handle.
///
/// Cancelling stops consumption as soon as possible; dropping the cancelled
/// stream closes the underlying HTTP connection.
pub struct ChatStreamHandle {
    /// The underlying chat stream
    pub stream: ChatStream,
    /// Handle to cancel the stream
    pub cancel: crate::utils::cancel::CancelHandle,
}
