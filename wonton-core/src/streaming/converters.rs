//! Stream Event Converters
//!
//! Trait for converting provider-specific SSE events to unified `ChatStreamEvent`s.

use crate::error::LlmError;
use crate::streaming::ChatStreamEvent;
use eventsource_stream::Event;
use std::future::Future;
use std::pin::Pin;

/// Type alias for SSE event conversion future - supports multiple events
pub type SseEventFuture<'a> =
    Pin<Box<dyn Future<Output = Vec<Result<ChatStreamEvent, LlmError>>> + Send + Sync + 'a>>;

/// Trait for converting provider-specific SSE events to `ChatStreamEvent`
///
/// A single provider event may map to several unified events (e.g. the first
/// delta also emits `StreamStart`).
pub trait SseEventConverter: Send + Sync {
    /// Convert an SSE event to zero or more `ChatStreamEvent`s
    fn convert_event(&self, event: Event) -> SseEventFuture<'_>;

    /// Handle the end of the stream.
    ///
    /// Called when the SSE connection closes or a `[DONE]` marker arrives.
    /// Return events to emit (typically a final `StreamEnd`), or an empty
    /// vector to end silently.
    fn handle_stream_end(&self) -> Vec<Result<ChatStreamEvent, LlmError>> {
        Vec::new()
    }
}
