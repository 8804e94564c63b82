//! Streaming Module
//!
//! Unified streaming functionality for provider implementations:
//! - chat stream types and events
//! - SSE (server-sent events) handling via `eventsource-stream`
//! - conversion of provider events into unified `ChatStreamEvent`s

mod converters;
mod events;
mod factory;

pub use converters::{SseEventConverter, SseEventFuture};
pub use events::{ChatStream, ChatStreamEvent, ChatStreamHandle};
pub use factory::StreamFactory;
