//! Zhipu SSE event conversion
//!
//! The model-api streams named events: `add` carries an incremental delta,
//! `finish` carries the trailing delta, and `error`/`interrupted` abort the
//! generation. Unnamed `message` events appear only on the non-SSE fallback
//! path and carry a complete response envelope.

use super::transform;
use super::types::ZhipuChatResponse;
use eventsource_stream::Event;
use std::sync::{Arc, Mutex};
use wonton_core::error::LlmError;
use wonton_core::streaming::{ChatStreamEvent, SseEventConverter, SseEventFuture};
use wonton_core::types::{ChatResponse, FinishReason, MessageContent, ResponseMetadata};

#[derive(Debug, Default)]
struct StreamState {
    started: bool,
    ended: bool,
    content: String,
    task_id: Option<String>,
}

/// Event converter for the Zhipu streaming protocol.
#[derive(Clone)]
pub struct ZhipuEventConverter {
    model: String,
    state: Arc<Mutex<StreamState>>,
}

impl ZhipuEventConverter {
    /// Create a converter for a stream produced by `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            state: Arc::new(Mutex::new(StreamState::default())),
        }
    }

    fn final_response(&self, state: &StreamState, finish_reason: Option<FinishReason>) -> ChatResponse {
        let mut response = ChatResponse::new(MessageContent::Text(state.content.clone()));
        response.model = Some(self.model.clone());
        response.id = state.task_id.clone();
        response.finish_reason = finish_reason;
        if let Some(task_id) = &state.task_id {
            response
                .metadata
                .insert("task_id".to_string(), task_id.clone().into());
        }
        response
    }
}

impl SseEventConverter for ZhipuEventConverter {
    fn convert_event(&self, event: Event) -> SseEventFuture<'_> {
        Box::pin(async move {
            let mut out = Vec::new();
            let mut state = self.state.lock().expect("stream state mutex poisoned");

            if !state.started {
                state.started = true;
                if !event.id.is_empty() {
                    state.task_id = Some(event.id.clone());
                }
                out.push(Ok(ChatStreamEvent::StreamStart {
                    metadata: ResponseMetadata {
                        id: state.task_id.clone(),
                        model: Some(self.model.clone()),
                        created: Some(chrono::Utc::now()),
                    },
                }));
            }

            match event.event.as_str() {
                "add" => {
                    state.content.push_str(&event.data);
                    out.push(Ok(ChatStreamEvent::ContentDelta {
                        delta: event.data,
                        index: None,
                    }));
                }
                "finish" => {
                    if !event.data.is_empty() {
                        state.content.push_str(&event.data);
                        out.push(Ok(ChatStreamEvent::ContentDelta {
                            delta: event.data,
                            index: None,
                        }));
                    }
                    state.ended = true;
                    out.push(Ok(ChatStreamEvent::StreamEnd {
                        response: self.final_response(&state, Some(FinishReason::Stop)),
                    }));
                }
                "error" | "interrupted" => {
                    state.ended = true;
                    out.push(Err(LlmError::StreamError(format!(
                        "Generation {}: {}",
                        event.event, event.data
                    ))));
                }
                // Fallback path: the server answered with a plain JSON body
                // instead of an event stream.
                "message" | "" => match serde_json::from_str::<ZhipuChatResponse>(&event.data) {
                    Ok(envelope) => {
                        state.ended = true;
                        match transform::parse_response(&self.model, envelope) {
                            Ok(response) => {
                                if let Some(text) = response.content_text() {
                                    if !text.is_empty() {
                                        state.content.push_str(text);
                                        out.push(Ok(ChatStreamEvent::ContentDelta {
                                            delta: text.to_string(),
                                            index: None,
                                        }));
                                    }
                                }
                                if let Some(usage) = response.usage {
                                    out.push(Ok(ChatStreamEvent::UsageUpdate { usage }));
                                }
                                out.push(Ok(ChatStreamEvent::StreamEnd { response }));
                            }
                            Err(e) => out.push(Err(e)),
                        }
                    }
                    Err(_) => {
                        state.content.push_str(&event.data);
                        out.push(Ok(ChatStreamEvent::ContentDelta {
                            delta: event.data,
                            index: None,
                        }));
                    }
                },
                other => {
                    tracing::debug!(event = other, "ignoring unrecognized stream event");
                }
            }

            out
        })
    }

    fn handle_stream_end(&self) -> Vec<Result<ChatStreamEvent, LlmError>> {
        let mut state = self.state.lock().expect("stream state mutex poisoned");
        if state.ended {
            return Vec::new();
        }
        // The connection closed without a `finish` event; surface what was
        // accumulated so far.
        state.ended = true;
        vec![Ok(ChatStreamEvent::StreamEnd {
            response: self.final_response(&state, None),
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, data: &str, id: &str) -> Event {
        Event {
            event: name.to_string(),
            data: data.to_string(),
            id: id.to_string(),
            retry: None,
        }
    }

    #[tokio::test]
    async fn add_and_finish_accumulate_content() {
        let converter = ZhipuEventConverter::new("chatglm_pro");

        let first = converter.convert_event(event("add", "Hello", "tsk-9")).await;
        assert_eq!(first.len(), 2);
        assert!(matches!(
            first[0],
            Ok(ChatStreamEvent::StreamStart { ref metadata }) if metadata.id.as_deref() == Some("tsk-9")
        ));
        assert!(matches!(
            first[1],
            Ok(ChatStreamEvent::ContentDelta { ref delta, .. }) if delta == "Hello"
        ));

        converter.convert_event(event("add", ", world", "")).await;
        let last = converter.convert_event(event("finish", "!", "")).await;
        assert_eq!(last.len(), 2);
        match &last[1] {
            Ok(ChatStreamEvent::StreamEnd { response }) => {
                assert_eq!(response.content_text(), Some("Hello, world!"));
                assert_eq!(response.finish_reason, Some(FinishReason::Stop));
                assert_eq!(response.id.as_deref(), Some("tsk-9"));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        // The finish event already closed the stream.
        assert!(converter.handle_stream_end().is_empty());
    }

    #[tokio::test]
    async fn error_event_surfaces_as_stream_error() {
        let converter = ZhipuEventConverter::new("chatglm_pro");
        let out = converter
            .convert_event(event("error", "model overloaded", ""))
            .await;
        assert!(out.iter().any(|e| matches!(
            e,
            Err(LlmError::StreamError(msg)) if msg.contains("model overloaded")
        )));
    }

    #[tokio::test]
    async fn disconnect_without_finish_emits_partial_end() {
        let converter = ZhipuEventConverter::new("chatglm_pro");
        converter.convert_event(event("add", "partial", "")).await;

        let end = converter.handle_stream_end();
        assert_eq!(end.len(), 1);
        match &end[0] {
            Ok(ChatStreamEvent::StreamEnd { response }) => {
                assert_eq!(response.content_text(), Some("partial"));
                assert_eq!(response.finish_reason, None);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fallback_json_body_maps_to_full_response() {
        let converter = ZhipuEventConverter::new("chatglm_pro");
        let body = serde_json::json!({
            "code": 200,
            "msg": "ok",
            "success": true,
            "data": {
                "request_id": "req-1",
                "task_id": "tsk-1",
                "task_status": "SUCCESS",
                "choices": [{"role": "assistant", "content": "whole answer"}],
                "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
            }
        });
        let out = converter
            .convert_event(event("message", &body.to_string(), ""))
            .await;

        assert!(out.iter().any(|e| matches!(
            e,
            Ok(ChatStreamEvent::ContentDelta { delta, .. }) if delta == "whole answer"
        )));
        assert!(out.iter().any(|e| matches!(
            e,
            Ok(ChatStreamEvent::UsageUpdate { usage }) if usage.prompt_tokens == 1
        )));
        assert!(out
            .iter()
            .any(|e| matches!(e, Ok(ChatStreamEvent::StreamEnd { .. }))));
    }
}
