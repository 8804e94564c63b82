//! Stream Factory
//!
//! Turns HTTP responses into `ChatStream`s. SSE responses are parsed with
//! `eventsource-stream` (which owns UTF-8 boundaries and line buffering);
//! non-SSE responses fall back to a single JSON body conversion.

use crate::error::LlmError;
use crate::streaming::{ChatStream, SseEventConverter};
use eventsource_stream::Eventsource;
use futures_util::StreamExt;

/// Stream Factory
pub struct StreamFactory;

impl StreamFactory {
    /// Send a request and convert the response into a `ChatStream`.
    ///
    /// The response status is checked before any streaming starts; a non-2xx
    /// status is surfaced as an API error carrying the body text.
    pub async fn create_eventsource_stream<C>(
        request_builder: reqwest::RequestBuilder,
        converter: C,
    ) -> Result<ChatStream, LlmError>
    where
        C: SseEventConverter + Clone + 'static,
    {
        let response = request_builder.send().await.map_err(LlmError::from)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::api_error(status.as_u16(), text));
        }

        Self::stream_from_response(response, converter).await
    }

    /// Convert an HTTP response into a `ChatStream`, using SSE when the server
    /// negotiated `text/event-stream` and a single JSON body conversion when
    /// it did not.
    pub async fn stream_from_response<C>(
        response: reqwest::Response,
        converter: C,
    ) -> Result<ChatStream, LlmError>
    where
        C: SseEventConverter + Clone + 'static,
    {
        let is_sse = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("text/event-stream"))
            .unwrap_or(false);

        if !is_sse {
            // Server answered with a plain body; feed it to the converter as a
            // single synthetic event so both paths share one code path.
            tracing::debug!("response is not text/event-stream; converting single body");
            let text = response
                .text()
                .await
                .map_err(|e| LlmError::HttpError(format!("Failed to read body: {e}")))?;
            let event = eventsource_stream::Event {
                event: "message".to_string(),
                data: text,
                id: "0".to_string(),
                retry: None,
            };
            let mut events = converter.convert_event(event).await;
            events.extend(converter.handle_stream_end());
            return Ok(Box::pin(futures::stream::iter(events)));
        }

        let mut sse_stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| LlmError::StreamError(format!("Stream error: {e}"))))
            .eventsource();

        let stream = async_stream::stream! {
            while let Some(event) = sse_stream.next().await {
                match event {
                    Ok(event) => {
                        if event.data.trim() == "[DONE]" {
                            for out in converter.handle_stream_end() {
                                yield out;
                            }
                            return;
                        }
                        if event.data.trim().is_empty() {
                            continue;
                        }
                        for out in converter.convert_event(event).await {
                            yield out;
                        }
                    }
                    Err(e) => {
                        yield Err(LlmError::StreamError(format!("SSE parsing error: {e}")));
                    }
                }
            }
            for out in converter.handle_stream_end() {
                yield out;
            }
        };

        Ok(Box::pin(stream))
    }
}
