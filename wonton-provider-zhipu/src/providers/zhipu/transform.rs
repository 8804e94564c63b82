//! Message and response translation
//!
//! Maps framework messages onto the vendor's `{role, content}` prompt entries
//! and the vendor response envelope back onto `ChatResponse`.

use super::config::ZhipuConfig;
use super::types::{TaskStatus, ZhipuChatRequest, ZhipuChatResponse, ZhipuMessage};
use wonton_core::error::LlmError;
use wonton_core::types::{ChatMessage, ChatResponse, FinishReason, MessageContent, MessageRole, Usage};

pub(crate) const ROLE_USER: &str = "user";
pub(crate) const ROLE_ASSISTANT: &str = "assistant";

/// Map a framework role onto a vendor role string.
///
/// The model-api only understands `user` and `assistant`. System and tool
/// messages have no representation and are rejected; custom roles pass
/// through verbatim with a warning when they fall outside the vendor set.
pub fn map_role(role: &MessageRole) -> Result<String, LlmError> {
    match role {
        MessageRole::User => Ok(ROLE_USER.to_string()),
        MessageRole::Assistant => Ok(ROLE_ASSISTANT.to_string()),
        MessageRole::System => Err(LlmError::UnsupportedOperation(
            "System messages are not supported by the Zhipu model-api; fold instructions into a user message instead".to_string(),
        )),
        MessageRole::Tool => Err(LlmError::UnsupportedOperation(
            "Tool messages are not supported by the Zhipu model-api".to_string(),
        )),
        MessageRole::Custom(role) => {
            if role != ROLE_USER && role != ROLE_ASSISTANT {
                tracing::warn!(role = %role, "unrecognized chat role sent to the Zhipu model-api");
            }
            Ok(role.clone())
        }
    }
}

/// Build the request envelope for a conversation.
pub fn build_request(
    messages: &[ChatMessage],
    config: &ZhipuConfig,
    streaming: bool,
) -> Result<ZhipuChatRequest, LlmError> {
    if messages.is_empty() {
        return Err(LlmError::InvalidInput(
            "Conversation must contain at least one message".to_string(),
        ));
    }

    let mut prompt = Vec::with_capacity(messages.len());
    for message in messages {
        prompt.push(ZhipuMessage {
            role: map_role(&message.role)?,
            content: message.content.all_text(),
        });
    }

    let request_id = config
        .request_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());

    Ok(ZhipuChatRequest {
        prompt,
        temperature: config.common_params.temperature,
        top_p: config.common_params.top_p,
        request_id: Some(request_id),
        incremental: streaming.then_some(config.incremental),
    })
}

/// Map a vendor task status onto a finish reason.
pub(crate) fn finish_reason_from(status: TaskStatus) -> Option<FinishReason> {
    match status {
        TaskStatus::Success => Some(FinishReason::Stop),
        TaskStatus::Interrupted => Some(FinishReason::Interrupted),
        TaskStatus::Fail => Some(FinishReason::Error),
        TaskStatus::Processing => None,
    }
}

/// Translate a response envelope into a `ChatResponse`.
///
/// A non-success envelope (or one without a payload) becomes an `ApiError`
/// carrying the vendor code and message.
pub fn parse_response(model: &str, envelope: ZhipuChatResponse) -> Result<ChatResponse, LlmError> {
    if !envelope.success || envelope.data.is_none() {
        let code = envelope
            .code
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(0);
        let message = envelope
            .msg
            .clone()
            .unwrap_or_else(|| "Zhipu model-api reported a failure".to_string());
        let details = serde_json::to_value(&envelope).ok();
        return Err(LlmError::ApiError {
            code,
            message,
            details,
        });
    }

    let data = envelope.data.unwrap_or_default();

    let content = data
        .choices
        .iter()
        .find(|choice| choice.role == ROLE_ASSISTANT)
        .or_else(|| data.choices.first())
        .map(|choice| choice.content.clone())
        .ok_or_else(|| LlmError::ParseError("Response contained no choices".to_string()))?;

    let mut response = ChatResponse::new(MessageContent::Text(content));
    response.model = Some(model.to_string());
    response.id = data.request_id.clone();
    response.finish_reason = data.task_status.and_then(finish_reason_from);
    // Counts are passed through untouched, including the vendor's total.
    response.usage = data.usage.map(|u| Usage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    if let Some(request_id) = data.request_id {
        response
            .metadata
            .insert("request_id".to_string(), request_id.into());
    }
    if let Some(task_id) = data.task_id {
        response
            .metadata
            .insert("task_id".to_string(), task_id.into());
    }
    if let Some(task_status) = data.task_status {
        if let Ok(value) = serde_json::to_value(task_status) {
            response.metadata.insert("task_status".to_string(), value);
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::zhipu::types::{ZhipuChatData, ZhipuUsage};
    use tracing_test::traced_test;

    fn config() -> ZhipuConfig {
        ZhipuConfig::new("id.secret")
    }

    #[test]
    fn user_and_assistant_map_to_vendor_roles() {
        assert_eq!(map_role(&MessageRole::User).unwrap(), "user");
        assert_eq!(map_role(&MessageRole::Assistant).unwrap(), "assistant");
    }

    #[test]
    fn system_and_tool_are_rejected() {
        assert!(matches!(
            map_role(&MessageRole::System),
            Err(LlmError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            map_role(&MessageRole::Tool),
            Err(LlmError::UnsupportedOperation(_))
        ));
    }

    #[traced_test]
    #[test]
    fn unknown_custom_role_warns_but_passes_through() {
        let mapped = map_role(&MessageRole::Custom("observer".to_string())).unwrap();
        assert_eq!(mapped, "observer");
        assert!(logs_contain("unrecognized chat role"));
    }

    #[traced_test]
    #[test]
    fn vendor_custom_role_passes_silently() {
        let mapped = map_role(&MessageRole::Custom("assistant".to_string())).unwrap();
        assert_eq!(mapped, "assistant");
        assert!(!logs_contain("unrecognized chat role"));
    }

    #[test]
    fn request_carries_messages_in_order() {
        let messages = vec![
            ChatMessage::user("first").build(),
            ChatMessage::assistant("second").build(),
            ChatMessage::user("third").build(),
        ];
        let request = build_request(&messages, &config(), false).unwrap();
        assert_eq!(request.prompt.len(), 3);
        assert_eq!(request.prompt[1].role, "assistant");
        assert_eq!(request.prompt[2].content, "third");
        assert!(request.request_id.is_some());
        assert_eq!(request.incremental, None);
    }

    #[test]
    fn streaming_request_sets_incremental() {
        let messages = vec![ChatMessage::user("hi").build()];
        let request = build_request(&messages, &config(), true).unwrap();
        assert_eq!(request.incremental, Some(true));
    }

    #[test]
    fn empty_conversation_is_rejected() {
        assert!(matches!(
            build_request(&[], &config(), false),
            Err(LlmError::InvalidInput(_))
        ));
    }

    #[test]
    fn fixed_request_id_is_honored() {
        let mut cfg = config();
        cfg.request_id = Some("req-42".to_string());
        let messages = vec![ChatMessage::user("hi").build()];
        let request = build_request(&messages, &cfg, false).unwrap();
        assert_eq!(request.request_id.as_deref(), Some("req-42"));
    }

    fn success_envelope() -> ZhipuChatResponse {
        ZhipuChatResponse {
            code: Some(200),
            msg: Some("ok".to_string()),
            success: true,
            data: Some(ZhipuChatData {
                request_id: Some("req-1".to_string()),
                task_id: Some("tsk-1".to_string()),
                task_status: Some(TaskStatus::Success),
                choices: vec![ZhipuMessage {
                    role: "assistant".to_string(),
                    content: "hello there".to_string(),
                }],
                usage: Some(ZhipuUsage {
                    prompt_tokens: 3,
                    completion_tokens: 5,
                    total_tokens: 8,
                }),
            }),
        }
    }

    #[test]
    fn success_envelope_maps_to_chat_response() {
        let response = parse_response("chatglm_pro", success_envelope()).unwrap();
        assert_eq!(response.content_text(), Some("hello there"));
        assert_eq!(response.id.as_deref(), Some("req-1"));
        assert_eq!(response.model.as_deref(), Some("chatglm_pro"));
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 3);
        assert_eq!(usage.completion_tokens, 5);
        assert_eq!(usage.total_tokens, 8);
        assert_eq!(response.metadata["task_id"], "tsk-1");
        assert_eq!(response.metadata["task_status"], "SUCCESS");
    }

    #[test]
    fn vendor_total_tokens_is_passed_through() {
        let mut envelope = success_envelope();
        // Vendor totals are not always the plain sum of the two counts.
        envelope.data.as_mut().unwrap().usage = Some(ZhipuUsage {
            prompt_tokens: 3,
            completion_tokens: 5,
            total_tokens: 9,
        });
        let response = parse_response("chatglm_pro", envelope).unwrap();
        assert_eq!(response.usage.unwrap().total_tokens, 9);
    }

    #[test]
    fn failure_envelope_becomes_api_error() {
        let envelope = ZhipuChatResponse {
            code: Some(1002),
            msg: Some("invalid api key".to_string()),
            success: false,
            data: None,
        };
        let err = parse_response("chatglm_pro", envelope).unwrap_err();
        match err {
            LlmError::ApiError { code, message, .. } => {
                assert_eq!(code, 1002);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn envelope_without_choices_is_a_parse_error() {
        let mut envelope = success_envelope();
        envelope.data.as_mut().unwrap().choices.clear();
        assert!(matches!(
            parse_response("chatglm_pro", envelope),
            Err(LlmError::ParseError(_))
        ));
    }
}
