//! Zhipu wire types
//!
//! Request and response envelopes of the `model-api`, kept separate from the
//! provider-agnostic types in `wonton-core`.

use serde::{Deserialize, Serialize};

/// A single `{role, content}` entry in the `prompt` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZhipuMessage {
    pub role: String,
    pub content: String,
}

/// Request envelope for `invoke` and `sse-invoke`.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct ZhipuChatRequest {
    /// Ordered conversation messages
    pub prompt: Vec<ZhipuMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Only sent for SSE requests; asks the vendor for incremental deltas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incremental: Option<bool>,
}

/// Response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZhipuChatResponse {
    /// Vendor status code (200 on success)
    pub code: Option<i64>,
    /// Vendor status message
    pub msg: Option<String>,
    #[serde(default)]
    pub success: bool,
    pub data: Option<ZhipuChatData>,
}

/// Payload of a successful response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ZhipuChatData {
    pub request_id: Option<String>,
    pub task_id: Option<String>,
    pub task_status: Option<TaskStatus>,
    #[serde(default)]
    pub choices: Vec<ZhipuMessage>,
    pub usage: Option<ZhipuUsage>,
}

/// Vendor task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Processing,
    Success,
    Fail,
    Interrupted,
}

/// Token usage counts, passed through untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct ZhipuUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_fields() {
        let request = ZhipuChatRequest {
            prompt: vec![ZhipuMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"][0]["role"], "user");
        assert!(json.get("temperature").is_none());
        assert!(json.get("incremental").is_none());
    }

    #[test]
    fn task_status_uses_screaming_snake_case() {
        let status: TaskStatus = serde_json::from_str("\"SUCCESS\"").unwrap();
        assert_eq!(status, TaskStatus::Success);
        assert_eq!(
            serde_json::to_string(&TaskStatus::Interrupted).unwrap(),
            "\"INTERRUPTED\""
        );
    }
}
