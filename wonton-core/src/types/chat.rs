use super::common::{FinishReason, Usage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message role.
///
/// The closed set of framework roles plus `Custom` for callers that need to
/// address a vendor role the framework does not model. Roles round-trip
/// through their lowercase string form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
    Custom(String),
}

impl MessageRole {
    /// String form of the role as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Custom(role) => role,
        }
    }
}

impl From<String> for MessageRole {
    fn from(role: String) -> Self {
        match role.as_str() {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "tool" => Self::Tool,
            _ => Self::Custom(role),
        }
    }
}

impl From<MessageRole> for String {
    fn from(role: MessageRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message content.
///
/// Currently text-only; kept as an enum so multimodal parts can be added
/// without breaking the `ChatMessage` shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MessageContent {
    /// Plain text
    Text(String),
}

impl MessageContent {
    /// Extract text content if available.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
        }
    }

    /// Extract all text content.
    pub fn all_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Role
    pub role: MessageRole,
    /// Content
    pub content: MessageContent,
}

impl ChatMessage {
    /// Creates a user message
    pub fn user<S: Into<String>>(content: S) -> ChatMessageBuilder {
        ChatMessageBuilder::new(MessageRole::User, content)
    }

    /// Creates an assistant message
    pub fn assistant<S: Into<String>>(content: S) -> ChatMessageBuilder {
        ChatMessageBuilder::new(MessageRole::Assistant, content)
    }

    /// Creates a system message
    pub fn system<S: Into<String>>(content: S) -> ChatMessageBuilder {
        ChatMessageBuilder::new(MessageRole::System, content)
    }

    /// Creates a tool message
    pub fn tool<S: Into<String>>(content: S) -> ChatMessageBuilder {
        ChatMessageBuilder::new(MessageRole::Tool, content)
    }

    /// Creates a message with an arbitrary role string
    pub fn custom<R: Into<String>, S: Into<String>>(role: R, content: S) -> ChatMessageBuilder {
        ChatMessageBuilder::new(MessageRole::from(role.into()), content)
    }

    /// Gets the text content of the message
    pub fn content_text(&self) -> Option<&str> {
        self.content.text()
    }
}

/// Chat message builder
#[derive(Debug, Clone)]
pub struct ChatMessageBuilder {
    role: MessageRole,
    content: MessageContent,
}

impl ChatMessageBuilder {
    fn new<S: Into<String>>(role: MessageRole, content: S) -> Self {
        Self {
            role,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Builds the message
    pub fn build(self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content,
        }
    }
}

/// Chat response from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response ID assigned by the vendor
    pub id: Option<String>,
    /// The response content
    pub content: MessageContent,
    /// Model used for the response
    pub model: Option<String>,
    /// Usage statistics, passed through from the vendor when reported
    pub usage: Option<Usage>,
    /// Finish reason
    pub finish_reason: Option<FinishReason>,
    /// Provider-specific metadata (task ids, statuses, ...)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ChatResponse {
    /// Create a new chat response
    pub fn new(content: MessageContent) -> Self {
        Self {
            id: None,
            content,
            model: None,
            usage: None,
            finish_reason: None,
            metadata: HashMap::new(),
        }
    }

    /// Get the text content of the response
    pub fn content_text(&self) -> Option<&str> {
        self.content.text()
    }

    /// Get all text content of the response
    pub fn text(&self) -> String {
        self.content.all_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for (role, s) in [
            (MessageRole::System, "system"),
            (MessageRole::User, "user"),
            (MessageRole::Assistant, "assistant"),
            (MessageRole::Tool, "tool"),
        ] {
            assert_eq!(role.as_str(), s);
            assert_eq!(MessageRole::from(s.to_string()), role);
        }
        assert_eq!(
            MessageRole::from("observer".to_string()),
            MessageRole::Custom("observer".to_string())
        );
    }

    #[test]
    fn role_serde_uses_plain_strings() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let back: MessageRole = serde_json::from_str("\"observer\"").unwrap();
        assert_eq!(back, MessageRole::Custom("observer".to_string()));
    }

    #[test]
    fn builders_produce_expected_messages() {
        let msg = ChatMessage::user("hello").build();
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content_text(), Some("hello"));

        let msg = ChatMessage::custom("assistant", "hi").build();
        assert_eq!(msg.role, MessageRole::Assistant);
    }
}
