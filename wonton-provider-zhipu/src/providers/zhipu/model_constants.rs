//! Model name constants for the Zhipu model-api.

/// Chat models
pub mod chat {
    pub const CHATGLM_PRO: &str = "chatglm_pro";
    pub const CHATGLM_STD: &str = "chatglm_std";
    pub const CHATGLM_LITE: &str = "chatglm_lite";
    pub const CHATGLM_TURBO: &str = "chatglm_turbo";
}

/// All chat model names known to this client.
pub fn all_chat_models() -> Vec<String> {
    vec![
        chat::CHATGLM_PRO.to_string(),
        chat::CHATGLM_STD.to_string(),
        chat::CHATGLM_LITE.to_string(),
        chat::CHATGLM_TURBO.to_string(),
    ]
}
