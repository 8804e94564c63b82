//! Zhipu Provider Tests

#[cfg(test)]
mod zhipu_tests {
    use super::super::*;
    use secrecy::ExposeSecret;
    use std::time::Duration;
    use wonton_core::traits::LlmClient;

    #[test]
    fn test_config_creation() {
        let config = ZhipuConfig::new("id.secret");
        assert_eq!(config.api_key.expose_secret(), "id.secret");
        assert_eq!(config.base_url, ZhipuConfig::DEFAULT_BASE_URL);
        assert_eq!(config.common_params.model, ZhipuConfig::DEFAULT_MODEL);
        assert_eq!(config.token_ttl, ZhipuConfig::DEFAULT_TOKEN_TTL);
        assert!(config.incremental);
    }

    #[test]
    fn test_config_validation() {
        let config = ZhipuConfig::new("id.secret");
        assert!(config.validate().is_ok());

        let empty_key = ZhipuConfig::new("");
        assert!(empty_key.validate().is_err());

        let empty_url = ZhipuConfig::new("id.secret").with_base_url("");
        assert!(empty_url.validate().is_err());
    }

    #[test]
    fn test_model_constants() {
        assert_eq!(model_constants::chat::CHATGLM_PRO, "chatglm_pro");
        assert_eq!(model_constants::chat::CHATGLM_STD, "chatglm_std");
        assert_eq!(model_constants::chat::CHATGLM_LITE, "chatglm_lite");
        assert_eq!(model_constants::chat::CHATGLM_TURBO, "chatglm_turbo");
        assert_eq!(model_constants::all_chat_models().len(), 4);
    }

    #[test]
    fn test_builder_configuration() {
        let client = ZhipuBuilder::new()
            .api_key("id.secret")
            .model(model_constants::chat::CHATGLM_LITE)
            .temperature(0.7)
            .top_p(0.9)
            .token_ttl(Duration::from_secs(120))
            .build()
            .expect("builder should succeed with a key");

        assert_eq!(client.config().common_params.model, "chatglm_lite");
        assert_eq!(client.config().common_params.temperature, Some(0.7));
        assert_eq!(client.config().common_params.top_p, Some(0.9));
        assert_eq!(client.config().token_ttl, Duration::from_secs(120));
    }

    #[test]
    fn test_builder_rejects_bad_params() {
        let result = ZhipuBuilder::new()
            .api_key("id.secret")
            .top_p(1.5)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_client_metadata() {
        let client = ZhipuBuilder::new()
            .api_key("id.secret")
            .build()
            .expect("builder should succeed");

        assert_eq!(client.provider_id(), "zhipu");
        assert!(client.supported_models().contains(&"chatglm_pro".to_string()));

        let caps = client.capabilities();
        assert!(caps.chat);
        assert!(caps.streaming);
    }

    #[test]
    fn test_debug_does_not_leak_the_key() {
        let client = ZhipuBuilder::new()
            .api_key("id.super-secret")
            .build()
            .expect("builder should succeed");
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
    }
}
