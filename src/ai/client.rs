use crate::config::Settings;
use async_trait::async_trait;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

const SYSTEM_PROMPT: &str = "You are a quiz author. You write clear, factually correct questions \
and reply with a single JSON object exactly in the requested format.";

/// Anything that turns a fully formatted prompt into raw completion text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ClientError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl From<&Settings> for ModelConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            model: settings.model.clone(),
            temperature: Some(settings.temperature),
            max_tokens: Some(settings.max_tokens),
        }
    }
}

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
}

impl OpenRouterClient {
    /// Builds a client from the environment; `OPENROUTER_API_KEY` must be set.
    pub fn new(config: ModelConfig) -> Result<Self, String> {
        let client = openrouter_api::OpenRouterClient::quick()
            .map_err(|e| format!("Failed to create OpenRouter client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        let messages = vec![
            Message::text("system", SYSTEM_PROMPT),
            Message::text("user", prompt),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        }
    }
}

#[async_trait]
impl LanguageModel for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        let request = self.build_request(prompt);

        let response = self
            .client
            .chat()?
            .chat_completion(request)
            .await
            .map_err(|e| format!("OpenRouter API error: {}", e))?;

        let Some(choice) = response.choices.first() else {
            return Err("No response choices received".into());
        };

        match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => Ok(text.clone()),
            openrouter_api::MessageContent::Parts(parts) => {
                let text_parts: Vec<String> = parts
                    .iter()
                    .filter_map(|p| {
                        if let openrouter_api::ContentPart::Text(tc) = p {
                            Some(tc.text.clone())
                        } else {
                            None
                        }
                    })
                    .collect();
                Ok(text_parts.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_from_settings() {
        let settings = Settings {
            model: "openai/gpt-4o-mini".to_string(),
            temperature: 0.4,
            max_tokens: 512,
            ..Settings::default()
        };
        let config = ModelConfig::from(&settings);
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.temperature, Some(0.4));
        assert_eq!(config.max_tokens, Some(512));
    }

    #[test]
    fn test_model_config_serialization_skips_unset() {
        let config = ModelConfig {
            model: "m".to_string(),
            temperature: None,
            max_tokens: Some(10),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"model":"m","max_tokens":10}"#);
    }
}
