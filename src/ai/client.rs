use crate::ai::prompt::{build_question_prompt, SYSTEM_PROMPT};
use crate::error::GenerationError;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub const DEFAULT_MODEL: &str = "openai/gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

impl OpenRouterClient {
    /// Build a client from `OPENROUTER_API_KEY`.
    pub fn new() -> Result<Self, GenerationError> {
        let client = openrouter_api::OpenRouterClient::quick().map_err(|e| {
            GenerationError::RequestFailure(format!(
                "Failed to create OpenRouter client (is OPENROUTER_API_KEY set?): {}",
                e
            ))
        })?;

        Ok(Self { client })
    }

    /// Ask the model for `count` questions about `text` and return its raw reply.
    pub async fn generate_questions(
        &self,
        text: &str,
        count: u8,
        config: &ModelConfig,
    ) -> Result<String, GenerationError> {
        let prompt = build_question_prompt(text, count);

        let messages = vec![
            Message::text("system", SYSTEM_PROMPT),
            Message::text("user", &prompt),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: config.model.clone(),
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
            max_tokens: config.max_tokens,
            temperature: config.temperature,
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
        };

        let response = self
            .client
            .chat()
            .map_err(|e| GenerationError::RequestFailure(format!("OpenRouter client error: {}", e)))?
            .chat_completion(request)
            .await
            .map_err(|e| GenerationError::RequestFailure(format!("OpenRouter API error: {}", e)))?;

        let Some(choice) = response.choices.first() else {
            return Err(GenerationError::RequestFailure(
                "No response choices received".to_string(),
            ));
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
