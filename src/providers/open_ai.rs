use crate::config::ProviderConfig;
use crate::error::GenerateError;
use crate::providers::{http_client, resolve_api_key, TextGenerator};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Result<Self, GenerateError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), OPENAI_API_KEY_ENV)?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: http_client(timeout_secs)?,
            api_key,
            base_url,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn send(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let response_body: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(format!("OpenAI request failed with status {}: {}", status, body).into());
            }
            Err(e) => return Err(e.into()),
        };
        debug!("OpenAI response: {:?}", response_body);

        // An error object can come back with any status
        if let Some(error) = response_body.get("error") {
            let message = match error.get("message").and_then(Value::as_str) {
                Some(message) => message.to_string(),
                None => error.as_str().map_or_else(|| error.to_string(), str::to_string),
            };
            return Err(format!("OpenAI API error ({}): {}", status, message).into());
        }

        if !status.is_success() {
            return Err(format!("OpenAI request failed with status {}: {}", status, body).into());
        }

        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("Failed to extract content from OpenAI response")?
            .to_string();

        Ok(text)
    }
}
