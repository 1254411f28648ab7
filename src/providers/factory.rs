use crate::config::{AiConfig, ProviderConfig};
use crate::error::GenerateError;
use crate::providers::{GoogleProvider, OpenAIProvider, TextGenerator};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout_secs: u64,
    ) -> Result<Box<dyn TextGenerator>, GenerateError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(GenerateError::Configuration(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout_secs)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout_secs)?)),
            _ => Err(GenerateError::Configuration(format!(
                "Unknown provider: {} (available: {})",
                provider_name,
                Self::available_providers().join(", ")
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &AiConfig) -> Result<Box<dyn TextGenerator>, GenerateError> {
        let provider_name = &config.default_provider;
        Self::create(
            provider_name,
            &config.provider_config(provider_name),
            config.timeout,
        )
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai"]
    }
}
