mod factory;
mod google;
mod open_ai;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use std::error::Error;

use crate::error::GenerateError;

/// Minimal capability every text-generation backend offers
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send a prompt and return the raw answer text
    async fn send(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// Resolve an API key from configuration, falling back to `env_var`.
///
/// Blank values count as missing.
pub(crate) fn resolve_api_key(
    configured: Option<&str>,
    env_var: &str,
) -> Result<String, GenerateError> {
    configured
        .map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            std::env::var(env_var)
                .ok()
                .filter(|key| !key.trim().is_empty())
        })
        .ok_or_else(|| {
            GenerateError::Configuration(format!(
                "{} not found in config or environment",
                env_var
            ))
        })
}

/// Build an HTTP client with the configured request timeout
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client, GenerateError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| GenerateError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_prefers_config() {
        let key = resolve_api_key(Some("from-config"), "RECIPE_GEN_TEST_UNSET_KEY").unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let result = resolve_api_key(None, "RECIPE_GEN_TEST_UNSET_KEY");
        match result {
            Err(GenerateError::Configuration(msg)) => {
                assert!(msg.contains("RECIPE_GEN_TEST_UNSET_KEY"))
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_api_key_blank_is_missing() {
        let result = resolve_api_key(Some("  "), "RECIPE_GEN_TEST_UNSET_KEY");
        assert!(matches!(result, Err(GenerateError::Configuration(_))));
    }

    #[test]
    fn test_resolve_api_key_from_env() {
        std::env::set_var("RECIPE_GEN_TEST_ENV_KEY", "from-env");
        let key = resolve_api_key(None, "RECIPE_GEN_TEST_ENV_KEY").unwrap();
        assert_eq!(key, "from-env");
    }
}
