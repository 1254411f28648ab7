use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Provider used for generation when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Path of the recipe book JSON file
    #[serde(default = "default_book_path")]
    pub book_path: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            timeout: default_timeout(),
            book_path: default_book_path(),
        }
    }
}

/// Configuration for a specific generation provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.5-flash"); each provider has its own default
    pub model: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

fn default_book_path() -> String {
    "recipes.json".to_string()
}

impl AiConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_GEN__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_GEN__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configuration for `name`, or the defaults if it is not configured.
    pub fn provider_config(&self, name: &str) -> ProviderConfig {
        self.providers.get(name).cloned().unwrap_or_default()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AiConfig::load`] for the source priority.
pub fn load_config() -> Result<AiConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_GEN__PROVIDERS__GOOGLE__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_GEN")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> AiConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "google");
        assert_eq!(default_temperature(), 0.7);
        assert_eq!(default_max_tokens(), 2000);
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_book_path(), "recipes.json");
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.default_provider, "google");
        assert!(config.providers.is_empty());
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_provider_section() {
        let config = from_toml(
            r#"
            default_provider = "openai"
            timeout = 10

            [providers.openai]
            model = "gpt-4.1-mini"
            api_key = "test-key"
            temperature = 0.2
            "#,
        );

        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.timeout, 10);
        let openai = config.provider_config("openai");
        assert!(openai.enabled);
        assert_eq!(openai.model.as_deref(), Some("gpt-4.1-mini"));
        assert_eq!(openai.api_key.as_deref(), Some("test-key"));
        assert_eq!(openai.max_tokens, 2000);
    }

    #[test]
    fn test_unconfigured_provider_gets_defaults() {
        let config = AiConfig::default();
        let google = config.provider_config("google");
        assert!(google.enabled);
        assert!(google.api_key.is_none());
        assert!(google.model.is_none());
    }
}
