use log::{debug, error, info};

use crate::config::AiConfig;
use crate::error::GenerateError;
use crate::model::GeneratedRecipe;
use crate::parser::parse_response;
use crate::prompt::{build_prompt, Constraints};
use crate::providers::{ProviderFactory, TextGenerator};

/// Generates recipes: prompt, one call to the provider, parse.
///
/// Holds nothing but the provider handle, so one generator can serve
/// concurrent callers.
pub struct RecipeGenerator {
    provider: Box<dyn TextGenerator>,
}

impl RecipeGenerator {
    pub fn new(provider: Box<dyn TextGenerator>) -> Self {
        RecipeGenerator { provider }
    }

    /// Create a generator backed by the configured default provider
    ///
    /// The credential is checked here, once; a missing key is a
    /// [`GenerateError::Configuration`].
    pub fn from_config(config: &AiConfig) -> Result<Self, GenerateError> {
        Ok(Self::new(ProviderFactory::get_default_provider(config)?))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Generate a recipe matching `constraints`
    ///
    /// A single attempt is made. Transport and service failures surface as
    /// [`GenerateError::Generation`]; an unparseable answer does not fail
    /// and yields a generic recipe instead.
    pub async fn generate(&self, constraints: Constraints) -> Result<GeneratedRecipe, GenerateError> {
        if constraints.is_empty() {
            info!("No constraints given, asking for any recipe");
        }
        let prompt = build_prompt(&constraints);
        debug!("Generation prompt:\n{}", prompt);

        let raw = self.provider.send(&prompt).await.map_err(|e| {
            error!(
                "Recipe generation with {} failed: {}",
                self.provider.provider_name(),
                e
            );
            GenerateError::Generation(e.to_string())
        })?;
        debug!("Raw generation response:\n{}", raw);

        let recipe = parse_response(&raw);
        info!(
            "Generated recipe '{}' using {}",
            recipe.title,
            self.provider.provider_name()
        );
        Ok(recipe)
    }
}
