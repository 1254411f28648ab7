use std::time::Duration;

use crate::config::AiConfig;
use crate::generator::RecipeGenerator;
use crate::model::{Difficulty, GeneratedRecipe};
use crate::prompt::Constraints;
use crate::providers::ProviderFactory;
use crate::GenerateError;

/// Generation backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Google,
    OpenAI,
}

impl LlmProvider {
    /// Convert to provider name string used by the factory
    fn as_str(&self) -> &str {
        match self {
            LlmProvider::Google => "google",
            LlmProvider::OpenAI => "openai",
        }
    }
}

/// Builder for configuring and executing a recipe generation
#[derive(Debug, Default)]
pub struct RecipeRequestBuilder {
    constraints: Constraints,
    provider: Option<LlmProvider>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
}

impl RecipeRequestBuilder {
    /// Ingredients the recipe should use
    ///
    /// # Example
    /// ```
    /// use recipe_gen::RecipeRequest;
    ///
    /// let builder = RecipeRequest::builder()
    ///     .ingredients("鶏もも肉、長ねぎ");
    /// ```
    pub fn ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.constraints.ingredients = Some(ingredients.into());
        self
    }

    /// Cuisine type, e.g. 和食 or 中華
    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.constraints.cuisine = Some(cuisine.into());
        self
    }

    /// Desired difficulty
    ///
    /// # Example
    /// ```
    /// use recipe_gen::{Difficulty, RecipeRequest};
    ///
    /// let builder = RecipeRequest::builder()
    ///     .difficulty(Difficulty::Easy);
    /// ```
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.constraints.difficulty = Some(difficulty);
        self
    }

    /// Upper bound on cooking time, in minutes
    pub fn cooking_time(mut self, minutes: u32) -> Self {
        self.constraints.cooking_time = Some(minutes);
        self
    }

    /// Set a custom LLM provider for generation
    ///
    /// # Example
    /// ```
    /// use recipe_gen::{LlmProvider, RecipeRequest};
    ///
    /// let builder = RecipeRequest::builder()
    ///     .provider(LlmProvider::OpenAI);
    /// ```
    pub fn provider(mut self, provider: LlmProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a timeout for the generation request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// The constraints collected so far
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Build the generator and run the generation
    ///
    /// # Errors
    /// Returns [`GenerateError::Configuration`] if the configuration cannot
    /// be loaded or no API key is available, and
    /// [`GenerateError::Generation`] if the provider call fails.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_gen::RecipeRequest;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeRequest::builder()
    ///     .ingredients("豚肉、キャベツ")
    ///     .cooking_time(20)
    ///     .build()
    ///     .await?;
    /// println!("{}", recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<GeneratedRecipe, GenerateError> {
        let config = AiConfig::load()?;
        self.build_with_config(config).await
    }

    /// Like [`build`](Self::build) but with an explicit configuration
    pub async fn build_with_config(
        self,
        mut config: AiConfig,
    ) -> Result<GeneratedRecipe, GenerateError> {
        let generator = self.generator(&mut config)?;
        generator.generate(self.constraints).await
    }

    fn generator(&self, config: &mut AiConfig) -> Result<RecipeGenerator, GenerateError> {
        let provider_name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());

        let mut provider_config = config.provider_config(&provider_name);
        if let Some(key) = &self.api_key {
            provider_config.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            provider_config.model = Some(model.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout.as_secs().max(1);
        }

        let provider = ProviderFactory::create(&provider_name, &provider_config, config.timeout)?;
        Ok(RecipeGenerator::new(provider))
    }
}

/// Main entry point for the builder API
pub struct RecipeRequest;

impl RecipeRequest {
    /// Creates a new builder for generating a recipe
    pub fn builder() -> RecipeRequestBuilder {
        RecipeRequestBuilder::default()
    }
}
