pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod store;

pub use builder::{LlmProvider, RecipeRequest, RecipeRequestBuilder};
pub use error::{GenerateError, StoreError};
pub use generator::RecipeGenerator;
pub use model::{Difficulty, GeneratedRecipe, Recipe, RecipeDraft};
pub use parser::parse_response;
pub use prompt::{build_prompt, Constraints};
pub use store::{Page, RecipeBook, RecipeQuery};

use crate::config::AiConfig;

/// Generate a recipe with the configured default provider
///
/// Loads configuration from `config.toml` and the environment (see
/// [`AiConfig::load`]) and makes a single generation call.
///
/// # Errors
/// [`GenerateError::Configuration`] when no usable provider or API key is
/// configured, [`GenerateError::Generation`] when the provider call fails.
pub async fn generate_recipe(constraints: Constraints) -> Result<GeneratedRecipe, GenerateError> {
    let config = AiConfig::load()?;
    let generator = RecipeGenerator::from_config(&config)?;
    generator.generate(constraints).await
}

/// Generate a recipe and store it in `book` as machine generated
pub async fn generate_and_save(
    generator: &RecipeGenerator,
    book: &mut RecipeBook,
    constraints: Constraints,
) -> Result<Recipe, Box<dyn std::error::Error + Send + Sync>> {
    let generated = generator.generate(constraints).await?;
    let recipe = book.create(RecipeDraft::from(generated), true)?.clone();
    book.save()?;
    Ok(recipe)
}
