use thiserror::Error;

/// Errors that can occur while generating a recipe
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Required configuration (usually the API key) is missing or invalid.
    /// Fatal for the generator instance.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The text-generation service call failed (network, quota, service error)
    #[error("Recipe generation failed: {0}")]
    Generation(String),
}

impl From<config::ConfigError> for GenerateError {
    fn from(err: config::ConfigError) -> Self {
        GenerateError::Configuration(err.to_string())
    }
}

/// Errors raised by the recipe book
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the recipe book file
    #[error("Recipe book I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The recipe book file is not valid JSON
    #[error("Recipe book serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No recipe with the given id
    #[error("Recipe {0} not found")]
    NotFound(u64),

    /// A required recipe field was blank
    #[error("Field '{0}' is required")]
    MissingField(&'static str),
}
