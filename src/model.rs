use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Servings the generation prompt asks for.
pub const GENERATED_SERVINGS: u32 = 2;

/// Difficulty tier of a recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Machine-readable name, as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Display label, as used in prompts and generated text.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "簡単",
            Difficulty::Medium => "普通",
            Difficulty::Hard => "難しい",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed) || d.label() == trimmed)
            .ok_or_else(|| {
                format!(
                    "unknown difficulty '{}' (expected easy, medium or hard)",
                    trimmed
                )
            })
    }
}

/// Structured recipe produced from a generation response.
///
/// `title`, `ingredients` and `instructions` are never empty: the parser
/// substitutes placeholders when a section is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub title: String,
    /// One ingredient and quantity per line
    pub ingredients: String,
    /// Ordered steps, one per line
    pub instructions: String,
    /// Cooking time in minutes
    pub cooking_time: Option<u32>,
    pub difficulty: Difficulty,
    /// Free-text tips, may be empty
    pub tips: String,
}

/// A stored recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Difficulty,
    pub is_ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-editable recipe fields, used to create or update a [`Recipe`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Difficulty,
}

impl RecipeDraft {
    /// Check that the required fields are filled in.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (name, value) in [
            ("title", &self.title),
            ("ingredients", &self.ingredients),
            ("instructions", &self.instructions),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::MissingField(name));
            }
        }
        Ok(())
    }
}

impl From<GeneratedRecipe> for RecipeDraft {
    fn from(generated: GeneratedRecipe) -> Self {
        RecipeDraft {
            title: generated.title,
            ingredients: generated.ingredients,
            instructions: generated.instructions,
            cooking_time: generated.cooking_time,
            servings: Some(GENERATED_SERVINGS),
            difficulty: generated.difficulty,
        }
    }
}
