use crate::model::Difficulty;

/// Opening sentence that sets the model's role.
pub const ROLE_PROMPT: &str =
    "あなたは経験豊富な料理人です。以下の条件に基づいて、美味しいレシピを1つ提案してください。\n\n";

/// The answer template appended to every prompt.
///
/// Loaded from `prompt_template.txt` at compile time. It lists the six
/// labelled sections the response parser looks for, in order.
pub const OUTPUT_TEMPLATE: &str = include_str!("prompt_template.txt");

pub const INGREDIENTS_LABEL: &str = "使用したい材料";
pub const CUISINE_LABEL: &str = "料理の種類";
pub const DIFFICULTY_LABEL: &str = "難易度";
pub const TIME_BUDGET_LABEL: &str = "調理時間の目安";

/// Optional user hints that shape the generated recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Ingredients the user wants to use, free text
    pub ingredients: Option<String>,
    /// Cuisine type (和食, 洋食, 中華, ...), free text
    pub cuisine: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Upper bound on cooking time, in minutes
    pub cooking_time: Option<u32>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        non_blank(&self.ingredients).is_none()
            && non_blank(&self.cuisine).is_none()
            && self.difficulty.is_none()
            && self.cooking_time.unwrap_or(0) == 0
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}

/// Build the generation prompt.
///
/// One line is emitted per supplied constraint, in the order ingredients,
/// cuisine, difficulty, time budget. Blank strings and a zero time budget
/// count as not supplied.
pub fn build_prompt(constraints: &Constraints) -> String {
    let mut prompt = String::from(ROLE_PROMPT);

    if let Some(ingredients) = non_blank(&constraints.ingredients) {
        prompt.push_str(&format!("{}: {}\n", INGREDIENTS_LABEL, ingredients));
    }
    if let Some(cuisine) = non_blank(&constraints.cuisine) {
        prompt.push_str(&format!("{}: {}\n", CUISINE_LABEL, cuisine));
    }
    if let Some(difficulty) = constraints.difficulty {
        prompt.push_str(&format!("{}: {}\n", DIFFICULTY_LABEL, difficulty.label()));
    }
    if let Some(minutes) = constraints.cooking_time.filter(|m| *m > 0) {
        prompt.push_str(&format!("{}: {}分以内\n", TIME_BUDGET_LABEL, minutes));
    }

    prompt.push_str(OUTPUT_TEMPLATE);
    prompt
}
