//! A local recipe book persisted as a single JSON file.

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::model::{Difficulty, Recipe, RecipeDraft};

/// Recipes per listing page.
pub const PAGE_SIZE: usize = 12;
/// Recipes shown on the home screen.
pub const RECENT_COUNT: usize = 6;

/// Filters for [`RecipeBook::list`]
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    /// Case-insensitive match against title or ingredients
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// 1-based; out-of-range values are clamped
    pub page: usize,
}

/// One page of listing results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<Recipe>,
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BookFile {
    next_id: u64,
    recipes: Vec<Recipe>,
}

#[derive(Debug)]
pub struct RecipeBook {
    path: PathBuf,
    next_id: u64,
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// Open the book at `path`; a missing file is an empty book
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str::<BookFile>(&data)?
        } else {
            debug!("Recipe book {} does not exist yet", path.display());
            BookFile::default()
        };

        // Never hand out an id that is already taken
        let max_id = file.recipes.iter().map(|r| r.id).max().unwrap_or(0);
        Ok(RecipeBook {
            path,
            next_id: file.next_id.max(max_id + 1),
            recipes: file.recipes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Write the book back to its file
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = BookFile {
            next_id: self.next_id,
            recipes: self.recipes.clone(),
        };
        // The book file is only ever replaced whole
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, serde_json::to_string_pretty(&file)?)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!("Saved {} recipes to {}", self.recipes.len(), self.path.display());
        Ok(())
    }

    pub fn create(&mut self, draft: RecipeDraft, ai_generated: bool) -> Result<&Recipe, StoreError> {
        draft.validate()?;

        let now = Utc::now();
        let recipe = Recipe {
            id: self.next_id,
            title: draft.title,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            cooking_time: draft.cooking_time,
            servings: draft.servings,
            difficulty: draft.difficulty,
            is_ai_generated: ai_generated,
            created_at: now,
            updated_at: now,
        };
        let id = recipe.id;
        self.next_id += 1;
        info!("Created recipe {} '{}'", recipe.id, recipe.title);

        self.recipes.push(recipe);
        self.recipes.last().ok_or(StoreError::NotFound(id))
    }

    pub fn get(&self, id: u64) -> Result<&Recipe, StoreError> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Replace the editable fields of recipe `id`
    pub fn update(&mut self, id: u64, draft: RecipeDraft) -> Result<&Recipe, StoreError> {
        draft.validate()?;

        let recipe = self
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        recipe.title = draft.title;
        recipe.ingredients = draft.ingredients;
        recipe.instructions = draft.instructions;
        recipe.cooking_time = draft.cooking_time;
        recipe.servings = draft.servings;
        recipe.difficulty = draft.difficulty;
        recipe.updated_at = Utc::now();
        info!("Updated recipe {} '{}'", recipe.id, recipe.title);

        Ok(recipe)
    }

    pub fn delete(&mut self, id: u64) -> Result<Recipe, StoreError> {
        let index = self
            .recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.recipes.remove(index);
        info!("Deleted recipe {} '{}'", removed.id, removed.title);
        Ok(removed)
    }

    fn newest_first(&self) -> Vec<&Recipe> {
        let mut recipes: Vec<&Recipe> = self.recipes.iter().collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recipes
    }

    /// The `count` most recently created recipes
    pub fn recent(&self, count: usize) -> Vec<&Recipe> {
        let mut recipes = self.newest_first();
        recipes.truncate(count);
        recipes
    }

    /// Search, filter and paginate, newest first
    pub fn list(&self, query: &RecipeQuery) -> Page {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let matching: Vec<&Recipe> = self
            .newest_first()
            .into_iter()
            .filter(|r| match &needle {
                Some(needle) => {
                    r.title.to_lowercase().contains(needle)
                        || r.ingredients.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|r| query.difficulty.map_or(true, |d| r.difficulty == d))
            .collect();

        let total_items = matching.len();
        let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);
        let number = query.page.clamp(1, total_pages);

        Page {
            items: matching
                .into_iter()
                .skip((number - 1) * PAGE_SIZE)
                .take(PAGE_SIZE)
                .cloned()
                .collect(),
            number,
            total_pages,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, ingredients: &str, difficulty: Difficulty) -> RecipeDraft {
        RecipeDraft {
            title: title.to_string(),
            ingredients: ingredients.to_string(),
            instructions: "作る".to_string(),
            difficulty,
            ..Default::default()
        }
    }

    fn book() -> RecipeBook {
        RecipeBook {
            path: PathBuf::from("unused.json"),
            next_id: 1,
            recipes: Vec::new(),
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut book = book();
        let first = book.create(draft("A", "a", Difficulty::Easy), false).unwrap().id;
        let second = book.create(draft("B", "b", Difficulty::Easy), true).unwrap().id;
        assert_eq!((first, second), (1, 2));
        assert!(book.get(2).unwrap().is_ai_generated);

        book.delete(2).unwrap();
        let third = book.create(draft("C", "c", Difficulty::Easy), false).unwrap().id;
        assert_eq!(third, 3);
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let mut book = book();
        let result = book.create(draft(" ", "a", Difficulty::Easy), false);
        assert!(matches!(result, Err(StoreError::MissingField("title"))));
        assert!(book.is_empty());
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut book = book();
        let created = book.create(draft("A", "a", Difficulty::Easy), true).unwrap().clone();

        let updated = book
            .update(created.id, draft("A2", "a2", Difficulty::Hard))
            .unwrap()
            .clone();
        assert_eq!(updated.title, "A2");
        assert_eq!(updated.difficulty, Difficulty::Hard);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert!(updated.is_ai_generated);
    }

    #[test]
    fn test_missing_recipe() {
        let mut book = book();
        assert!(matches!(book.get(9), Err(StoreError::NotFound(9))));
        assert!(matches!(book.delete(9), Err(StoreError::NotFound(9))));
        assert!(matches!(
            book.update(9, draft("A", "a", Difficulty::Easy)),
            Err(StoreError::NotFound(9))
        ));
    }

    #[test]
    fn test_list_search_and_filter() {
        let mut book = book();
        book.create(draft("Chicken Curry", "chicken, onion", Difficulty::Medium), false)
            .unwrap();
        book.create(draft("親子丼", "鶏肉、卵", Difficulty::Easy), false)
            .unwrap();
        book.create(draft("Onion soup", "onion", Difficulty::Easy), false)
            .unwrap();

        let page = book.list(&RecipeQuery {
            search: Some("ONION".to_string()),
            ..Default::default()
        });
        let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Onion soup", "Chicken Curry"]);

        let page = book.list(&RecipeQuery {
            search: Some("onion".to_string()),
            difficulty: Some(Difficulty::Easy),
            page: 1,
        });
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].title, "Onion soup");
    }

    #[test]
    fn test_list_pagination_clamps() {
        let mut book = book();
        for i in 0..(PAGE_SIZE + 3) {
            book.create(draft(&format!("R{}", i), "x", Difficulty::Medium), false)
                .unwrap();
        }

        let first = book.list(&RecipeQuery::default());
        assert_eq!(first.number, 1);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), PAGE_SIZE);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = book.list(&RecipeQuery {
            page: 99,
            ..Default::default()
        });
        assert_eq!(last.number, 2);
        assert_eq!(last.items.len(), 3);
        assert_eq!(last.items[2].title, "R0");
    }

    #[test]
    fn test_empty_book_has_one_empty_page() {
        let page = book().list(&RecipeQuery::default());
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_recent() {
        let mut book = book();
        for i in 0..8 {
            book.create(draft(&format!("R{}", i), "x", Difficulty::Medium), false)
                .unwrap();
        }
        let recent = book.recent(RECENT_COUNT);
        assert_eq!(recent.len(), RECENT_COUNT);
        assert_eq!(recent[0].title, "R7");
    }
}
