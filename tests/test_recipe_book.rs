use async_trait::async_trait;
use recipe_gen::providers::TextGenerator;
use recipe_gen::{
    generate_and_save, Constraints, Difficulty, RecipeBook, RecipeDraft, RecipeGenerator,
    RecipeQuery, StoreError,
};
use std::error::Error;
use tempfile::TempDir;

struct CannedGenerator(&'static str);

#[async_trait]
impl TextGenerator for CannedGenerator {
    fn provider_name(&self) -> &str {
        "canned"
    }

    async fn send(&self, _prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        Ok(self.0.to_string())
    }
}

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_string(),
        ingredients: "卵 2個".to_string(),
        instructions: "焼く".to_string(),
        cooking_time: Some(10),
        servings: Some(1),
        difficulty: Difficulty::Easy,
    }
}

#[test]
fn test_missing_file_opens_empty_book() {
    let dir = TempDir::new().unwrap();
    let book = RecipeBook::open(dir.path().join("recipes.json")).unwrap();
    assert!(book.is_empty());
}

#[test]
fn test_save_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("recipes.json");

    let mut book = RecipeBook::open(&path).unwrap();
    let id = book.create(draft("卵焼き"), false).unwrap().id;
    book.create(draft("目玉焼き"), false).unwrap();
    book.delete(id).unwrap();
    book.save().unwrap();

    let mut reopened = RecipeBook::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    assert!(matches!(reopened.get(id), Err(StoreError::NotFound(_))));

    // ids are not reused after a reload
    let next = reopened.create(draft("ゆで卵"), false).unwrap().id;
    assert_eq!(next, 3);
}

#[test]
fn test_save_replaces_book_without_leftovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipes.json");

    let mut book = RecipeBook::open(&path).unwrap();
    book.create(draft("卵焼き"), false).unwrap();
    book.save().unwrap();
    book.create(draft("目玉焼き"), false).unwrap();
    book.save().unwrap();

    assert_eq!(book.path(), path.as_path());
    assert!(!dir.path().join("recipes.json.tmp").exists());
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["recipes.json"]);
    assert_eq!(RecipeBook::open(&path).unwrap().len(), 2);
}

#[test]
fn test_stale_temp_file_is_ignored_and_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipes.json");
    std::fs::write(dir.path().join("recipes.json.tmp"), "{\"truncat").unwrap();

    let mut book = RecipeBook::open(&path).unwrap();
    assert!(book.is_empty());
    let created = book.create(draft("卵焼き"), false).unwrap().clone();
    assert_eq!(created.title, "卵焼き");
    assert_eq!(book.get(created.id).unwrap(), &created);
    book.save().unwrap();

    assert!(!dir.path().join("recipes.json.tmp").exists());
    assert_eq!(RecipeBook::open(&path).unwrap().len(), 1);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipes.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(
        RecipeBook::open(&path),
        Err(StoreError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_generate_and_save_marks_recipe_generated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recipes.json");
    let generator = RecipeGenerator::new(Box::new(CannedGenerator(
        "【レシピ名】\nだし巻き卵\n【材料】\n卵 3個\n【作り方】\n巻きながら焼く\n【調理時間】\n10分\n【難易度】\n難しい\n【コツ】\n弱火で",
    )));

    let mut book = RecipeBook::open(&path).unwrap();
    let recipe = generate_and_save(&generator, &mut book, Constraints::default())
        .await
        .unwrap();

    assert!(recipe.is_ai_generated);
    assert_eq!(recipe.title, "だし巻き卵");
    assert_eq!(recipe.servings, Some(2));
    assert_eq!(recipe.cooking_time, Some(10));
    assert_eq!(recipe.difficulty, Difficulty::Hard);

    let reopened = RecipeBook::open(&path).unwrap();
    let page = reopened.list(&RecipeQuery {
        search: Some("だし巻き".to_string()),
        ..Default::default()
    });
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, recipe.id);
}
