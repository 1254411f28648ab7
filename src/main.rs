use clap::{Args, Parser, Subcommand};
use log::{debug, error};
use std::process::ExitCode;

use recipe_gen::config::AiConfig;
use recipe_gen::providers::ProviderFactory;
use recipe_gen::store::RECENT_COUNT;
use recipe_gen::{
    Constraints, Difficulty, GenerateError, GeneratedRecipe, Page, Recipe, RecipeBook,
    RecipeDraft, RecipeGenerator, RecipeQuery,
};

#[derive(Parser, Debug)]
#[command(name = "recipe-gen", version, about = "Store, browse and generate cooking recipes")]
struct Cli {
    /// Recipe book file (defaults to the configured book_path)
    #[arg(long, global = true)]
    book: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a recipe with the LLM
    Generate {
        /// Ingredients to use
        #[arg(long)]
        ingredients: Option<String>,
        /// Cuisine type (和食, 洋食, 中華, ...)
        #[arg(long)]
        cuisine: Option<String>,
        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Cooking time budget in minutes
        #[arg(long)]
        time: Option<u32>,
        /// Provider to use instead of the configured default
        #[arg(long)]
        provider: Option<String>,
        /// Model to use instead of the provider default
        #[arg(long)]
        model: Option<String>,
        /// Store the result in the recipe book
        #[arg(long)]
        save: bool,
        #[arg(long)]
        json: bool,
    },
    /// List recipes, newest first
    List {
        /// Match against title or ingredients
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show the most recent recipes
    Recent,
    /// Show one recipe
    Show {
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// Add a recipe by hand
    Add(DraftArgs),
    /// Replace the fields of a recipe
    Edit {
        id: u64,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a recipe
    Delete { id: u64 },
}

#[derive(Args, Debug)]
struct DraftArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    ingredients: String,
    #[arg(long)]
    instructions: String,
    /// Cooking time in minutes
    #[arg(long)]
    time: Option<u32>,
    #[arg(long)]
    servings: Option<u32>,
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,
}

impl From<DraftArgs> for RecipeDraft {
    fn from(args: DraftArgs) -> Self {
        RecipeDraft {
            title: args.title,
            ingredients: args.ingredients,
            instructions: args.instructions,
            cooking_time: args.time,
            servings: args.servings,
            difficulty: args.difficulty,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<GenerateError>() {
                Some(GenerateError::Configuration(msg)) => {
                    eprintln!("Configuration error: {}", msg);
                    eprintln!("Set GEMINI_API_KEY (or configure a provider in config.toml) and try again.");
                }
                Some(GenerateError::Generation(_)) => {
                    eprintln!("Failed to generate a recipe. Please try again.");
                }
                None => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AiConfig::load().map_err(GenerateError::from)?;
    let book_path = cli.book.clone().unwrap_or_else(|| config.book_path.clone());

    match cli.command {
        Command::Generate {
            ingredients,
            cuisine,
            difficulty,
            time,
            provider,
            model,
            save,
            json,
        } => {
            let provider_name = provider.unwrap_or_else(|| config.default_provider.clone());
            let mut provider_config = config.provider_config(&provider_name);
            if model.is_some() {
                provider_config.model = model;
            }
            let generator = RecipeGenerator::new(ProviderFactory::create(
                &provider_name,
                &provider_config,
                config.timeout,
            )?);

            let constraints = Constraints {
                ingredients,
                cuisine,
                difficulty,
                cooking_time: time,
            };

            if save {
                let mut book = RecipeBook::open(&book_path)?;
                let recipe = recipe_gen::generate_and_save(&generator, &mut book, constraints)
                    .await
                    .inspect_err(|e| error!("Generate and save failed: {}", e))?;
                print_recipe(&recipe, json)?;
            } else {
                let generated = generator.generate(constraints).await?;
                print_generated(&generated, json)?;
            }
        }
        Command::List {
            search,
            difficulty,
            page,
            json,
        } => {
            let book = RecipeBook::open(&book_path)?;
            let page = book.list(&RecipeQuery {
                search,
                difficulty,
                page,
            });
            print_page(&page, json)?;
        }
        Command::Recent => {
            let book = RecipeBook::open(&book_path)?;
            for recipe in book.recent(RECENT_COUNT) {
                println!("{}", summary_line(recipe));
            }
        }
        Command::Show { id, json } => {
            let book = RecipeBook::open(&book_path)?;
            print_recipe(book.get(id)?, json)?;
        }
        Command::Add(args) => {
            let mut book = RecipeBook::open(&book_path)?;
            let id = book.create(args.into(), false)?.id;
            book.save()?;
            println!("Created recipe {} in {}", id, book.path().display());
        }
        Command::Edit { id, draft } => {
            let mut book = RecipeBook::open(&book_path)?;
            book.update(id, draft.into())?;
            book.save()?;
            println!("Updated recipe {} in {}", id, book.path().display());
        }
        Command::Delete { id } => {
            let mut book = RecipeBook::open(&book_path)?;
            let removed = book.delete(id)?;
            book.save()?;
            println!("Deleted recipe {} ({})", removed.id, removed.title);
        }
    }

    Ok(())
}

fn summary_line(recipe: &Recipe) -> String {
    let time = recipe
        .cooking_time
        .map(|m| format!("{}分", m))
        .unwrap_or_else(|| "-".to_string());
    let marker = if recipe.is_ai_generated { " [AI]" } else { "" };
    format!(
        "{:>4}  {}  {}  {}{}",
        recipe.id, recipe.difficulty, time, recipe.title, marker
    )
}

fn print_page(page: &Page, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    for recipe in &page.items {
        println!("{}", summary_line(recipe));
    }
    println!(
        "-- page {}/{} ({} recipes)",
        page.number, page.total_pages, page.total_items
    );
    Ok(())
}

fn print_recipe(recipe: &Recipe, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
        return Ok(());
    }
    println!("#{} {}", recipe.id, recipe.title);
    println!("難易度: {}", recipe.difficulty);
    if let Some(minutes) = recipe.cooking_time {
        println!("調理時間: {}分", minutes);
    }
    if let Some(servings) = recipe.servings {
        println!("{}人分", servings);
    }
    println!("\n【材料】\n{}\n\n【作り方】\n{}", recipe.ingredients, recipe.instructions);
    Ok(())
}

fn print_generated(recipe: &GeneratedRecipe, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
        return Ok(());
    }
    println!("{}", recipe.title);
    println!("難易度: {}", recipe.difficulty);
    if let Some(minutes) = recipe.cooking_time {
        println!("調理時間: {}分", minutes);
    }
    println!("\n【材料】\n{}\n\n【作り方】\n{}", recipe.ingredients, recipe.instructions);
    if !recipe.tips.is_empty() {
        println!("\n【コツ・ポイント】\n{}", recipe.tips);
    }
    Ok(())
}
