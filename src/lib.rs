pub mod api;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod ingredients;
pub mod model;
pub mod models;
pub mod storage;
pub mod view;

use log::debug;

pub use api::{ForkifyApi, RecipeApi};
pub use config::BrowserConfig;
pub use controller::{AppState, Completion, Controller, Event, Task};
pub use error::{BrowserError, Result};
pub use model::{LikeEntry, ParsedIngredient, RecipeData, RecipeSummary, ShoppingListItem};
pub use models::{Direction, Likes, Recipe, Search, ShoppingList};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use view::{TerminalView, View};

/// Search recipes with the default configuration.
pub async fn search_recipes(query: &str) -> Result<Vec<RecipeSummary>> {
    let config = BrowserConfig::load()?;
    let api = ForkifyApi::from_config(&config.api)?;
    let mut search = Search::new(query);
    search.get_results(&api).await?;
    Ok(search.result)
}

/// Fetch a recipe with every derived field filled in.
pub async fn fetch_recipe(id: &str) -> Result<Recipe> {
    let config = BrowserConfig::load()?;
    let api = ForkifyApi::from_config(&config.api)?;
    let mut recipe = Recipe::new(id);
    recipe.fetch(&api).await?;
    recipe.parse_ingredients();
    recipe.calc_time();
    recipe.calc_servings();
    debug!("{:#?}", recipe);
    Ok(recipe)
}
