mod forkify;

use crate::error::Result;
use crate::model::{RecipeData, RecipeSummary};

/// Source of recipe data.
#[async_trait::async_trait]
pub trait RecipeApi: Send + Sync {
    /// Search recipes matching `query`. No matches is an empty list, not an error.
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>>;

    /// Fetch one recipe. Fails with `NotFound` for unknown ids.
    async fn get_recipe(&self, id: &str) -> Result<RecipeData>;
}

pub use forkify::ForkifyApi;
