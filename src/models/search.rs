use crate::api::RecipeApi;
use crate::error::Result;
use crate::model::RecipeSummary;

/// One submitted search and everything it found.
#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    pub query: String,
    pub result: Vec<RecipeSummary>,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Search {
            query: query.into(),
            result: Vec::new(),
        }
    }

    /// Fetch every result for the query; paging happens in the view.
    pub async fn get_results<A: RecipeApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        self.result = api.search_recipes(&self.query).await?;
        Ok(())
    }
}
