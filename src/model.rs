use serde::{Deserialize, Serialize};

/// Minimal recipe projection shown in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// Full recipe data as delivered by the recipe service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    pub ingredients: Vec<String>,
    /// Servings as published by the source, if it gives any
    pub servings: Option<u32>,
}

/// Structured form of a free-text ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// A liked recipe, persisted across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeEntry {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

impl From<LikeEntry> for RecipeSummary {
    fn from(like: LikeEntry) -> Self {
        RecipeSummary {
            id: like.id,
            title: like.title,
            author: like.author,
            img: like.img,
        }
    }
}

/// One row of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}
