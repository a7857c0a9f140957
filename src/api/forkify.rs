use std::time::Duration;

use html_escape::decode_html_entities;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::api::RecipeApi;
use crate::config::ApiConfig;
use crate::error::{BrowserError, Result};
use crate::model::{RecipeData, RecipeSummary};

/// HTTP client for the forkify recipe API.
pub struct ForkifyApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeId {
    Text(String),
    Number(u64),
}

impl From<RecipeId> for String {
    fn from(id: RecipeId) -> Self {
        match id {
            RecipeId::Text(id) => id,
            RecipeId::Number(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    recipes: Vec<ApiSummary>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSummary {
    recipe_id: RecipeId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    recipe: Option<ApiRecipe>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRecipe {
    recipe_id: RecipeId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    ingredients: Vec<String>,
    servings: Option<u32>,
}

fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).trim().to_string()
}

impl From<ApiSummary> for RecipeSummary {
    fn from(summary: ApiSummary) -> Self {
        RecipeSummary {
            id: summary.recipe_id.into(),
            title: decode_html_symbols(&summary.title),
            author: decode_html_symbols(&summary.publisher),
            img: summary.image_url,
        }
    }
}

impl From<ApiRecipe> for RecipeData {
    fn from(recipe: ApiRecipe) -> Self {
        RecipeData {
            id: recipe.recipe_id.into(),
            title: decode_html_symbols(&recipe.title),
            author: decode_html_symbols(&recipe.publisher),
            img: recipe.image_url,
            url: recipe.source_url,
            ingredients: recipe
                .ingredients
                .iter()
                .map(|line| decode_html_symbols(line))
                .collect(),
            servings: recipe.servings.filter(|servings| *servings >= 1),
        }
    }
}

impl ForkifyApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; ForkifyBrowser/1.0)")
            .build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Some(Duration::from_secs(config.timeout)),
        )
    }
}

#[async_trait::async_trait]
impl RecipeApi for ForkifyApi {
    async fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("No recipes found for {:?}", query);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(BrowserError::Http {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body: SearchResponse = response.json().await?;
        if let Some(error) = body.error {
            debug!("Search for {:?} reported: {}", query, error);
            return Ok(Vec::new());
        }

        debug!("Search for {:?} returned {} recipes", query, body.recipes.len());
        Ok(body.recipes.into_iter().map(RecipeSummary::from).collect())
    }

    async fn get_recipe(&self, id: &str) -> Result<RecipeData> {
        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&[("rId", id)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            return Err(BrowserError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(BrowserError::Http {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body: GetResponse = response.json().await?;
        match (body.recipe, body.error) {
            (Some(recipe), None) => {
                let recipe = RecipeData::from(recipe);
                debug!("{:#?}", recipe);
                Ok(recipe)
            }
            (_, error) => {
                debug!("Recipe {} unavailable: {:?}", id, error);
                Err(BrowserError::NotFound(id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_id_accepts_numbers_and_strings() {
        let text: RecipeId = serde_json::from_str("\"47746\"").unwrap();
        let number: RecipeId = serde_json::from_str("35120").unwrap();
        assert_eq!(String::from(text), "47746");
        assert_eq!(String::from(number), "35120");
    }

    #[test]
    fn test_summary_titles_are_decoded() {
        let summary: ApiSummary = serde_json::from_str(
            r#"{"recipe_id": "1", "title": "Mac &amp; Cheese ", "publisher": "Closet Cooking", "image_url": "http://img"}"#,
        )
        .unwrap();
        let summary = RecipeSummary::from(summary);
        assert_eq!(summary.title, "Mac & Cheese");
        assert_eq!(summary.author, "Closet Cooking");
    }

    #[test]
    fn test_zero_servings_is_dropped() {
        let recipe: ApiRecipe =
            serde_json::from_str(r#"{"recipe_id": "1", "servings": 0}"#).unwrap();
        assert_eq!(RecipeData::from(recipe).servings, None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = ForkifyApi::new("http://localhost/api/", None).unwrap();
        assert_eq!(api.base_url, "http://localhost/api");
    }
}
