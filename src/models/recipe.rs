use log::debug;

use crate::api::RecipeApi;
use crate::error::Result;
use crate::ingredients;
use crate::model::{ParsedIngredient, RecipeData};

/// Servings assumed when the source doesn't say.
pub const DEFAULT_SERVINGS: u32 = 4;

/// Minutes of cooking time estimated per group of ingredients.
const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inc,
    Dec,
}

/// One recipe being viewed, with its derived fields.
///
/// Ingredient counts are always derived from the amounts captured at parse
/// time, so scaling up and back down returns exactly the original numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    pub ingredients: Vec<String>,
    parsed: Vec<ParsedIngredient>,
    base_counts: Vec<Option<f64>>,
    source_servings: Option<u32>,
    time: u32,
    servings: u32,
    loaded: bool,
}

impl Recipe {
    /// An empty recipe for `id`, nothing fetched yet.
    pub fn new(id: impl Into<String>) -> Self {
        Recipe {
            id: id.into(),
            title: String::new(),
            author: String::new(),
            img: String::new(),
            url: String::new(),
            ingredients: Vec::new(),
            parsed: Vec::new(),
            base_counts: Vec::new(),
            source_servings: None,
            time: 0,
            servings: DEFAULT_SERVINGS,
            loaded: false,
        }
    }

    /// Fetch this recipe's data from `api`.
    pub async fn fetch<A: RecipeApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let data = api.get_recipe(&self.id).await?;
        self.populate(data);
        Ok(())
    }

    /// Fill in fetched data. Parsed ingredients are left for [`Self::parse_ingredients`].
    pub fn populate(&mut self, data: RecipeData) {
        if data.id != self.id {
            debug!("recipe {} was served as {}", self.id, data.id);
        }
        self.title = data.title;
        self.author = data.author;
        self.img = data.img;
        self.url = data.url;
        self.ingredients = data.ingredients;
        self.source_servings = data.servings;
        self.parsed.clear();
        self.base_counts.clear();
        self.loaded = true;
    }

    pub fn parse_ingredients(&mut self) {
        self.parsed = self
            .ingredients
            .iter()
            .map(|line| ingredients::parse(line))
            .collect();
        self.base_counts = self.parsed.iter().map(|ing| ing.count).collect();
        self.rescale();
    }

    /// Rough estimate: 15 minutes for every 3 ingredients.
    pub fn calc_time(&mut self) {
        let periods = self.ingredients.len().div_ceil(INGREDIENTS_PER_PERIOD);
        self.time = periods as u32 * MINUTES_PER_PERIOD;
    }

    pub fn calc_servings(&mut self) {
        self.servings = self.base_servings();
        self.rescale();
    }

    /// Change servings by one and rescale every ingredient.
    ///
    /// Returns `false` when nothing changed: decreasing from one serving, or
    /// increasing past the largest representable count.
    pub fn update_servings(&mut self, direction: Direction) -> bool {
        let new_servings = match direction {
            Direction::Inc => self.servings.saturating_add(1),
            Direction::Dec => self.servings.saturating_sub(1).max(1),
        };
        if new_servings == self.servings {
            return false;
        }
        self.servings = new_servings;
        self.rescale();
        true
    }

    pub fn parsed_ingredients(&self) -> &[ParsedIngredient] {
        &self.parsed
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    /// Estimated cooking time in minutes.
    pub fn time(&self) -> u32 {
        self.time
    }

    /// Whether fetched data has been filled in.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Servings the source amounts are written for.
    fn base_servings(&self) -> u32 {
        self.source_servings.unwrap_or(DEFAULT_SERVINGS).max(1)
    }

    fn rescale(&mut self) {
        let base = self.base_servings();
        let servings = self.servings;
        for (ingredient, original) in self.parsed.iter_mut().zip(&self.base_counts) {
            ingredient.count = original.map(|count| {
                if servings == base {
                    count
                } else {
                    count * f64::from(servings) / f64::from(base)
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(ingredients: &[&str]) -> RecipeData {
        RecipeData {
            id: "47746".to_string(),
            title: "Best Pizza Dough Ever".to_string(),
            author: "101 Cookbooks".to_string(),
            img: "http://example.com/pizza.jpg".to_string(),
            url: "http://example.com/pizza".to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            servings: None,
        }
    }

    fn loaded(ingredients: &[&str]) -> Recipe {
        let mut recipe = Recipe::new("47746");
        recipe.populate(data(ingredients));
        recipe.parse_ingredients();
        recipe.calc_time();
        recipe.calc_servings();
        recipe
    }

    #[test]
    fn test_new_recipe_is_not_loaded() {
        let recipe = Recipe::new("1");
        assert!(!recipe.is_loaded());
        assert_eq!(recipe.servings(), DEFAULT_SERVINGS);
        assert!(recipe.parsed_ingredients().is_empty());
    }

    #[test]
    fn test_populate_leaves_parsing_for_later() {
        let mut recipe = Recipe::new("47746");
        recipe.populate(data(&["2 cups flour"]));
        assert!(recipe.is_loaded());
        assert_eq!(recipe.title, "Best Pizza Dough Ever");
        assert!(recipe.parsed_ingredients().is_empty());
    }

    #[test]
    fn test_increase_scales_counts() {
        let mut recipe = loaded(&["2 cups flour"]);
        assert_eq!(recipe.servings(), 4);

        assert!(recipe.update_servings(Direction::Inc));

        assert_eq!(recipe.servings(), 5);
        let flour = &recipe.parsed_ingredients()[0];
        assert_eq!(flour.count, Some(2.5));
        assert_eq!(flour.unit, "cup");
        assert_eq!(flour.ingredient, "flour");
    }

    #[test]
    fn test_inc_then_dec_restores_counts() {
        let mut recipe = loaded(&["1/3 cup sugar", "3 eggs", "salt"]);
        let before = recipe.parsed_ingredients().to_vec();

        recipe.update_servings(Direction::Inc);
        recipe.update_servings(Direction::Dec);

        assert_eq!(recipe.servings(), 4);
        assert_eq!(recipe.parsed_ingredients(), before.as_slice());
    }

    #[test]
    fn test_dec_at_one_is_noop() {
        let mut recipe = loaded(&["2 cups flour"]);
        for _ in 0..3 {
            assert!(recipe.update_servings(Direction::Dec));
        }
        assert_eq!(recipe.servings(), 1);
        let count = recipe.parsed_ingredients()[0].count;

        assert!(!recipe.update_servings(Direction::Dec));
        assert_eq!(recipe.servings(), 1);
        assert_eq!(recipe.parsed_ingredients()[0].count, count);
        assert_eq!(count, Some(0.5));
    }

    #[test]
    fn test_inc_at_max_servings_is_noop() {
        let mut recipe = Recipe::new("47746");
        recipe.populate(RecipeData {
            servings: Some(u32::MAX),
            ..data(&["2 cups flour"])
        });
        recipe.parse_ingredients();
        recipe.calc_servings();

        assert!(!recipe.update_servings(Direction::Inc));
        assert_eq!(recipe.servings(), u32::MAX);
        assert_eq!(recipe.parsed_ingredients()[0].count, Some(2.0));
    }

    #[test]
    fn test_absent_counts_stay_absent() {
        let mut recipe = loaded(&["salt"]);
        recipe.update_servings(Direction::Inc);
        assert_eq!(recipe.parsed_ingredients()[0].count, None);
    }

    #[test]
    fn test_calc_time() {
        assert_eq!(loaded(&[]).time(), 0);
        assert_eq!(loaded(&["a", "b", "c"]).time(), 15);
        assert_eq!(loaded(&["a", "b", "c", "d"]).time(), 30);
    }

    #[test]
    fn test_source_servings_are_respected() {
        let mut recipe = Recipe::new("47746");
        recipe.populate(RecipeData {
            servings: Some(2),
            ..data(&["1 cup rice"])
        });
        recipe.parse_ingredients();
        recipe.calc_servings();
        assert_eq!(recipe.servings(), 2);
        assert_eq!(recipe.parsed_ingredients()[0].count, Some(1.0));

        recipe.update_servings(Direction::Inc);
        assert_eq!(recipe.parsed_ingredients()[0].count, Some(1.5));
    }

    #[test]
    fn test_parse_ingredients_is_idempotent() {
        let mut recipe = loaded(&["2 cups flour", "1 tsp salt"]);
        let first = recipe.parsed_ingredients().to_vec();
        recipe.parse_ingredients();
        assert_eq!(recipe.parsed_ingredients(), first.as_slice());
    }

    #[test]
    fn test_servings_never_below_one() {
        let mut recipe = loaded(&["2 cups flour"]);
        for _ in 0..10 {
            recipe.update_servings(Direction::Dec);
        }
        assert!(recipe.servings() >= 1);
        assert!(recipe.parsed_ingredients()[0].count.unwrap() >= 0.0);
    }
}
