//! Mutable application models. None of them know about each other or the view.

pub mod likes;
pub mod list;
pub mod recipe;
pub mod search;

pub use likes::{Likes, LIKES_KEY};
pub use list::ShoppingList;
pub use recipe::{Direction, Recipe, DEFAULT_SERVINGS};
pub use search::Search;
