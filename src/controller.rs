//! Application controller: owns all mutable state and turns events into
//! model updates and view instructions.
//!
//! Network work is split out of the controller so several fetches can be in
//! flight while events keep arriving. [`Controller::dispatch`] returns a
//! [`Task`]; whoever drives the event loop runs it against the API and feeds
//! the resulting [`Completion`] back through [`Controller::complete`].
//! Every fetch carries a [`Ticket`]; completions for a superseded ticket are
//! dropped, so the latest search and the latest navigation always win.

use std::rc::Rc;
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::api::RecipeApi;
use crate::error::{BrowserError, Result};
use crate::model::{RecipeData, RecipeSummary};
use crate::models::{Direction, Likes, Recipe, Search, ShoppingList};
use crate::storage::Storage;
use crate::view::{paginate, Region, View};

const DEFAULT_RESULTS_PER_PAGE: usize = 10;

/// Everything the user can do.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Startup. `location` may carry a recipe id in its fragment.
    Load { location: String },
    /// The location fragment changed.
    HashChange { location: String },
    SearchSubmitted(String),
    /// 1-based results page
    PageRequested(usize),
    Servings(Direction),
    AddToList,
    DeleteItem(String),
    UpdateCount(String, f64),
    ToggleLike,
}

/// Identifies one issued fetch within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Sequence {
    latest: u64,
}

impl Sequence {
    fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Search { ticket: Ticket, query: String },
    Recipe { ticket: Ticket, id: String },
}

impl Task {
    /// Perform the fetch. Touches no state, so it can run concurrently with other events.
    pub async fn run<A: RecipeApi + ?Sized>(self, api: &A) -> Completion {
        match self {
            Task::Search { ticket, query } => Completion::Search {
                ticket,
                result: api.search_recipes(&query).await,
            },
            Task::Recipe { ticket, id } => Completion::Recipe {
                ticket,
                result: api.get_recipe(&id).await,
            },
        }
    }
}

/// Outcome of a [`Task`].
#[derive(Debug)]
pub enum Completion {
    Search {
        ticket: Ticket,
        result: Result<Vec<RecipeSummary>>,
    },
    Recipe {
        ticket: Ticket,
        result: Result<RecipeData>,
    },
}

/// The single mutable application state. Models appear as they are first needed.
#[derive(Default)]
pub struct AppState {
    pub search: Option<Search>,
    pub recipe: Option<Recipe>,
    pub list: Option<ShoppingList>,
    pub likes: Option<Likes>,
}

/// Recipe id named by a location such as `#47746` or `http://host/#47746`.
pub fn fragment_id(location: &str) -> Option<&str> {
    let id = match location.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        // A URL without a fragment names no recipe
        None if location.contains('/') => return None,
        None => location,
    };
    let id = id.trim();
    (!id.is_empty()).then_some(id)
}

pub struct Controller<A: RecipeApi, V: View> {
    api: Arc<A>,
    view: V,
    storage: Rc<dyn Storage>,
    results_per_page: usize,
    state: AppState,
    searches: Sequence,
    recipes: Sequence,
}

impl<A: RecipeApi, V: View> Controller<A, V> {
    pub fn new(api: Arc<A>, view: V, storage: Rc<dyn Storage>) -> Self {
        Self {
            api,
            view,
            storage,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            state: AppState::default(),
            searches: Sequence::default(),
            recipes: Sequence::default(),
        }
    }

    pub fn with_results_per_page(mut self, results_per_page: usize) -> Self {
        self.results_per_page = results_per_page.max(1);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Shared handle to the API, for running tasks outside the controller.
    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    /// Dispatch, run the resulting fetch if any, and apply it.
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        if let Some(task) = self.dispatch(event)? {
            let api = self.api();
            let completion = task.run(api.as_ref()).await;
            self.complete(completion);
        }
        Ok(())
    }

    /// Apply an event. Returns the fetch it started, if any.
    ///
    /// Events that need a model which doesn't exist yet fail with
    /// [`BrowserError::MissingState`] and change nothing.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<Task>> {
        debug!("dispatching {:?}", event);
        match event {
            Event::Load { location } => {
                self.control_load();
                Ok(self.control_recipe(&location))
            }
            Event::HashChange { location } => Ok(self.control_recipe(&location)),
            Event::SearchSubmitted(query) => Ok(self.control_search(&query)),
            Event::PageRequested(page) => {
                if self.state.search.is_none() {
                    return Err(BrowserError::MissingState("search"));
                }
                self.view.clear_results();
                self.render_results(page)?;
                Ok(None)
            }
            Event::Servings(direction) => {
                self.control_servings(direction)?;
                Ok(None)
            }
            Event::AddToList => {
                self.control_list()?;
                Ok(None)
            }
            Event::DeleteItem(id) => {
                let list = self
                    .state
                    .list
                    .as_mut()
                    .ok_or(BrowserError::MissingState("shopping list"))?;
                if list.delete_item(&id).is_some() {
                    self.view.delete_item(&id);
                }
                Ok(None)
            }
            Event::UpdateCount(id, count) => {
                let list = self
                    .state
                    .list
                    .as_mut()
                    .ok_or(BrowserError::MissingState("shopping list"))?;
                list.update_count(&id, count)?;
                if let Some(item) = list.get(&id) {
                    self.view.update_item_count(item);
                }
                Ok(None)
            }
            Event::ToggleLike => {
                self.control_like()?;
                Ok(None)
            }
        }
    }

    /// Apply a finished fetch. Results for superseded requests are dropped.
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Search { ticket, result } => {
                if !self.searches.is_current(ticket) {
                    debug!("discarding stale search results ({:?})", ticket);
                    return;
                }
                self.view.clear_loader();
                match result {
                    Ok(recipes) => {
                        let Some(search) = self.state.search.as_mut() else {
                            warn!("search results arrived without a search");
                            return;
                        };
                        info!("{} recipes found for {:?}", recipes.len(), search.query);
                        search.result = recipes;
                        if let Err(err) = self.render_results(1) {
                            warn!("{}", err);
                        }
                    }
                    Err(err) => {
                        error!("search failed: {}", err);
                        self.view
                            .alert(&format!("Something went wrong with the search: {err}"));
                    }
                }
            }
            Completion::Recipe { ticket, result } => {
                if !self.recipes.is_current(ticket) {
                    debug!("discarding stale recipe ({:?})", ticket);
                    return;
                }
                self.view.clear_loader();
                let Some(recipe) = self.state.recipe.as_mut() else {
                    warn!("recipe data arrived without a recipe");
                    return;
                };
                match result {
                    Ok(data) => {
                        recipe.populate(data);
                        recipe.parse_ingredients();
                        recipe.calc_time();
                        recipe.calc_servings();

                        let liked = self
                            .state
                            .likes
                            .as_ref()
                            .is_some_and(|likes| likes.is_liked(&recipe.id).is_some());
                        self.view.render_recipe(recipe, liked);
                    }
                    Err(err) => {
                        // The bare recipe stays in place; the next navigation replaces it
                        error!("error processing recipe {}: {}", recipe.id, err);
                        self.view.alert(&format!("Error processing recipe! {err}"));
                    }
                }
            }
        }
    }

    fn control_load(&mut self) {
        let mut likes = Likes::new(Rc::clone(&self.storage));
        likes.read_storage();

        self.view.toggle_like_menu(likes.num_likes() > 0);
        for like in likes.likes() {
            self.view.render_like(like);
        }
        self.state.likes = Some(likes);
    }

    fn control_search(&mut self, query: &str) -> Option<Task> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.state.search = Some(Search::new(query));
        self.view.clear_results();
        self.view.render_loader(Region::Results);

        Some(Task::Search {
            ticket: self.searches.issue(),
            query: query.to_string(),
        })
    }

    fn control_recipe(&mut self, location: &str) -> Option<Task> {
        let id = fragment_id(location)?;

        self.view.clear_recipe();
        self.view.render_loader(Region::Recipe);
        if self.state.search.is_some() {
            self.view.highlight_selected(id);
        }

        self.state.recipe = Some(Recipe::new(id));
        Some(Task::Recipe {
            ticket: self.recipes.issue(),
            id: id.to_string(),
        })
    }

    fn control_servings(&mut self, direction: Direction) -> Result<()> {
        let recipe = self
            .state
            .recipe
            .as_mut()
            .ok_or(BrowserError::MissingState("recipe"))?;
        if recipe.update_servings(direction) {
            self.view.update_servings_ingredients(recipe);
        }
        Ok(())
    }

    fn control_list(&mut self) -> Result<()> {
        let recipe = self
            .state
            .recipe
            .as_ref()
            .ok_or(BrowserError::MissingState("recipe"))?;
        let list = self.state.list.get_or_insert_with(ShoppingList::new);

        for ingredient in recipe.parsed_ingredients() {
            let item = list.add_item(
                ingredient.count,
                ingredient.unit.clone(),
                ingredient.ingredient.clone(),
            );
            self.view.render_item(&item);
        }
        Ok(())
    }

    fn control_like(&mut self) -> Result<()> {
        let recipe = self
            .state
            .recipe
            .as_ref()
            .filter(|recipe| recipe.is_loaded())
            .ok_or(BrowserError::MissingState("recipe"))?;
        let storage = &self.storage;
        let likes = self.state.likes.get_or_insert_with(|| {
            let mut likes = Likes::new(Rc::clone(storage));
            likes.read_storage();
            likes
        });

        if likes.is_liked(&recipe.id).is_none() {
            let like = likes.add_like(
                recipe.id.clone(),
                recipe.title.clone(),
                recipe.author.clone(),
                recipe.img.clone(),
            )?;
            self.view.toggle_like_btn(true);
            self.view.render_like(&like);
        } else {
            likes.delete_like(&recipe.id)?;
            self.view.toggle_like_btn(false);
            self.view.delete_like(&recipe.id);
        }

        self.view.toggle_like_menu(likes.num_likes() > 0);
        Ok(())
    }

    fn render_results(&mut self, page: usize) -> Result<()> {
        let search = self
            .state
            .search
            .as_ref()
            .ok_or(BrowserError::MissingState("search"))?;
        self.view
            .render_results(&paginate(&search.result, page, self.results_per_page));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#47746"), Some("47746"));
        assert_eq!(fragment_id("http://localhost:8080/#47746"), Some("47746"));
        assert_eq!(fragment_id("47746"), Some("47746"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id(""), None);
        assert_eq!(fragment_id("http://localhost:8080/"), None);
        assert_eq!(fragment_id("http://localhost:8080/path"), None);
    }

    #[test]
    fn test_sequence_tracks_latest_ticket() {
        let mut seq = Sequence::default();
        let first = seq.issue();
        assert!(seq.is_current(first));
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
