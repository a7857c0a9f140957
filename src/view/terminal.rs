use std::fmt;
use std::io::Write;

use log::warn;

use crate::model::{LikeEntry, RecipeSummary, ShoppingListItem};
use crate::models::Recipe;
use crate::view::{format_count, limit_title, Page, Region, View};

const TITLE_LIMIT: usize = 17;

/// Plain-text renderer writing to any [`Write`], normally stdout.
pub struct TerminalView<W: Write> {
    out: W,
    selected: Option<String>,
    likes_menu_visible: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            selected: None,
            likes_menu_visible: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{args}") {
            warn!("failed to write to terminal: {}", err);
        }
    }

    fn ingredient_lines(&mut self, recipe: &Recipe) {
        for ingredient in recipe.parsed_ingredients() {
            let count = format_count(ingredient.count);
            let unit = if ingredient.unit.is_empty() {
                String::new()
            } else {
                format!(" {}", ingredient.unit)
            };
            self.line(format_args!("  • {count}{unit} {}", ingredient.ingredient));
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn clear_results(&mut self) {}

    fn render_loader(&mut self, region: Region) {
        match region {
            Region::Results => self.line(format_args!("Searching...")),
            Region::Recipe => self.line(format_args!("Loading recipe...")),
        }
    }

    fn clear_loader(&mut self) {}

    fn render_results(&mut self, page: &Page<'_, RecipeSummary>) {
        if page.items.is_empty() {
            self.line(format_args!("No recipes found."));
            return;
        }

        for summary in page.items {
            let marker = if self.selected.as_deref() == Some(summary.id.as_str()) {
                '>'
            } else {
                ' '
            };
            let title = limit_title(&summary.title, TITLE_LIMIT);
            self.line(format_args!(
                "{marker} #{:<8} {title} ({})",
                summary.id, summary.author
            ));
        }

        let mut footer = format!("Page {}/{}", page.current, page.pages);
        if let Some(prev) = page.prev() {
            footer.push_str(&format!("  [page {prev}] <-"));
        }
        if let Some(next) = page.next() {
            footer.push_str(&format!("  -> [page {next}]"));
        }
        self.line(format_args!("{footer}"));
    }

    fn highlight_selected(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }

    fn clear_recipe(&mut self) {}

    fn render_recipe(&mut self, recipe: &Recipe, liked: bool) {
        let heart = if liked { "♥" } else { "♡" };
        self.line(format_args!(""));
        self.line(format_args!("{heart} {} by {}", recipe.title, recipe.author));
        self.line(format_args!(
            "  {} minutes, {} servings",
            recipe.time(),
            recipe.servings()
        ));
        self.ingredient_lines(recipe);
        if !recipe.url.is_empty() {
            self.line(format_args!("  Directions: {}", recipe.url));
        }
    }

    fn update_servings_ingredients(&mut self, recipe: &Recipe) {
        self.line(format_args!("{} servings", recipe.servings()));
        self.ingredient_lines(recipe);
    }

    fn render_item(&mut self, item: &ShoppingListItem) {
        let count = format_count(item.count);
        self.line(format_args!(
            "+ [{}] {count} {} {}",
            item.id, item.unit, item.ingredient
        ));
    }

    fn delete_item(&mut self, id: &str) {
        self.line(format_args!("- [{id}] removed"));
    }

    fn update_item_count(&mut self, item: &ShoppingListItem) {
        let count = format_count(item.count);
        self.line(format_args!("= [{}] {count} {}", item.id, item.ingredient));
    }

    fn toggle_like_btn(&mut self, liked: bool) {
        if liked {
            self.line(format_args!("♥ Liked"));
        } else {
            self.line(format_args!("♡ Unliked"));
        }
    }

    fn render_like(&mut self, like: &LikeEntry) {
        let title = limit_title(&like.title, TITLE_LIMIT);
        self.line(format_args!("♥ #{} {title} ({})", like.id, like.author));
    }

    fn delete_like(&mut self, id: &str) {
        self.line(format_args!("♡ #{id} removed from likes"));
    }

    fn toggle_like_menu(&mut self, visible: bool) {
        if visible != self.likes_menu_visible {
            self.likes_menu_visible = visible;
            if !visible {
                self.line(format_args!("No liked recipes yet."));
            }
        }
    }

    fn alert(&mut self, message: &str) {
        self.line(format_args!("! {message}"));
    }
}
