//! Rendering side of the browser. The controller tells a [`View`] what changed;
//! the view decides how it looks.

mod terminal;

use crate::model::{LikeEntry, RecipeSummary, ShoppingListItem};
use crate::models::Recipe;

pub use terminal::TerminalView;

/// Screen areas that can show a loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Results,
    Recipe,
}

pub trait View {
    fn clear_results(&mut self);
    fn render_loader(&mut self, region: Region);
    fn clear_loader(&mut self);
    fn render_results(&mut self, page: &Page<'_, RecipeSummary>);
    fn highlight_selected(&mut self, id: &str);
    fn clear_recipe(&mut self);
    fn render_recipe(&mut self, recipe: &Recipe, liked: bool);
    fn update_servings_ingredients(&mut self, recipe: &Recipe);
    fn render_item(&mut self, item: &ShoppingListItem);
    fn delete_item(&mut self, id: &str);
    fn update_item_count(&mut self, item: &ShoppingListItem);
    fn toggle_like_btn(&mut self, liked: bool);
    fn render_like(&mut self, like: &LikeEntry);
    fn delete_like(&mut self, id: &str);
    fn toggle_like_menu(&mut self, visible: bool);
    /// Blocking, user-facing error message.
    fn alert(&mut self, message: &str);
}

/// One page of search results.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based
    pub current: usize,
    pub pages: usize,
}

impl<T> Page<'_, T> {
    /// Target of the "previous page" button, if shown.
    pub fn prev(&self) -> Option<usize> {
        (self.current > 1).then(|| self.current - 1)
    }

    /// Target of the "next page" button, if shown.
    pub fn next(&self) -> Option<usize> {
        (self.current < self.pages).then(|| self.current + 1)
    }
}

/// Slice `items` into the 1-based `page`, clamped to the pages that exist.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let pages = items.len().div_ceil(per_page);
    let current = page.clamp(1, pages.max(1));
    let start = ((current - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());

    Page {
        items: &items[start..end],
        current,
        pages,
    }
}

/// Shorten a title to whole words fitting in `limit` characters.
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut kept = Vec::new();
    let mut length = 0;
    for word in title.split_whitespace() {
        let word_len = word.chars().count();
        if length + word_len > limit {
            break;
        }
        length += word_len;
        kept.push(word);
    }

    if kept.is_empty() {
        let cut: String = title.chars().take(limit).collect();
        return format!("{cut} ...");
    }
    format!("{} ...", kept.join(" "))
}

/// Render a count as a kitchen-friendly number: `2`, `3/4`, `1 1/2`.
pub fn format_count(count: Option<f64>) -> String {
    let Some(count) = count else {
        return "?".to_string();
    };

    let mut whole = count.trunc();
    let fraction = count - whole;
    if fraction < 1e-6 {
        return format!("{}", whole as u64);
    }
    if 1.0 - fraction < 1e-6 {
        whole += 1.0;
        return format!("{}", whole as u64);
    }

    match nearest_fraction(fraction) {
        Some((n, d)) if whole == 0.0 => format!("{n}/{d}"),
        Some((n, d)) => format!("{} {n}/{d}", whole as u64),
        None => {
            let decimal = format!("{count:.2}");
            decimal.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

fn nearest_fraction(x: f64) -> Option<(u32, u32)> {
    (2..=16u32).find_map(|d| {
        let n = (x * f64::from(d)).round() as u32;
        let close = (f64::from(n) / f64::from(d) - x).abs() < 1e-3;
        (n > 0 && n < d && close).then_some((n, d))
    })
}
