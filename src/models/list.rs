use log::debug;
use uuid::Uuid;

use crate::error::{BrowserError, Result};
use crate::model::ShoppingListItem;

/// Ordered shopping list. Items are addressed by the id handed out on insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(
        &mut self,
        count: Option<f64>,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> ShoppingListItem {
        let item = ShoppingListItem {
            id: Uuid::new_v4().to_string(),
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        };
        self.items.push(item.clone());
        item
    }

    /// Remove an item. Unknown ids are ignored.
    pub fn delete_item(&mut self, id: &str) -> Option<ShoppingListItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Overwrite an item's count. Unknown ids are ignored; negative counts are rejected.
    pub fn update_count(&mut self, id: &str, count: f64) -> Result<()> {
        if !count.is_finite() || count < 0.0 {
            return Err(BrowserError::Validation(format!(
                "count must be a non-negative number, got {count}"
            )));
        }
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => item.count = Some(count),
            None => debug!("no shopping list item {}", id),
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_add_item_returns_fresh_ids() {
        let mut list = ShoppingList::new();
        let ids: HashSet<String> = (0..50)
            .map(|i| list.add_item(Some(i as f64), "g", "butter").id)
            .collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(list.len(), 50);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut list = ShoppingList::new();
        list.add_item(Some(2.0), "cup", "flour");

        assert!(list.delete_item("missing").is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_delete_keeps_order() {
        let mut list = ShoppingList::new();
        let a = list.add_item(Some(1.0), "", "apple");
        let b = list.add_item(Some(2.0), "", "banana");
        let c = list.add_item(Some(3.0), "", "cherry");

        assert_eq!(list.delete_item(&b.id), Some(b));
        let names: Vec<&str> = list.items().iter().map(|i| i.ingredient.as_str()).collect();
        assert_eq!(names, ["apple", "cherry"]);
        assert_eq!(list.get(&a.id).unwrap().ingredient, "apple");
        assert_eq!(list.get(&c.id).unwrap().ingredient, "cherry");
    }

    #[test]
    fn test_update_count() {
        let mut list = ShoppingList::new();
        let item = list.add_item(None, "", "salt");

        list.update_count(&item.id, 3.5).unwrap();
        assert_eq!(list.get(&item.id).unwrap().count, Some(3.5));
    }

    #[test]
    fn test_update_unknown_id_is_silent() {
        let mut list = ShoppingList::new();
        assert!(list.update_count("missing", 1.0).is_ok());
        assert!(list.is_empty());
    }

    #[test]
    fn test_update_rejects_negative_and_nan() {
        let mut list = ShoppingList::new();
        let item = list.add_item(Some(1.0), "", "egg");

        assert!(matches!(
            list.update_count(&item.id, -1.0),
            Err(BrowserError::Validation(_))
        ));
        assert!(list.update_count(&item.id, f64::NAN).is_err());
        assert_eq!(list.get(&item.id).unwrap().count, Some(1.0));
    }
}
