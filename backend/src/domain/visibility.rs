//! Public visibility of menu items.
//!
//! An item is shown only when it and its category are both active. The drink
//! flag always comes from the category; the item's cached copy is ignored.

use std::collections::HashMap;

use tracing::debug;

use super::{Category, CategoryId, MenuItem};

/// `true` when `item` may appear on the public menu.
///
/// A missing category hides the item.
pub fn is_publicly_visible(item: &MenuItem, category: Option<&Category>) -> bool {
    item.active && category.is_some_and(|category| category.active)
}

/// Drink classification of `item`, derived from its category.
pub fn effective_is_drink(_item: &MenuItem, category: &Category) -> bool {
    category.is_drink_category
}

/// A category with its visible items, both in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// The public menu split into food and drink sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicMenu {
    pub food: Vec<MenuSection>,
    pub drinks: Vec<MenuSection>,
}

impl PublicMenu {
    /// Group visible items under their active categories.
    ///
    /// Sections and items are ordered by display order, then identifier.
    /// Categories without visible items are left out.
    pub fn assemble(categories: Vec<Category>, items: Vec<MenuItem>) -> Self {
        let by_id: HashMap<CategoryId, &Category> =
            categories.iter().map(|category| (category.id, category)).collect();

        let mut grouped: HashMap<CategoryId, Vec<MenuItem>> = HashMap::new();
        for item in items {
            let category = by_id.get(&item.category_id).copied();
            if !is_publicly_visible(&item, category) {
                continue;
            }
            if let Some(category) = category
                && item.is_drink != effective_is_drink(&item, category)
            {
                debug!(
                    item_id = %item.id,
                    category_id = %category.id,
                    "cached drink flag disagrees with category"
                );
            }
            grouped.entry(item.category_id).or_default().push(item);
        }

        let mut ordered: Vec<&Category> = categories.iter().filter(|c| c.active).collect();
        ordered.sort_by_key(|category| (category.display_order, category.id));

        let mut menu = Self::default();
        for category in ordered {
            let Some(mut items) = grouped.remove(&category.id) else {
                continue;
            };
            items.sort_by_key(|item| (item.display_order, item.id));
            let section = MenuSection {
                category: category.clone(),
                items,
            };
            if category.is_drink_category {
                menu.drinks.push(section);
            } else {
                menu.food.push(section);
            }
        }
        menu
    }

    /// `true` when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.food.is_empty() && self.drinks.is_empty()
    }
}
