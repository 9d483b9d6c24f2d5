//! Driving port for catalog edits.

use async_trait::async_trait;

use crate::domain::{
    Category, CategoryDraft, CategoryId, Error, MenuItem, MenuItemDraft, MenuItemId,
};

/// Admin mutations on categories and menu items.
///
/// Drafts are validated by the implementation; validation failures surface
/// as `invalid_request` errors with the offending field in the details.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCommand: Send + Sync {
    async fn create_category(&self, draft: CategoryDraft) -> Result<Category, Error>;

    async fn update_category(&self, id: CategoryId, draft: CategoryDraft)
    -> Result<Category, Error>;

    async fn set_category_active(&self, id: CategoryId, active: bool) -> Result<Category, Error>;

    /// Delete a category that owns no items; a non-empty category is a
    /// conflict and nothing changes.
    async fn delete_category(&self, id: CategoryId) -> Result<(), Error>;

    async fn create_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, Error>;

    async fn update_menu_item(&self, id: MenuItemId, draft: MenuItemDraft)
    -> Result<MenuItem, Error>;

    async fn set_menu_item_active(&self, id: MenuItemId, active: bool) -> Result<MenuItem, Error>;

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), Error>;
}
