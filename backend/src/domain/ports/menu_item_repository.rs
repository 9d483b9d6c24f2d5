//! Port for menu item persistence.

use async_trait::async_trait;

use crate::domain::{CategoryId, MenuItem, MenuItemFields, MenuItemId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by menu item repository adapters.
    pub enum MenuItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "menu item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "menu item repository query failed: {message}",
        /// No item has this identifier.
        NotFound { id: MenuItemId } => "menu item {id} does not exist",
        /// The referenced category does not exist.
        CategoryMissing { id: CategoryId } => "category {id} does not exist",
    }
}

/// Storage for menu items.
///
/// Create and update copy `is_drink` from the owning category inside the same
/// transaction, so the cached flag never drifts on write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// All items, ordered by display order then identifier.
    async fn list(&self) -> Result<Vec<MenuItem>, MenuItemRepositoryError>;

    /// Fetch one item.
    async fn find(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuItemRepositoryError>;

    /// Insert an item and return it with its new identifier.
    async fn create(&self, fields: &MenuItemFields) -> Result<MenuItem, MenuItemRepositoryError>;

    /// Replace every field of an existing item.
    async fn update(
        &self,
        id: MenuItemId,
        fields: &MenuItemFields,
    ) -> Result<MenuItem, MenuItemRepositoryError>;

    /// Toggle the `active` flag only.
    async fn set_active(
        &self,
        id: MenuItemId,
        active: bool,
    ) -> Result<MenuItem, MenuItemRepositoryError>;

    /// Delete an item and return the removed record.
    async fn delete(&self, id: MenuItemId) -> Result<MenuItem, MenuItemRepositoryError>;
}
