//! Driving port for catalog reads.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, Error, MenuItem, MenuItemId, PublicMenu};

/// Every category and item, inactive ones included, for the admin editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminCatalog {
    /// Ordered by display order then identifier.
    pub categories: Vec<Category>,
    /// Ordered by display order then identifier.
    pub items: Vec<MenuItem>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuQuery: Send + Sync {
    /// Visible items grouped into food and drink sections.
    async fn public_menu(&self) -> Result<PublicMenu, Error>;

    async fn admin_catalog(&self) -> Result<AdminCatalog, Error>;

    async fn category(&self, id: CategoryId) -> Result<Category, Error>;

    async fn menu_item(&self, id: MenuItemId) -> Result<MenuItem, Error>;
}
