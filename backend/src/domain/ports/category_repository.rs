//! Port for menu category persistence.

use async_trait::async_trait;

use crate::domain::{Category, CategoryFields, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
        /// No category has this identifier.
        NotFound { id: CategoryId } => "category {id} does not exist",
        /// Deletion refused because items still reference the category.
        NotEmpty { id: CategoryId, item_count: i64 } =>
            "category {id} still owns {item_count} menu items",
        /// Another category already uses this slug.
        DuplicateName { name: String } => "category name '{name}' is already taken",
    }
}

/// Storage for menu categories.
///
/// Every method is a single transaction: all changes commit or none do.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ordered by display order then identifier.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch one category.
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Number of stored categories.
    async fn count(&self) -> Result<i64, CategoryRepositoryError>;

    /// Insert a category and return it with its new identifier.
    async fn create(&self, fields: &CategoryFields) -> Result<Category, CategoryRepositoryError>;

    /// Replace every field of an existing category.
    ///
    /// When the drink flag changes, the cached `is_drink` of all items in the
    /// category is rewritten in the same transaction.
    async fn update(
        &self,
        id: CategoryId,
        fields: &CategoryFields,
    ) -> Result<Category, CategoryRepositoryError>;

    /// Toggle the `active` flag only.
    async fn set_active(
        &self,
        id: CategoryId,
        active: bool,
    ) -> Result<Category, CategoryRepositoryError>;

    /// Delete an empty category and return the removed record.
    ///
    /// Fails with [`CategoryRepositoryError::NotEmpty`] while any item still
    /// references it; the emptiness check and the delete share a transaction.
    async fn delete(&self, id: CategoryId) -> Result<Category, CategoryRepositoryError>;
}
