//! Catalog service implementing the menu driving ports.
//!
//! Validates admin drafts, maps repository failures onto domain errors and
//! discards orphaned images once an edit settles.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AdminCatalog, CategoryRepository, CategoryRepositoryError, ImageStore, MenuCommand,
    MenuItemRepository, MenuItemRepositoryError, MenuQuery,
};
use crate::domain::{
    Category, CategoryDraft, CategoryFields, CategoryId, CategoryValidationError, Error, ImageRef,
    MenuItem, MenuItemDraft, MenuItemFields, MenuItemId, MenuItemValidationError, PublicMenu,
    effective_is_drink,
};

/// Menu service backed by category and item repositories.
#[derive(Clone)]
pub struct MenuService<C, I> {
    categories: Arc<C>,
    items: Arc<I>,
    images: Arc<dyn ImageStore>,
}

impl<C, I> MenuService<C, I> {
    /// Create a service over the given repositories and image store.
    pub fn new(categories: Arc<C>, items: Arc<I>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            categories,
            items,
            images,
        }
    }

    /// Discard `image` unless it is still referenced as `kept`.
    async fn discard_orphan(&self, image: Option<&ImageRef>, kept: Option<&ImageRef>) {
        let Some(image) = image else {
            return;
        };
        if Some(image) == kept {
            return;
        }
        if let Err(err) = self.images.discard(image).await {
            warn!(image = %image, error = %err, "failed to discard orphaned image");
        }
    }
}

fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::NotFound { id } => category_not_found(id),
        CategoryRepositoryError::NotEmpty { id, item_count } => Error::conflict(format!(
            "category {id} still contains menu items"
        ))
        .with_details(json!({
            "code": "category_not_empty",
            "categoryId": id,
            "itemCount": item_count,
        })),
        CategoryRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("category name '{name}' is already taken")).with_details(
                json!({
                    "code": "duplicate_category_name",
                    "field": "name",
                    "value": name,
                }),
            )
        }
    }
}

fn map_item_error(error: MenuItemRepositoryError) -> Error {
    match error {
        MenuItemRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("menu item repository unavailable: {message}"))
        }
        MenuItemRepositoryError::Query { message } => {
            Error::internal(format!("menu item repository error: {message}"))
        }
        MenuItemRepositoryError::NotFound { id } => item_not_found(id),
        MenuItemRepositoryError::CategoryMissing { id } => category_not_found(id)
            .with_details(json!({ "field": "categoryId", "categoryId": id })),
    }
}

fn category_not_found(id: CategoryId) -> Error {
    Error::not_found(format!("category {id} not found"))
}

fn item_not_found(id: MenuItemId) -> Error {
    Error::not_found(format!("menu item {id} not found"))
}

fn category_validation_error(error: &CategoryValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": "invalid_category",
    }))
}

fn item_validation_error(error: &MenuItemValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": "invalid_menu_item",
    }))
}

/// Overwrite the cached drink flag with the category's.
fn with_effective_drink(mut item: MenuItem, category: Option<&Category>) -> MenuItem {
    if let Some(category) = category {
        item.is_drink = effective_is_drink(&item, category);
    }
    item
}

impl<C, I> MenuService<C, I>
where
    C: CategoryRepository,
    I: MenuItemRepository,
{
    async fn existing_category(&self, id: CategoryId) -> Result<Category, Error> {
        self.categories
            .find(id)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| category_not_found(id))
    }

    async fn existing_item(&self, id: MenuItemId) -> Result<MenuItem, Error> {
        self.items
            .find(id)
            .await
            .map_err(map_item_error)?
            .ok_or_else(|| item_not_found(id))
    }
}

#[async_trait]
impl<C, I> MenuCommand for MenuService<C, I>
where
    C: CategoryRepository,
    I: MenuItemRepository,
{
    async fn create_category(&self, draft: CategoryDraft) -> Result<Category, Error> {
        let fields =
            CategoryFields::try_from(draft).map_err(|err| category_validation_error(&err))?;
        match self.categories.create(&fields).await {
            Ok(category) => {
                info!(category_id = %category.id, name = %category.name, "category created");
                Ok(category)
            }
            Err(err) => {
                self.discard_orphan(fields.image.as_ref(), None).await;
                Err(map_category_error(err))
            }
        }
    }

    async fn update_category(
        &self,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, Error> {
        let fields =
            CategoryFields::try_from(draft).map_err(|err| category_validation_error(&err))?;
        let previous = self.existing_category(id).await?;
        match self.categories.update(id, &fields).await {
            Ok(category) => {
                if previous.is_drink_category != category.is_drink_category {
                    info!(
                        category_id = %id,
                        is_drink = category.is_drink_category,
                        "category drink flag changed; item flags rewritten"
                    );
                }
                info!(category_id = %id, "category updated");
                self.discard_orphan(previous.image.as_ref(), category.image.as_ref())
                    .await;
                Ok(category)
            }
            Err(err) => {
                self.discard_orphan(fields.image.as_ref(), previous.image.as_ref())
                    .await;
                Err(map_category_error(err))
            }
        }
    }

    async fn set_category_active(&self, id: CategoryId, active: bool) -> Result<Category, Error> {
        let category = self
            .categories
            .set_active(id, active)
            .await
            .map_err(map_category_error)?;
        info!(category_id = %id, active, "category visibility changed");
        Ok(category)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), Error> {
        let removed = self
            .categories
            .delete(id)
            .await
            .map_err(map_category_error)?;
        info!(category_id = %id, "category deleted");
        self.discard_orphan(removed.image.as_ref(), None).await;
        Ok(())
    }

    async fn create_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, Error> {
        let fields = MenuItemFields::try_from(draft).map_err(|err| item_validation_error(&err))?;
        match self.items.create(&fields).await {
            Ok(item) => {
                info!(item_id = %item.id, category_id = %item.category_id, "menu item created");
                Ok(item)
            }
            Err(err) => {
                self.discard_orphan(fields.image.as_ref(), None).await;
                Err(map_item_error(err))
            }
        }
    }

    async fn update_menu_item(
        &self,
        id: MenuItemId,
        draft: MenuItemDraft,
    ) -> Result<MenuItem, Error> {
        let fields = MenuItemFields::try_from(draft).map_err(|err| item_validation_error(&err))?;
        let previous = self.existing_item(id).await?;
        match self.items.update(id, &fields).await {
            Ok(item) => {
                info!(item_id = %id, "menu item updated");
                self.discard_orphan(previous.image.as_ref(), item.image.as_ref())
                    .await;
                Ok(item)
            }
            Err(err) => {
                self.discard_orphan(fields.image.as_ref(), previous.image.as_ref())
                    .await;
                Err(map_item_error(err))
            }
        }
    }

    async fn set_menu_item_active(&self, id: MenuItemId, active: bool) -> Result<MenuItem, Error> {
        let item = self
            .items
            .set_active(id, active)
            .await
            .map_err(map_item_error)?;
        info!(item_id = %id, active, "menu item visibility changed");
        Ok(item)
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), Error> {
        let removed = self.items.delete(id).await.map_err(map_item_error)?;
        info!(item_id = %id, "menu item deleted");
        self.discard_orphan(removed.image.as_ref(), None).await;
        Ok(())
    }
}

#[async_trait]
impl<C, I> MenuQuery for MenuService<C, I>
where
    C: CategoryRepository,
    I: MenuItemRepository,
{
    async fn public_menu(&self) -> Result<PublicMenu, Error> {
        let categories = self.categories.list().await.map_err(map_category_error)?;
        let items = self.items.list().await.map_err(map_item_error)?;
        Ok(PublicMenu::assemble(categories, items))
    }

    async fn admin_catalog(&self) -> Result<AdminCatalog, Error> {
        let categories = self.categories.list().await.map_err(map_category_error)?;
        let items = self.items.list().await.map_err(map_item_error)?;
        let by_id: HashMap<CategoryId, &Category> =
            categories.iter().map(|category| (category.id, category)).collect();
        let items = items
            .into_iter()
            .map(|item| {
                let category = by_id.get(&item.category_id).copied();
                with_effective_drink(item, category)
            })
            .collect();
        Ok(AdminCatalog { categories, items })
    }

    async fn category(&self, id: CategoryId) -> Result<Category, Error> {
        self.existing_category(id).await
    }

    async fn menu_item(&self, id: MenuItemId) -> Result<MenuItem, Error> {
        let item = self.existing_item(id).await?;
        let category = self
            .categories
            .find(item.category_id)
            .await
            .map_err(map_category_error)?;
        Ok(with_effective_drink(item, category.as_ref()))
    }
}

#[cfg(test)]
#[path = "menu_service_tests.rs"]
mod tests;
