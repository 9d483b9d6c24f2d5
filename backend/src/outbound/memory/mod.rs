//! In-process catalog store.
//!
//! Implements every repository port over one mutex-guarded state, so each
//! port call is a single critical section: it applies completely or not at
//! all. Used when no database URL is configured and by the HTTP tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    AdminAccountRepository, AdminAccountRepositoryError, CategoryRepository,
    CategoryRepositoryError, MenuItemRepository, MenuItemRepositoryError, OpeningHoursRepository,
    OpeningHoursRepositoryError,
};
use crate::domain::{
    AdminAccount, AdminId, Category, CategoryFields, CategoryId, MenuItem, MenuItemFields,
    MenuItemId, OpeningHours,
};

#[derive(Debug, Default)]
struct CatalogState {
    admins: Vec<AdminAccount>,
    categories: BTreeMap<CategoryId, Category>,
    items: BTreeMap<MenuItemId, MenuItem>,
    hours: Vec<OpeningHours>,
    last_id: i32,
}

impl CatalogState {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn name_taken(&self, name: &str, except: Option<CategoryId>) -> bool {
        self.categories
            .values()
            .any(|category| category.name.as_str() == name && Some(category.id) != except)
    }
}

/// Mutex-guarded store implementing all catalog repository ports.
///
/// # Examples
/// ```
/// use menuboard::domain::ports::CategoryRepository;
/// use menuboard::outbound::memory::InMemoryCatalogStore;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryCatalogStore::new();
/// assert_eq!(store.count().await?, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        // Critical sections never panic between writes, so a poisoned guard
        // still holds consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Collect and sort by `(display_order, id)`.
fn ordered<T>(values: impl Iterator<Item = T>, key: impl FnMut(&T) -> (i32, i32)) -> Vec<T> {
    let mut list: Vec<T> = values.collect();
    list.sort_by_key(key);
    list
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogStore {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let state = self.state();
        Ok(ordered(state.categories.values().cloned(), |category| {
            (category.display_order, category.id.get())
        }))
    }

    async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(self.state().categories.get(&id).cloned())
    }

    async fn count(&self) -> Result<i64, CategoryRepositoryError> {
        Ok(i64::try_from(self.state().categories.len()).unwrap_or(i64::MAX))
    }

    async fn create(&self, fields: &CategoryFields) -> Result<Category, CategoryRepositoryError> {
        let mut state = self.state();
        if state.name_taken(fields.name.as_str(), None) {
            return Err(CategoryRepositoryError::duplicate_name(fields.name.as_str()));
        }
        let id = CategoryId::new(state.next_id());
        let category = Category::from_fields(id, fields.clone());
        state.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: CategoryId,
        fields: &CategoryFields,
    ) -> Result<Category, CategoryRepositoryError> {
        let mut state = self.state();
        if !state.categories.contains_key(&id) {
            return Err(CategoryRepositoryError::not_found(id));
        }
        if state.name_taken(fields.name.as_str(), Some(id)) {
            return Err(CategoryRepositoryError::duplicate_name(fields.name.as_str()));
        }
        let category = Category::from_fields(id, fields.clone());
        for item in state.items.values_mut() {
            if item.category_id == id {
                item.is_drink = category.is_drink_category;
            }
        }
        state.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn set_active(
        &self,
        id: CategoryId,
        active: bool,
    ) -> Result<Category, CategoryRepositoryError> {
        let mut state = self.state();
        let category = state
            .categories
            .get_mut(&id)
            .ok_or_else(|| CategoryRepositoryError::not_found(id))?;
        category.active = active;
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> Result<Category, CategoryRepositoryError> {
        let mut state = self.state();
        let item_count = state
            .items
            .values()
            .filter(|item| item.category_id == id)
            .count();
        if !state.categories.contains_key(&id) {
            return Err(CategoryRepositoryError::not_found(id));
        }
        if item_count > 0 {
            return Err(CategoryRepositoryError::not_empty(
                id,
                i64::try_from(item_count).unwrap_or(i64::MAX),
            ));
        }
        state
            .categories
            .remove(&id)
            .ok_or_else(|| CategoryRepositoryError::not_found(id))
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryCatalogStore {
    async fn list(&self) -> Result<Vec<MenuItem>, MenuItemRepositoryError> {
        let state = self.state();
        Ok(ordered(state.items.values().cloned(), |item| {
            (item.display_order, item.id.get())
        }))
    }

    async fn find(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuItemRepositoryError> {
        Ok(self.state().items.get(&id).cloned())
    }

    async fn create(&self, fields: &MenuItemFields) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut state = self.state();
        let is_drink = state
            .categories
            .get(&fields.category_id)
            .map(|category| category.is_drink_category)
            .ok_or_else(|| MenuItemRepositoryError::category_missing(fields.category_id))?;
        let id = MenuItemId::new(state.next_id());
        let item = MenuItem::from_fields(id, fields.clone(), is_drink);
        state.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: MenuItemId,
        fields: &MenuItemFields,
    ) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut state = self.state();
        let is_drink = state
            .categories
            .get(&fields.category_id)
            .map(|category| category.is_drink_category)
            .ok_or_else(|| MenuItemRepositoryError::category_missing(fields.category_id))?;
        let slot = state
            .items
            .get_mut(&id)
            .ok_or_else(|| MenuItemRepositoryError::not_found(id))?;
        *slot = MenuItem::from_fields(id, fields.clone(), is_drink);
        Ok(slot.clone())
    }

    async fn set_active(
        &self,
        id: MenuItemId,
        active: bool,
    ) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut state = self.state();
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| MenuItemRepositoryError::not_found(id))?;
        item.active = active;
        Ok(item.clone())
    }

    async fn delete(&self, id: MenuItemId) -> Result<MenuItem, MenuItemRepositoryError> {
        self.state()
            .items
            .remove(&id)
            .ok_or_else(|| MenuItemRepositoryError::not_found(id))
    }
}

#[async_trait]
impl OpeningHoursRepository for InMemoryCatalogStore {
    async fn list_all(&self) -> Result<Vec<OpeningHours>, OpeningHoursRepositoryError> {
        Ok(self.state().hours.clone())
    }

    async fn save_days(&self, days: &[OpeningHours]) -> Result<(), OpeningHoursRepositoryError> {
        let mut state = self.state();
        for record in days {
            let label = record.label().map(str::to_owned);
            match state.hours.iter_mut().find(|stored| stored.day() == record.day()) {
                Some(stored) => *stored = stored.clone().with_changes(*record.schedule(), label),
                None => {
                    warn!(day = %record.day(), "opening hours row missing; recreating");
                    state.hours.push(record.clone());
                }
            }
        }
        Ok(())
    }

    async fn insert_missing(
        &self,
        days: &[OpeningHours],
    ) -> Result<usize, OpeningHoursRepositoryError> {
        let mut state = self.state();
        let mut inserted = 0;
        for record in days {
            if !state.hours.iter().any(|stored| stored.day() == record.day()) {
                state.hours.push(record.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl AdminAccountRepository for InMemoryCatalogStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError> {
        Ok(self
            .state()
            .admins
            .iter()
            .find(|admin| admin.username == username)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: AdminId,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError> {
        Ok(self
            .state()
            .admins
            .iter()
            .find(|admin| admin.id == id)
            .cloned())
    }

    async fn count(&self) -> Result<i64, AdminAccountRepositoryError> {
        Ok(i64::try_from(self.state().admins.len()).unwrap_or(i64::MAX))
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminAccount, AdminAccountRepositoryError> {
        let mut state = self.state();
        if state.admins.iter().any(|admin| admin.username == username) {
            return Err(AdminAccountRepositoryError::duplicate_username(username));
        }
        let account = AdminAccount {
            id: AdminId::new(state.next_id()),
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
        };
        state.admins.push(account.clone());
        Ok(account)
    }
}
