//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryFields, CategoryId, CategoryName, ImageRef};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CategoryChanges, CategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::{menu_categories, menu_items};

/// Diesel-backed implementation of the category repository port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failures raised inside a transaction closure.
///
/// Diesel needs `From<diesel::result::Error>` on the closure's error type.
enum TxError {
    Diesel(DieselError),
    Domain(CategoryRepositoryError),
}

impl From<DieselError> for TxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    map_basic_pool_error(error, CategoryRepositoryError::connection)
}

fn map_diesel_error(error: DieselError, name: Option<&str>) -> CategoryRepositoryError {
    match (constraint_violation(&error), name) {
        (Some(ConstraintViolation::Unique), Some(name)) => {
            CategoryRepositoryError::duplicate_name(name)
        }
        _ => map_basic_diesel_error(
            error,
            CategoryRepositoryError::query,
            CategoryRepositoryError::connection,
        ),
    }
}

fn map_tx_error(error: TxError, name: Option<&str>) -> CategoryRepositoryError {
    match error {
        TxError::Diesel(err) => map_diesel_error(err, name),
        TxError::Domain(err) => err,
    }
}

pub(super) fn row_to_category(row: CategoryRow) -> Result<Category, CategoryRepositoryError> {
    let name = CategoryName::new(row.name.as_str()).map_err(|err| {
        CategoryRepositoryError::query(format!("stored category {} is invalid: {err}", row.id))
    })?;
    let image = row.image.as_deref().and_then(|raw| {
        ImageRef::new(raw)
            .inspect_err(|_| warn!(category_id = row.id, image = raw, "ignoring invalid image"))
            .ok()
    });
    Ok(Category {
        id: CategoryId::new(row.id),
        name,
        display_name: row.display_name,
        description: row.description,
        display_order: row.display_order,
        is_drink_category: row.is_drink_category,
        active: row.active,
        image,
    })
}

fn changes(fields: &CategoryFields) -> CategoryChanges<'_> {
    CategoryChanges {
        name: fields.name.as_str(),
        display_name: fields.display_name.as_str(),
        description: fields.description.as_deref(),
        display_order: fields.display_order,
        is_drink_category: fields.is_drink_category,
        active: fields.active,
        image: fields.image.as_ref().map(ImageRef::as_str),
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CategoryRow> = menu_categories::table
            .select(CategoryRow::as_select())
            .order_by((menu_categories::display_order, menu_categories::id))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_category).collect()
    }

    async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CategoryRow> = menu_categories::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_category).transpose()
    }

    async fn count(&self) -> Result<i64, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        menu_categories::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))
    }

    async fn create(&self, fields: &CategoryFields) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CategoryRow = diesel::insert_into(menu_categories::table)
            .values(changes(fields))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(fields.name.as_str())))?;
        row_to_category(row)
    }

    async fn update(
        &self,
        id: CategoryId,
        fields: &CategoryFields,
    ) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction::<CategoryRow, TxError, _>(|conn| {
                async move {
                    let row: Option<CategoryRow> = diesel::update(menu_categories::table.find(id.get()))
                        .set(changes(fields))
                        .returning(CategoryRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    let row = row.ok_or(TxError::Domain(CategoryRepositoryError::not_found(id)))?;
                    diesel::update(
                        menu_items::table
                            .filter(menu_items::category_id.eq(id.get()))
                            .filter(menu_items::is_drink.ne(row.is_drink_category)),
                    )
                    .set(menu_items::is_drink.eq(row.is_drink_category))
                    .execute(conn)
                    .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_tx_error(err, Some(fields.name.as_str())))?;
        row_to_category(row)
    }

    async fn set_active(
        &self,
        id: CategoryId,
        active: bool,
    ) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CategoryRow> = diesel::update(menu_categories::table.find(id.get()))
            .set(menu_categories::active.eq(active))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_category)
            .transpose()?
            .ok_or_else(|| CategoryRepositoryError::not_found(id))
    }

    async fn delete(&self, id: CategoryId) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction::<CategoryRow, TxError, _>(|conn| {
                async move {
                    let item_count: i64 = menu_items::table
                        .filter(menu_items::category_id.eq(id.get()))
                        .count()
                        .get_result(conn)
                        .await?;
                    if item_count > 0 {
                        return Err(TxError::Domain(CategoryRepositoryError::not_empty(
                            id, item_count,
                        )));
                    }
                    let row: Option<CategoryRow> =
                        diesel::delete(menu_categories::table.find(id.get()))
                            .returning(CategoryRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?;
                    row.ok_or(TxError::Domain(CategoryRepositoryError::not_found(id)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| match err {
                // An item inserted after the count still trips ON DELETE RESTRICT.
                TxError::Diesel(err)
                    if constraint_violation(&err) == Some(ConstraintViolation::ForeignKey) =>
                {
                    CategoryRepositoryError::not_empty(id, 1_i64)
                }
                other => map_tx_error(other, None),
            })?;
        row_to_category(row)
    }
}
