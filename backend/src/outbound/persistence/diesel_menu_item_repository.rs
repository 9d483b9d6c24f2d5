//! PostgreSQL-backed `MenuItemRepository` implementation using Diesel ORM.
//!
//! Writes read the owning category's drink flag in the same transaction and
//! store it on the item row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{MenuItemRepository, MenuItemRepositoryError};
use crate::domain::{
    CategoryId, Dietary, ImageRef, MenuItem, MenuItemFields, MenuItemId, Price, SpiceLevel,
};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{MenuItemChanges, MenuItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::{menu_categories, menu_items};

/// Diesel-backed implementation of the menu item repository port.
#[derive(Clone)]
pub struct DieselMenuItemRepository {
    pool: DbPool,
}

impl DieselMenuItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

enum TxError {
    Diesel(DieselError),
    Domain(MenuItemRepositoryError),
}

impl From<DieselError> for TxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> MenuItemRepositoryError {
    map_basic_pool_error(error, MenuItemRepositoryError::connection)
}

fn map_diesel_error(error: DieselError, category: Option<CategoryId>) -> MenuItemRepositoryError {
    match (constraint_violation(&error), category) {
        (Some(ConstraintViolation::ForeignKey), Some(id)) => {
            MenuItemRepositoryError::category_missing(id)
        }
        _ => map_basic_diesel_error(
            error,
            MenuItemRepositoryError::query,
            MenuItemRepositoryError::connection,
        ),
    }
}

fn map_tx_error(error: TxError, category: Option<CategoryId>) -> MenuItemRepositoryError {
    match error {
        TxError::Diesel(err) => map_diesel_error(err, category),
        TxError::Domain(err) => err,
    }
}

fn row_to_item(row: MenuItemRow) -> Result<MenuItem, MenuItemRepositoryError> {
    let invalid = |what: String| {
        MenuItemRepositoryError::query(format!("stored menu item {} is invalid: {what}", row.id))
    };
    let price = Price::new(row.price.clone()).map_err(|err| invalid(err.to_string()))?;
    let spice = u8::try_from(row.spice_level)
        .ok()
        .and_then(|level| SpiceLevel::new(level).ok())
        .unwrap_or_else(|| {
            warn!(item_id = row.id, level = row.spice_level, "clamping invalid spice level");
            SpiceLevel::default()
        });
    let image = row.image.as_deref().and_then(|raw| {
        ImageRef::new(raw)
            .inspect_err(|_| warn!(item_id = row.id, image = raw, "ignoring invalid image"))
            .ok()
    });
    Ok(MenuItem {
        id: MenuItemId::new(row.id),
        name: row.name,
        description: row.description,
        price,
        category_id: CategoryId::new(row.category_id),
        is_drink: row.is_drink,
        display_order: row.display_order,
        active: row.active,
        image,
        is_lunch_special: row.is_lunch_special,
        allergens: row.allergens,
        portion_size: row.portion_size,
        dietary: Dietary::new(row.vegetarian, row.vegan, spice),
    })
}

fn changes(fields: &MenuItemFields, is_drink: bool) -> MenuItemChanges<'_> {
    MenuItemChanges {
        name: fields.name.as_str(),
        description: fields.description.as_deref(),
        price: fields.price.amount(),
        category_id: fields.category_id.get(),
        is_drink,
        display_order: fields.display_order,
        active: fields.active,
        image: fields.image.as_ref().map(ImageRef::as_str),
        is_lunch_special: fields.is_lunch_special,
        allergens: fields.allergens.as_deref(),
        portion_size: fields.portion_size.as_deref(),
        vegetarian: fields.dietary.vegetarian,
        vegan: fields.dietary.vegan,
        spice_level: i16::from(fields.dietary.spice.get()),
    }
}

/// Drink flag of the category, locked against concurrent changes.
async fn category_drink_flag(
    conn: &mut AsyncPgConnection,
    id: CategoryId,
) -> Result<bool, TxError> {
    let flag: Option<bool> = menu_categories::table
        .find(id.get())
        .select(menu_categories::is_drink_category)
        .for_share()
        .first(conn)
        .await
        .optional()?;
    flag.ok_or(TxError::Domain(MenuItemRepositoryError::category_missing(id)))
}

#[async_trait]
impl MenuItemRepository for DieselMenuItemRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MenuItemRow> = menu_items::table
            .select(MenuItemRow::as_select())
            .order_by((menu_items::display_order, menu_items::id))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_item).collect()
    }

    async fn find(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MenuItemRow> = menu_items::table
            .find(id.get())
            .select(MenuItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_item).transpose()
    }

    async fn create(&self, fields: &MenuItemFields) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let category = fields.category_id;
        let row = conn
            .transaction::<MenuItemRow, TxError, _>(|conn| {
                async move {
                    let is_drink = category_drink_flag(conn, category).await?;
                    let row = diesel::insert_into(menu_items::table)
                        .values(changes(fields, is_drink))
                        .returning(MenuItemRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_tx_error(err, Some(category)))?;
        row_to_item(row)
    }

    async fn update(
        &self,
        id: MenuItemId,
        fields: &MenuItemFields,
    ) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let category = fields.category_id;
        let row = conn
            .transaction::<MenuItemRow, TxError, _>(|conn| {
                async move {
                    let is_drink = category_drink_flag(conn, category).await?;
                    let row: Option<MenuItemRow> = diesel::update(menu_items::table.find(id.get()))
                        .set(changes(fields, is_drink))
                        .returning(MenuItemRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    row.ok_or(TxError::Domain(MenuItemRepositoryError::not_found(id)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_tx_error(err, Some(category)))?;
        row_to_item(row)
    }

    async fn set_active(
        &self,
        id: MenuItemId,
        active: bool,
    ) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MenuItemRow> = diesel::update(menu_items::table.find(id.get()))
            .set(menu_items::active.eq(active))
            .returning(MenuItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_item)
            .transpose()?
            .ok_or_else(|| MenuItemRepositoryError::not_found(id))
    }

    async fn delete(&self, id: MenuItemId) -> Result<MenuItem, MenuItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MenuItemRow> = diesel::delete(menu_items::table.find(id.get()))
            .returning(MenuItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_item)
            .transpose()?
            .ok_or_else(|| MenuItemRepositoryError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use rstest::rstest;
    use std::str::FromStr;

    fn row() -> MenuItemRow {
        MenuItemRow {
            id: 4,
            name: "Pils".into(),
            description: None,
            price: BigDecimal::from_str("3.90").expect("decimal"),
            category_id: 10,
            is_drink: true,
            display_order: 0,
            active: true,
            image: Some("pils.jpg".into()),
            is_lunch_special: false,
            allergens: None,
            portion_size: Some("0,4 l".into()),
            vegetarian: true,
            vegan: true,
            spice_level: 0,
        }
    }

    #[rstest]
    fn converts_stored_rows() {
        let item = row_to_item(row()).expect("valid row");

        assert_eq!(item.price.to_string(), "3.90");
        assert_eq!(item.image.map(|image| image.to_string()).as_deref(), Some("pils.jpg"));
        assert!(item.dietary.vegetarian);
    }

    #[rstest]
    #[case(-1)]
    #[case(9)]
    fn clamps_out_of_range_spice(#[case] level: i16) {
        let item = row_to_item(MenuItemRow {
            spice_level: level,
            ..row()
        })
        .expect("still readable");
        assert_eq!(item.dietary.spice, SpiceLevel::default());
    }

    #[rstest]
    fn drops_unsafe_image_names() {
        let item = row_to_item(MenuItemRow {
            image: Some("../etc/passwd".into()),
            ..row()
        })
        .expect("still readable");
        assert!(item.image.is_none());
    }

    #[rstest]
    fn negative_stored_price_is_a_query_error() {
        let err = row_to_item(MenuItemRow {
            price: BigDecimal::from_str("-1").expect("decimal"),
            ..row()
        })
        .expect_err("invalid price");
        assert!(matches!(err, MenuItemRepositoryError::Query { .. }));
    }
}
