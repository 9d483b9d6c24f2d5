//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use bigdecimal::BigDecimal;
use diesel::prelude::*;

use super::schema::{admin_accounts, menu_categories, menu_items, opening_hours};

/// Row struct for reading from the admin_accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdminAccountRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Insertable struct for creating admin accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admin_accounts)]
pub(crate) struct NewAdminAccountRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Catalog models
// ---------------------------------------------------------------------------

/// Row struct for reading from the menu_categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = menu_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_drink_category: bool,
    pub active: bool,
    pub image: Option<String>,
}

/// Full column set written on insert and update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = menu_categories)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CategoryChanges<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub description: Option<&'a str>,
    pub display_order: i32,
    pub is_drink_category: bool,
    pub active: bool,
    pub image: Option<&'a str>,
}

/// Row struct for reading from the menu_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MenuItemRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub category_id: i32,
    pub is_drink: bool,
    pub display_order: i32,
    pub active: bool,
    pub image: Option<String>,
    pub is_lunch_special: bool,
    pub allergens: Option<String>,
    pub portion_size: Option<String>,
    pub vegetarian: bool,
    pub vegan: bool,
    pub spice_level: i16,
}

/// Full column set written on insert and update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = menu_items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MenuItemChanges<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: &'a BigDecimal,
    pub category_id: i32,
    pub is_drink: bool,
    pub display_order: i32,
    pub active: bool,
    pub image: Option<&'a str>,
    pub is_lunch_special: bool,
    pub allergens: Option<&'a str>,
    pub portion_size: Option<&'a str>,
    pub vegetarian: bool,
    pub vegan: bool,
    pub spice_level: i16,
}

// ---------------------------------------------------------------------------
// Opening hours models
// ---------------------------------------------------------------------------

/// Row struct for reading from the opening_hours table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = opening_hours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OpeningHoursRow {
    pub id: i32,
    pub day: String,
    pub label: Option<String>,
    pub closed: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub open_time_2: Option<String>,
    pub close_time_2: Option<String>,
}

/// Insertable struct for creating opening hours rows.
///
/// Updates never rewrite `day`; see the repository's changeset tuple.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = opening_hours)]
pub(crate) struct NewOpeningHoursRow {
    pub day: String,
    pub label: Option<String>,
    pub closed: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub open_time_2: Option<String>,
    pub close_time_2: Option<String>,
}
