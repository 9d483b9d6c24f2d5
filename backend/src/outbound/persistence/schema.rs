//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Administrator logins.
    admin_accounts (id) {
        id -> Int4,
        /// Unique, trimmed login name.
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
    }
}

diesel::table! {
    /// Menu categories.
    menu_categories (id) {
        id -> Int4,
        /// Unique slug.
        name -> Varchar,
        display_name -> Varchar,
        description -> Nullable<Text>,
        display_order -> Int4,
        is_drink_category -> Bool,
        active -> Bool,
        /// Plain file name inside the image directory.
        image -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Dishes and drinks.
    menu_items (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        /// `NUMERIC(10, 2)`, never negative.
        price -> Numeric,
        /// References `menu_categories.id` with `ON DELETE RESTRICT`.
        category_id -> Int4,
        /// Copy of the owning category's `is_drink_category`.
        is_drink -> Bool,
        display_order -> Int4,
        active -> Bool,
        image -> Nullable<Varchar>,
        is_lunch_special -> Bool,
        allergens -> Nullable<Varchar>,
        portion_size -> Nullable<Varchar>,
        vegetarian -> Bool,
        vegan -> Bool,
        /// 0 (mild) to 3 (very hot).
        spice_level -> Int2,
    }
}

diesel::table! {
    /// One row per weekday.
    opening_hours (id) {
        id -> Int4,
        /// Unique day identifier, canonically the lowercase English name.
        day -> Varchar,
        label -> Nullable<Varchar>,
        closed -> Bool,
        /// `HH:MM` strings; all null when `closed`.
        open_time -> Nullable<Varchar>,
        close_time -> Nullable<Varchar>,
        open_time_2 -> Nullable<Varchar>,
        close_time_2 -> Nullable<Varchar>,
    }
}

diesel::joinable!(menu_items -> menu_categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(
    admin_accounts,
    menu_categories,
    menu_items,
    opening_hours,
);
