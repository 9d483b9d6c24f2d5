//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain types
//! and hold no business rules. Row structs (`models.rs`) and the schema
//! (`schema.rs`) stay private to this module. Connections come from a `bb8`
//! pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use menuboard::outbound::persistence::{DbPool, DieselCategoryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/menuboard")).await?;
//! let categories = DieselCategoryRepository::new(pool);
//! ```

mod diesel_admin_account_repository;
mod diesel_basic_error_mapping;
mod diesel_category_repository;
mod diesel_menu_item_repository;
mod diesel_opening_hours_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_admin_account_repository::DieselAdminAccountRepository;
pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_menu_item_repository::DieselMenuItemRepository;
pub use diesel_opening_hours_repository::DieselOpeningHoursRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
