//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_account_repository;
mod category_repository;
mod image_store;
mod login_service;
mod menu_command;
mod menu_item_repository;
mod menu_query;
mod opening_hours_command;
mod opening_hours_query;
mod opening_hours_repository;

#[cfg(test)]
pub use admin_account_repository::MockAdminAccountRepository;
pub use admin_account_repository::{AdminAccountRepository, AdminAccountRepositoryError};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{ImageStore, ImageStoreError, NoOpImageStore};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use menu_command::MenuCommand;
#[cfg(test)]
pub use menu_command::MockMenuCommand;
#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
pub use menu_item_repository::{MenuItemRepository, MenuItemRepositoryError};
#[cfg(test)]
pub use menu_query::MockMenuQuery;
pub use menu_query::{AdminCatalog, MenuQuery};
#[cfg(test)]
pub use opening_hours_command::MockOpeningHoursCommand;
pub use opening_hours_command::OpeningHoursCommand;
#[cfg(test)]
pub use opening_hours_query::MockOpeningHoursQuery;
pub use opening_hours_query::OpeningHoursQuery;
#[cfg(test)]
pub use opening_hours_repository::MockOpeningHoursRepository;
pub use opening_hours_repository::{OpeningHoursRepository, OpeningHoursRepositoryError};
