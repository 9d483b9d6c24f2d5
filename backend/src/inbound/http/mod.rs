//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod categories;
pub mod error;
pub mod health;
pub mod menu;
pub mod menu_items;
pub mod opening_hours;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use session::SESSION_COOKIE;

use actix_web::web;

/// Register every `/api/v1` endpoint on `cfg`.
///
/// Callers wrap the scope in session middleware and provide
/// [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use menuboard::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .service(menu::get_menu)
        .service(opening_hours::get_opening_hours)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::current_admin)
        .service(menu::get_admin_catalog)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::set_category_active)
        .service(categories::delete_category)
        .service(menu_items::create_menu_item)
        .service(menu_items::update_menu_item)
        .service(menu_items::set_menu_item_active)
        .service(menu_items::delete_menu_item)
        .service(opening_hours::get_admin_opening_hours)
        .service(opening_hours::update_opening_hours);
}
