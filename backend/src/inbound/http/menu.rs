//! Menu read endpoints.
//!
//! ```text
//! GET /api/v1/menu
//! GET /api/v1/admin/catalog
//! ```

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedAdmin;
use crate::inbound::http::schemas::{AdminCatalogBody, PublicMenuBody};
use crate::inbound::http::state::HttpState;

/// Public menu: active items under active categories, food before drinks.
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    responses(
        (status = 200, description = "Public menu", body = PublicMenuBody),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["menu"],
    operation_id = "getMenu",
    security([])
)]
#[get("/menu")]
pub async fn get_menu(state: web::Data<HttpState>) -> ApiResult<web::Json<PublicMenuBody>> {
    let menu = state.menu_query.public_menu().await?;
    Ok(web::Json(PublicMenuBody::from(&menu)))
}

/// Every category and item, including inactive ones.
#[utoipa::path(
    get,
    path = "/api/v1/admin/catalog",
    responses(
        (status = 200, description = "Full catalog", body = AdminCatalogBody),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["menu"],
    operation_id = "getAdminCatalog"
)]
#[get("/admin/catalog")]
pub async fn get_admin_catalog(
    state: web::Data<HttpState>,
    _admin: AuthenticatedAdmin,
) -> ApiResult<web::Json<AdminCatalogBody>> {
    let catalog = state.menu_query.admin_catalog().await?;
    Ok(web::Json(AdminCatalogBody::from(&catalog)))
}
