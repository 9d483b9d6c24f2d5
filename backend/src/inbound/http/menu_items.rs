//! Admin menu item endpoints.
//!
//! ```text
//! POST /api/v1/admin/menu-items
//! PUT /api/v1/admin/menu-items/{id}
//! PUT /api/v1/admin/menu-items/{id}/active {"active":true}
//! DELETE /api/v1/admin/menu-items/{id}
//! ```

use actix_web::{HttpResponse, delete, post, put, web};
use tracing::debug;

use crate::domain::{Error, MenuItemDraft, MenuItemId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedAdmin;
use crate::inbound::http::schemas::{MenuItemBody, SetActiveRequest};
use crate::inbound::http::state::HttpState;

/// Create a menu item. Its drink flag follows the chosen category.
#[utoipa::path(
    post,
    path = "/api/v1/admin/menu-items",
    request_body = MenuItemDraft,
    responses(
        (status = 201, description = "Item created", body = MenuItemBody),
        (status = 400, description = "Invalid item", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown category", body = Error)
    ),
    tags = ["menu-items"],
    operation_id = "createMenuItem"
)]
#[post("/admin/menu-items")]
pub async fn create_menu_item(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    payload: web::Json<MenuItemDraft>,
) -> ApiResult<HttpResponse> {
    let item = state.menu.create_menu_item(payload.into_inner()).await?;
    debug!(admin = %admin.account().id, action = "create_menu_item", "admin action applied");
    Ok(HttpResponse::Created().json(MenuItemBody::from(&item)))
}

/// Replace a menu item's attributes.
#[utoipa::path(
    put,
    path = "/api/v1/admin/menu-items/{id}",
    params(("id" = i32, Path, description = "Menu item identifier")),
    request_body = MenuItemDraft,
    responses(
        (status = 200, description = "Item updated", body = MenuItemBody),
        (status = 400, description = "Invalid item", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown item or category", body = Error)
    ),
    tags = ["menu-items"],
    operation_id = "updateMenuItem"
)]
#[put("/admin/menu-items/{id}")]
pub async fn update_menu_item(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    payload: web::Json<MenuItemDraft>,
) -> ApiResult<web::Json<MenuItemBody>> {
    let id = MenuItemId::new(path.into_inner());
    let item = state.menu.update_menu_item(id, payload.into_inner()).await?;
    debug!(admin = %admin.account().id, action = "update_menu_item", "admin action applied");
    Ok(web::Json(MenuItemBody::from(&item)))
}

/// Show or hide a menu item.
#[utoipa::path(
    put,
    path = "/api/v1/admin/menu-items/{id}/active",
    params(("id" = i32, Path, description = "Menu item identifier")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Item updated", body = MenuItemBody),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["menu-items"],
    operation_id = "setMenuItemActive"
)]
#[put("/admin/menu-items/{id}/active")]
pub async fn set_menu_item_active(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    payload: web::Json<SetActiveRequest>,
) -> ApiResult<web::Json<MenuItemBody>> {
    let id = MenuItemId::new(path.into_inner());
    let active = payload.active;
    let item = state.menu.set_menu_item_active(id, active).await?;
    debug!(admin = %admin.account().id, action = "set_menu_item_active", "admin action applied");
    Ok(web::Json(MenuItemBody::from(&item)))
}

/// Delete a menu item and discard its image.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/menu-items/{id}",
    params(("id" = i32, Path, description = "Menu item identifier")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown item", body = Error)
    ),
    tags = ["menu-items"],
    operation_id = "deleteMenuItem"
)]
#[delete("/admin/menu-items/{id}")]
pub async fn delete_menu_item(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = MenuItemId::new(path.into_inner());
    state.menu.delete_menu_item(id).await?;
    debug!(admin = %admin.account().id, action = "delete_menu_item", "admin action applied");
    Ok(HttpResponse::NoContent().finish())
}
