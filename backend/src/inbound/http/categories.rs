//! Admin category endpoints.
//!
//! ```text
//! POST /api/v1/admin/categories
//! PUT /api/v1/admin/categories/{id}
//! PUT /api/v1/admin/categories/{id}/active {"active":false}
//! DELETE /api/v1/admin/categories/{id}
//! ```

use actix_web::{HttpResponse, delete, post, put, web};
use tracing::debug;

use crate::domain::{CategoryDraft, CategoryId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedAdmin;
use crate::inbound::http::schemas::{CategoryBody, SetActiveRequest};
use crate::inbound::http::state::HttpState;

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/v1/admin/categories",
    request_body = CategoryDraft,
    responses(
        (status = 201, description = "Category created", body = CategoryBody),
        (status = 400, description = "Invalid category", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Name already taken", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/admin/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    payload: web::Json<CategoryDraft>,
) -> ApiResult<HttpResponse> {
    let category = state.menu.create_category(payload.into_inner()).await?;
    debug!(admin = %admin.account().id, action = "create_category", "admin action applied");
    Ok(HttpResponse::Created().json(CategoryBody::from(&category)))
}

/// Replace a category's attributes.
///
/// Changing the drink flag reclassifies every item in the category.
#[utoipa::path(
    put,
    path = "/api/v1/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category identifier")),
    request_body = CategoryDraft,
    responses(
        (status = 200, description = "Category updated", body = CategoryBody),
        (status = 400, description = "Invalid category", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown category", body = Error),
        (status = 409, description = "Name already taken", body = Error)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/admin/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    payload: web::Json<CategoryDraft>,
) -> ApiResult<web::Json<CategoryBody>> {
    let id = CategoryId::new(path.into_inner());
    let category = state.menu.update_category(id, payload.into_inner()).await?;
    debug!(admin = %admin.account().id, action = "update_category", "admin action applied");
    Ok(web::Json(CategoryBody::from(&category)))
}

/// Show or hide a category on the public menu.
#[utoipa::path(
    put,
    path = "/api/v1/admin/categories/{id}/active",
    params(("id" = i32, Path, description = "Category identifier")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryBody),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown category", body = Error)
    ),
    tags = ["categories"],
    operation_id = "setCategoryActive"
)]
#[put("/admin/categories/{id}/active")]
pub async fn set_category_active(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    path: web::Path<i32>,
    payload: web::Json<SetActiveRequest>,
) -> ApiResult<web::Json<CategoryBody>> {
    let id = CategoryId::new(path.into_inner());
    let active = payload.active;
    let category = state.menu.set_category_active(id, active).await?;
    debug!(admin = %admin.account().id, action = "set_category_active", "admin action applied");
    Ok(web::Json(CategoryBody::from(&category)))
}

/// Delete an empty category.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown category", body = Error),
        (status = 409, description = "Category still has items", body = Error)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/admin/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    admin: AuthenticatedAdmin,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = CategoryId::new(path.into_inner());
    state.menu.delete_category(id).await?;
    debug!(admin = %admin.account().id, action = "delete_category", "admin action applied");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use crate::inbound::http::auth::login;
    use crate::inbound::http::menu_items::create_menu_item;
    use crate::inbound::http::test_utils::{login_cookie, memory_state, test_session_middleware};
    use crate::outbound::memory::InMemoryCatalogStore;

    macro_rules! category_app {
        () => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(memory_state(Arc::new(
                        InMemoryCatalogStore::new(),
                    ))))
                    .wrap(test_session_middleware())
                    .service(
                        web::scope("/api/v1")
                            .service(login)
                            .service(create_category)
                            .service(update_category)
                            .service(set_category_active)
                            .service(delete_category)
                            .service(create_menu_item),
                    ),
            )
            .await
        };
    }

    fn starters() -> Value {
        json!({ "name": "starters", "displayName": "Vorspeisen", "displayOrder": 1 })
    }

    #[actix_web::test]
    async fn mutations_require_a_session() {
        let app = category_app!();

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/categories")
                .set_json(starters())
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_then_toggle_category() {
        let app = category_app!();
        let cookie = login_cookie(&app).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/categories")
                .cookie(cookie.clone())
                .set_json(starters())
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(created).await;
        assert_eq!(body["active"], true);
        let id = body["id"].as_i64().expect("id");

        let toggled = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/admin/categories/{id}/active"))
                .cookie(cookie)
                .set_json(json!({ "active": false }))
                .to_request(),
        )
        .await;
        assert_eq!(toggled.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(toggled).await;
        assert_eq!(body["active"], false);
    }

    #[actix_web::test]
    async fn duplicate_name_is_a_conflict() {
        let app = category_app!();
        let cookie = login_cookie(&app).await;
        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/admin/categories")
                    .cookie(cookie.clone())
                    .set_json(starters())
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), expected);
        }
    }

    #[actix_web::test]
    async fn blank_display_name_is_rejected() {
        let app = category_app!();
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/categories")
                .cookie(cookie)
                .set_json(json!({ "name": "starters", "displayName": "  " }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn deleting_a_category_with_items_is_a_conflict() {
        let app = category_app!();
        let cookie = login_cookie(&app).await;
        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/categories")
                .cookie(cookie.clone())
                .set_json(starters())
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(created).await;
        let id = body["id"].as_i64().expect("id");
        let item = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/menu-items")
                .cookie(cookie.clone())
                .set_json(json!({ "name": "Bruschetta", "price": "5.90", "categoryId": id }))
                .to_request(),
        )
        .await;
        assert_eq!(item.status(), StatusCode::CREATED);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/admin/categories/{id}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn deleting_an_unknown_category_is_not_found() {
        let app = category_app!();
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/admin/categories/404")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
