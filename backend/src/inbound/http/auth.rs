//! Admin login, logout and the authenticated-admin extractor.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"..."}
//! POST /api/v1/logout
//! GET /api/v1/admin/me
//! ```

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, get, post, web};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{AdminAccount, Error, ErrorCode, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::AdminBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

/// The admin behind the current session.
///
/// Extraction fails with `401` when no admin is signed in or when the session
/// points at an account that no longer exists; the stale session is purged in
/// the latter case.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin(pub AdminAccount);

impl AuthenticatedAdmin {
    /// The resolved account.
    pub fn account(&self) -> &AdminAccount {
        &self.0
    }
}

impl FromRequest for AuthenticatedAdmin {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let admin_id = session.require_admin_id()?;
            match state.login.find_admin(admin_id).await {
                Ok(account) => Ok(Self(account)),
                Err(err) => {
                    if err.code() == ErrorCode::Unauthorized {
                        warn!(admin_id = %admin_id, "purging session of unknown admin");
                        session.clear();
                    }
                    Err(err.into())
                }
            }
        })
    }
}

/// Verify credentials and start an admin session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AdminBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AdminBody>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| map_login_validation_error(&err))?;
    let account = state.login.authenticate(&credentials).await?;
    session.persist_admin(account.id)?;
    info!(admin_id = %account.id, "admin signed in");
    Ok(web::Json(AdminBody::from(&account)))
}

/// End the admin session. Succeeds whether or not one existed.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// The signed-in admin.
#[utoipa::path(
    get,
    path = "/api/v1/admin/me",
    responses(
        (status = 200, description = "Current admin", body = AdminBody),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentAdmin"
)]
#[get("/admin/me")]
pub async fn current_admin(admin: AuthenticatedAdmin) -> web::Json<AdminBody> {
    web::Json(AdminBody::from(admin.account()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::AdminId;
    use crate::domain::ports::MockLoginService;
    use crate::inbound::http::test_utils::{
        session_cookie, state_with_login, test_session_middleware,
    };

    fn account() -> AdminAccount {
        AdminAccount {
            id: AdminId::new(1),
            username: "wirt".into(),
            password_hash: "$argon2id$unused".into(),
        }
    }

    fn accepting_login() -> MockLoginService {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .returning(|_| Ok(account()));
        service.expect_find_admin().returning(|_| Ok(account()));
        service
    }

    macro_rules! auth_app {
        ($login:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(state_with_login($login)))
                    .wrap(test_session_middleware())
                    .service(
                        web::scope("/api/v1")
                            .service(login)
                            .service(logout)
                            .service(current_admin),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn login_sets_a_session_that_resolves_the_admin() {
        let app = auth_app!(accepting_login());

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": "wirt", "password": "geheim" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);

        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(me).await;
        assert_eq!(body["username"], "wirt");
        assert!(body.get("passwordHash").is_none());
    }

    #[rstest]
    #[case("  ", "geheim", "username", "empty_username")]
    #[case("wirt", "", "password", "empty_password")]
    #[case("wirt", &"x".repeat(2048), "password", "password_too_long")]
    #[actix_web::test]
    async fn login_rejects_malformed_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = auth_app!(MockLoginService::new());

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": username, "password": password }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised() {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid credentials")));
        let app = auth_app!(service);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": "wirt", "password": "falsch" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.response().cookies().next().is_none());
    }

    #[actix_web::test]
    async fn me_without_session_is_unauthorised() {
        let app = auth_app!(MockLoginService::new());

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/admin/me").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_ends_the_session() {
        let app = auth_app!(accepting_login());
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": "wirt", "password": "geheim" }))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&response);

        let out = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(out.status(), StatusCode::NO_CONTENT);
        let cleared = session_cookie(&out);

        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/me")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn session_for_a_deleted_admin_is_rejected() {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .returning(|_| Ok(account()));
        service
            .expect_find_admin()
            .returning(|_| Err(Error::unauthorized("session refers to an unknown admin")));
        let app = auth_app!(service);
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": "wirt", "password": "geheim" }))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&response);

        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }
}
