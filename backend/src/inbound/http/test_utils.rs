//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use serde_json::json;

use crate::domain::ports::{LoginService, MockLoginService, NoOpImageStore};
use crate::domain::{AdminAccount, AdminId, DisplayLocale, MenuService, OpeningHoursService};
use crate::inbound::http::SESSION_COOKIE;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryCatalogStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Uses the production cookie name and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

fn state_with(store: Arc<InMemoryCatalogStore>, login: Arc<dyn LoginService>) -> HttpState {
    let menu = Arc::new(MenuService::new(
        store.clone(),
        store.clone(),
        Arc::new(NoOpImageStore),
    ));
    let hours = Arc::new(OpeningHoursService::new(store));
    HttpState::new(
        HttpStatePorts {
            login,
            menu: menu.clone(),
            menu_query: menu,
            opening_hours: hours.clone(),
            opening_hours_query: hours,
        },
        DisplayLocale::De,
    )
}

/// In-memory state with the supplied login double.
pub fn state_with_login(login: MockLoginService) -> HttpState {
    state_with(Arc::new(InMemoryCatalogStore::new()), Arc::new(login))
}

/// In-memory state over `store` whose login accepts any credentials as
/// admin `1`.
pub fn memory_state(store: Arc<InMemoryCatalogStore>) -> HttpState {
    let mut login = MockLoginService::new();
    login.expect_authenticate().returning(|_| Ok(test_admin()));
    login.expect_find_admin().returning(|_| Ok(test_admin()));
    state_with(store, Arc::new(login))
}

fn test_admin() -> AdminAccount {
    AdminAccount {
        id: AdminId::new(1),
        username: "wirt".into(),
        password_hash: "$argon2id$unused".into(),
    }
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Log in through `POST /api/v1/login` and return the session cookie.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "wirt", "password": "geheim" }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed");
    session_cookie(&response)
}
