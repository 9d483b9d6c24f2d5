//! Shared harness for HTTP integration tests.
//!
//! Builds the real services over an [`InMemoryCatalogStore`], runs startup
//! initialisation with a known admin and mounts the API the way the server
//! binary does.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};
use zeroize::Zeroizing;

use menuboard::Trace;
use menuboard::domain::bootstrap::{self, BootstrapOptions, BootstrapReport};
use menuboard::domain::ports::NoOpImageStore;
use menuboard::domain::{
    AdminLoginService, AdminPasswordHasher, DisplayLocale, MenuService, OpeningHoursService,
};
use menuboard::inbound::http::{SESSION_COOKIE, configure_api};
use menuboard::inbound::http::state::{HttpState, HttpStatePorts};
use menuboard::outbound::memory::InMemoryCatalogStore;

pub const ADMIN_USERNAME: &str = "wirt";
pub const ADMIN_PASSWORD: &str = "kartoffelsalat";

/// Argon2 with minimal cost so logins stay fast.
pub fn fast_hasher() -> AdminPasswordHasher {
    AdminPasswordHasher::with_params(8, 1, 1).expect("argon2 params")
}

pub fn bootstrap_options(seed_categories: bool) -> BootstrapOptions {
    BootstrapOptions {
        admin_username: ADMIN_USERNAME.to_owned(),
        admin_password: Some(Zeroizing::new(ADMIN_PASSWORD.to_owned())),
        allow_dev_password: false,
        seed_categories,
    }
}

/// Run startup initialisation against `store`.
pub async fn initialise(store: &InMemoryCatalogStore, seed_categories: bool) -> BootstrapReport {
    bootstrap::initialise(
        store,
        store,
        store,
        &fast_hasher(),
        &bootstrap_options(seed_categories),
    )
    .await
    .expect("store initialises")
}

/// HTTP state over an initialised store without seeded categories.
pub async fn initialised_state(locale: DisplayLocale) -> web::Data<HttpState> {
    let store = Arc::new(InMemoryCatalogStore::new());
    initialise(&store, false).await;
    let menu = Arc::new(MenuService::new(
        store.clone(),
        store.clone(),
        Arc::new(NoOpImageStore),
    ));
    let hours = Arc::new(OpeningHoursService::new(store.clone()));
    web::Data::new(HttpState::new(
        HttpStatePorts {
            login: Arc::new(AdminLoginService::with_hasher(store, fast_hasher())),
            menu: menu.clone(),
            menu_query: menu,
            opening_hours: hours.clone(),
            opening_hours_query: hours,
        },
        locale,
    ))
}

/// Mount the `/api/v1` scope behind trace and session middleware.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build();
    actix_test::init_service(
        App::new()
            .app_data(state)
            .wrap(Trace)
            .service(web::scope("/api/v1").wrap(session).configure(configure_api)),
    )
    .await
}

/// Post credentials to the login endpoint.
pub async fn post_login<S, B>(app: &S, username: &str, password: &str) -> ServiceResponse<B>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await
}

/// Log in as the bootstrap admin and return the session cookie.
pub async fn admin_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = post_login(app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Send `request` and decode the JSON body alongside the status code.
pub async fn call_json<S, B>(app: &S, request: actix_http::Request) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status().as_u16();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}
