//! HTTP server assembly.
//!
//! Public and admin routes share one `/api/v1` scope behind the cookie
//! session. Probes sit outside it so they never touch the cookie, and
//! Swagger UI is mounted at `/docs` in debug builds only.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use menuboard::Trace;
#[cfg(debug_assertions)]
use menuboard::doc::ApiDoc;
use menuboard::inbound::http::{SESSION_COOKIE, configure_api};
use menuboard::inbound::http::health::{HealthState, live, ready};
use menuboard::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Admin cookie attributes, cloned into every worker.
#[derive(Clone)]
struct CookiePolicy {
    key: Key,
    secure: bool,
    same_site: SameSite,
    ttl: Duration,
}

impl CookiePolicy {
    fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE.to_owned())
            .cookie_path("/".to_owned())
            .cookie_http_only(true)
            .cookie_secure(self.secure)
            .cookie_same_site(self.same_site)
            .cookie_content_security(CookieContentSecurity::Private)
            .session_lifecycle(PersistentSession::default().session_ttl(self.ttl))
            .build()
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cookies: CookiePolicy,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(
            web::scope("/api/v1")
                .wrap(cookies.middleware())
                .configure(configure_api),
        );

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build the catalog state, bind the listener and flag the process ready.
///
/// The returned [`Server`] does nothing until awaited.
///
/// # Errors
/// Startup initialisation, opening the image directory or binding
/// `config.bind_addr` failed.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config).await?;
    let cookies = CookiePolicy {
        key: config.key,
        secure: config.cookie_secure,
        same_site: config.same_site,
        ttl: config.session_ttl,
    };

    let health = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(health.clone(), http_state.clone(), cookies.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
