//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use menuboard::domain::DisplayLocale;
use menuboard::domain::bootstrap::BootstrapOptions;
use menuboard::inbound::http::session_config::SessionSettings;
use menuboard::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) locale: DisplayLocale,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) image_dir: Option<PathBuf>,
    pub(crate) bootstrap: BootstrapOptions,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, locale: DisplayLocale) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl: ttl,
            bind_addr,
            locale,
            db_pool: None,
            image_dir: None,
            bootstrap: BootstrapOptions::default(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the catalog lives in process memory and is lost on
    /// restart.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Directory whose files are removed when a menu image is replaced.
    #[must_use]
    pub fn with_image_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.image_dir = dir;
        self
    }

    /// Options for the startup initialisation of the store.
    #[must_use]
    pub fn with_bootstrap(mut self, options: BootstrapOptions) -> Self {
        self.bootstrap = options;
        self
    }
}
