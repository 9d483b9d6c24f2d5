//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::DisplayLocale;
use crate::domain::ports::{
    LoginService, MenuCommand, MenuQuery, OpeningHoursCommand, OpeningHoursQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub menu: Arc<dyn MenuCommand>,
    pub menu_query: Arc<dyn MenuQuery>,
    pub opening_hours: Arc<dyn OpeningHoursCommand>,
    pub opening_hours_query: Arc<dyn OpeningHoursQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub menu: Arc<dyn MenuCommand>,
    pub menu_query: Arc<dyn MenuQuery>,
    pub opening_hours: Arc<dyn OpeningHoursCommand>,
    pub opening_hours_query: Arc<dyn OpeningHoursQuery>,
    /// Locale used by the public opening-hours listing.
    pub locale: DisplayLocale,
}

impl HttpState {
    /// Construct state from a ports bundle and the public display locale.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use menuboard::domain::{
    ///     AdminLoginService, DisplayLocale, MenuService, OpeningHoursService,
    /// };
    /// use menuboard::domain::ports::NoOpImageStore;
    /// use menuboard::inbound::http::state::{HttpState, HttpStatePorts};
    /// use menuboard::outbound::memory::InMemoryCatalogStore;
    ///
    /// let store = Arc::new(InMemoryCatalogStore::new());
    /// let menu = Arc::new(MenuService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     Arc::new(NoOpImageStore),
    /// ));
    /// let hours = Arc::new(OpeningHoursService::new(store.clone()));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         login: Arc::new(AdminLoginService::new(store)),
    ///         menu: menu.clone(),
    ///         menu_query: menu,
    ///         opening_hours: hours.clone(),
    ///         opening_hours_query: hours,
    ///     },
    ///     DisplayLocale::De,
    /// );
    /// assert_eq!(state.locale, DisplayLocale::De);
    /// ```
    pub fn new(ports: HttpStatePorts, locale: DisplayLocale) -> Self {
        let HttpStatePorts {
            login,
            menu,
            menu_query,
            opening_hours,
            opening_hours_query,
        } = ports;
        Self {
            login,
            menu,
            menu_query,
            opening_hours,
            opening_hours_query,
            locale,
        }
    }
}
