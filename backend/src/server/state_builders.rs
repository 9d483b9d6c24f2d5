//! Builders for the HTTP state and the repositories behind it.

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use menuboard::domain::bootstrap::{self, BootstrapOptions};
use menuboard::domain::ports::{
    AdminAccountRepository, CategoryRepository, ImageStore, MenuItemRepository, NoOpImageStore,
    OpeningHoursRepository,
};
use menuboard::domain::{
    AdminLoginService, AdminPasswordHasher, DisplayLocale, MenuService, OpeningHoursService,
};
use menuboard::inbound::http::state::{HttpState, HttpStatePorts};
use menuboard::outbound::images::FsImageStore;
use menuboard::outbound::memory::InMemoryCatalogStore;
use menuboard::outbound::persistence::{
    DieselAdminAccountRepository, DieselCategoryRepository, DieselMenuItemRepository,
    DieselOpeningHoursRepository,
};

use super::ServerConfig;

/// Repository adapters backing one catalog store.
struct Repositories<C, I, H, A> {
    categories: Arc<C>,
    items: Arc<I>,
    hours: Arc<H>,
    admins: Arc<A>,
}

/// Initialise the configured store and wrap it in HTTP state.
///
/// Uses the Diesel adapters when a pool is configured and the in-memory
/// store otherwise.
///
/// # Errors
/// Returns [`io::Error`] when the image directory cannot be opened or startup
/// initialisation fails.
pub(crate) async fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let images = build_image_store(config)?;
    match &config.db_pool {
        Some(pool) => {
            let repos = Repositories {
                categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
                items: Arc::new(DieselMenuItemRepository::new(pool.clone())),
                hours: Arc::new(DieselOpeningHoursRepository::new(pool.clone())),
                admins: Arc::new(DieselAdminAccountRepository::new(pool.clone())),
            };
            initialise_state(repos, images, config.locale, &config.bootstrap).await
        }
        None => {
            warn!("no database configured; catalog changes are lost on restart");
            let store = Arc::new(InMemoryCatalogStore::new());
            let repos = Repositories {
                categories: store.clone(),
                items: store.clone(),
                hours: store.clone(),
                admins: store,
            };
            initialise_state(repos, images, config.locale, &config.bootstrap).await
        }
    }
}

fn build_image_store(config: &ServerConfig) -> io::Result<Arc<dyn ImageStore>> {
    match &config.image_dir {
        Some(dir) => {
            let store = FsImageStore::open(dir).map_err(|err| {
                io::Error::other(format!(
                    "failed to open image directory {}: {err}",
                    dir.display()
                ))
            })?;
            info!(dir = %dir.display(), "image cleanup enabled");
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(NoOpImageStore)),
    }
}

async fn initialise_state<C, I, H, A>(
    repos: Repositories<C, I, H, A>,
    images: Arc<dyn ImageStore>,
    locale: DisplayLocale,
    options: &BootstrapOptions,
) -> io::Result<web::Data<HttpState>>
where
    C: CategoryRepository + 'static,
    I: MenuItemRepository + 'static,
    H: OpeningHoursRepository + 'static,
    A: AdminAccountRepository + 'static,
{
    let Repositories {
        categories,
        items,
        hours,
        admins,
    } = repos;
    let hasher = AdminPasswordHasher::default();

    bootstrap::initialise(&*hours, &*admins, &*categories, &hasher, options)
        .await
        .map_err(|err| io::Error::other(format!("store initialisation failed: {err}")))?;

    let menu = Arc::new(MenuService::new(categories, items, images));
    let opening_hours = Arc::new(OpeningHoursService::new(hours));
    let ports = HttpStatePorts {
        login: Arc::new(AdminLoginService::with_hasher(admins, hasher)),
        menu: menu.clone(),
        menu_query: menu,
        opening_hours: opening_hours.clone(),
        opening_hours_query: opening_hours,
    };
    Ok(web::Data::new(HttpState::new(ports, locale)))
}
