//! Backend entry-point: loads configuration, prepares the store and serves
//! the REST API with its OpenAPI docs.

mod server;

use std::io;
use std::net::SocketAddr;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use menuboard::inbound::http::health::HealthState;
use menuboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
use menuboard::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use menuboard::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    info!(?settings, "configuration loaded");

    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(|e| io::Error::other(format!("invalid session configuration: {e}")))?;
    let bind_addr: SocketAddr = settings.bind_addr().parse().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid bind address {}: {e}", settings.bind_addr()),
        )
    })?;
    let locale = settings
        .display_locale()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut config = ServerConfig::new(session, bind_addr, locale)
        .with_image_dir(settings.image_dir.clone())
        .with_bootstrap(settings.bootstrap_options(cfg!(debug_assertions)));

    if let Some(database_url) = settings.database_url.as_deref() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(|e| io::Error::other(e.to_string()))?;
        info!(applied, "database schema up to date");
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| io::Error::other(format!("failed to create database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).await?;
    info!(%bind_addr, "listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
