//! Backend entry-point: loads settings, wires the store and serves HTTP.

mod server;

use std::io;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use foodgram::inbound::http::health::HealthState;
use foodgram::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Derive the cookie signing key from the configured key file.
///
/// A missing or short key file is fatal in release builds unless ephemeral
/// keys are explicitly allowed.
fn load_session_key(settings: &ServerSettings) -> io::Result<Key> {
    let key_path = settings.session_key_file();
    let loaded = std::fs::read(key_path).and_then(|bytes| {
        Key::try_from(bytes.as_slice())
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
    });
    match loaded {
        Ok(key) => Ok(key),
        Err(e) if cfg!(debug_assertions) || settings.allow_ephemeral_session_key => {
            warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(io::Error::other(format!(
            "failed to read session key at {}: {e}",
            key_path.display()
        ))),
    }
}

async fn connect_store(settings: &ServerSettings, database_url: &str) -> io::Result<DbPool> {
    run_pending_migrations(database_url)
        .await
        .map_err(|err| io::Error::other(err.to_string()))?;
    let config = PoolConfig::new(database_url)
        .with_max_size(settings.pool_max_size())
        .with_query_timeout(settings.query_timeout());
    DbPool::new(config)
        .await
        .map_err(|err| io::Error::other(err.to_string()))
}

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let public_base_url = settings
        .public_base_url()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let key = load_session_key(&settings)?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), SameSite::Lax, bind_addr)
        .with_public_base_url(public_base_url)
        .with_short_link_max_attempts(settings.short_link_max_attempts());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_store(&settings, database_url).await?);
        info!("connected to PostgreSQL store");
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}
