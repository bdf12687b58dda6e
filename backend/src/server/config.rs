//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use foodgram::domain::DEFAULT_MAX_ATTEMPTS;
use foodgram::outbound::persistence::DbPool;
use url::Url;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) public_base_url: Option<Url>,
    pub(crate) short_link_max_attempts: u32,
}

impl ServerConfig {
    /// Construct a server configuration with the in-memory store.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            public_base_url: None,
            short_link_max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Attach a database connection pool; repositories then use PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Build absolute short-link URLs from this origin.
    #[must_use]
    pub fn with_public_base_url(mut self, base: Option<Url>) -> Self {
        self.public_base_url = base;
        self
    }

    /// Override the short-code generation attempts.
    #[must_use]
    pub fn with_short_link_max_attempts(mut self, attempts: u32) -> Self {
        self.short_link_max_attempts = attempts;
        self
    }
}
