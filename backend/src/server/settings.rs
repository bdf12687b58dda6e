//! Startup settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `FOODGRAM_*` environment variables over an
//! optional configuration file. Value fields are optional and accessors
//! supply the defaults. Boolean switches default to `false`, so each is
//! phrased as an opt-in.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use foodgram::domain::DEFAULT_MAX_ATTEMPTS;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;

/// Settings whose values cannot be used as given.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    /// `public_base_url` is not an absolute URL.
    #[error("invalid public base URL {value:?}: {source}")]
    PublicBaseUrl {
        value: String,
        source: url::ParseError,
    },
}

/// Server settings for the HTTP listener, store and short links.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOODGRAM")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Origin used for absolute short-link URLs.
    pub public_base_url: Option<String>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated session key when the key file is missing.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
    /// Omit the `Secure` attribute from the session cookie (plain-HTTP dev).
    #[ortho_config(default = false)]
    pub allow_insecure_cookie: bool,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Deadline for a single store round trip, in milliseconds.
    pub query_timeout_ms: Option<u64>,
    /// Code generation attempts before giving up on a short link.
    pub short_link_max_attempts: Option<u32>,
}

impl ServerSettings {
    /// Parsed listener address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parsed public base URL, if configured.
    pub fn public_base_url(&self) -> Result<Option<Url>, SettingsError> {
        self.public_base_url
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|source| SettingsError::PublicBaseUrl {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    /// Configured database URL; an empty value counts as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Session key path, defaulting to the mounted secret.
    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie carries `Secure`.
    pub fn cookie_secure(&self) -> bool {
        !self.allow_insecure_cookie
    }

    /// Maximum pooled connections.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Deadline applied to each store round trip.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms.unwrap_or(DEFAULT_QUERY_TIMEOUT_MS))
    }

    /// Short-code generation attempts per link.
    pub fn short_link_max_attempts(&self) -> u32 {
        self.short_link_max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }
}
