//! Server settings loaded via OrthoConfig and the resolved server configuration.

use std::net::SocketAddr;

use connection_feed::domain::FeedPagination;
use connection_feed::inbound::http::session_config::SessionSettings;
use connection_feed::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Raised when a setting cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum ServerSettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Process settings, read from `CONNECTIONS_*` variables, config files and
/// CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONNECTIONS")]
pub struct ServerSettings {
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Postgres URL. Without it the server runs on an empty in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply `page`/`limit` to the feed instead of returning every match.
    #[ortho_config(default = false)]
    pub feed_apply_pagination: bool,
}

impl ServerSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| ServerSettingsError::BindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Pool size with the default applied.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Feed pagination mode.
    pub fn feed_pagination(&self) -> FeedPagination {
        FeedPagination::from(self.feed_apply_pagination)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) feed_pagination: FeedPagination,
}

impl ServerConfig {
    /// Configuration with no database and the default feed mode.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            feed_pagination: FeedPagination::default(),
        }
    }

    /// Serve from Postgres instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Select how the feed treats `page` and `limit`.
    #[must_use]
    pub fn with_feed_pagination(mut self, mode: FeedPagination) -> Self {
        self.feed_pagination = mode;
        self
    }
}
