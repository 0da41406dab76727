//! Builders wiring store adapters into the HTTP state.

use std::sync::Arc;

use connection_feed::domain::ports::ConnectionsQuery;
use connection_feed::domain::{ConnectionFeedService, FeedPagination};
use connection_feed::inbound::http::state::HttpState;
use connection_feed::outbound::memory::InMemoryRelationshipStore;
use connection_feed::outbound::persistence::{
    DbPool, DieselConnectionRequestRepository, DieselUserProfileRepository,
};
use tracing::warn;

use super::ServerConfig;

/// Feed service over Postgres.
fn diesel_connections(pool: &DbPool, mode: FeedPagination) -> Arc<dyn ConnectionsQuery> {
    Arc::new(
        ConnectionFeedService::new(
            Arc::new(DieselConnectionRequestRepository::new(pool.clone())),
            Arc::new(DieselUserProfileRepository::new(pool.clone())),
        )
        .with_pagination(mode),
    )
}

/// Feed service over a single in-memory store backing both ports.
fn memory_connections(
    store: Arc<InMemoryRelationshipStore>,
    mode: FeedPagination,
) -> Arc<dyn ConnectionsQuery> {
    Arc::new(ConnectionFeedService::new(store.clone(), store).with_pagination(mode))
}

/// Select the store from configuration and build the handler state.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let connections = match &config.db_pool {
        Some(pool) => diesel_connections(pool, config.feed_pagination),
        None => {
            warn!("no database configured; serving from an empty in-memory store");
            memory_connections(
                Arc::new(InMemoryRelationshipStore::new()),
                config.feed_pagination,
            )
        }
    };
    HttpState::new(connections)
}
