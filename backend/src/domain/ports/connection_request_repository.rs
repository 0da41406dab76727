//! Driven port for reading connection requests from the relationship store.

use async_trait::async_trait;

use crate::domain::{ConnectionRequest, ConnectionStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by connection request adapters.
    pub enum ConnectionRequestRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "connection request store unavailable: {message}",
        /// A query failed during execution.
        Query { message: String } => "connection request query failed: {message}",
    }
}

/// Read-only access to the `connection_requests` collection.
///
/// Results are returned in store order (creation order for the bundled
/// adapters).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRequestRepository: Send + Sync {
    /// Requests addressed to `recipient` with the given status.
    async fn find_received(
        &self,
        recipient: &UserId,
        status: ConnectionStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError>;

    /// Requests where `user` is either endpoint, optionally filtered by
    /// status.
    async fn find_involving(
        &self,
        user: &UserId,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError>;

    /// Every request in the store with the given status.
    async fn find_by_status(
        &self,
        status: ConnectionStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError>;
}
