//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! port, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ConnectionsQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Connection and discovery queries.
    pub connections: Arc<dyn ConnectionsQuery>,
}

impl HttpState {
    /// Wrap the given port implementation.
    pub fn new(connections: Arc<dyn ConnectionsQuery>) -> Self {
        Self { connections }
    }
}
