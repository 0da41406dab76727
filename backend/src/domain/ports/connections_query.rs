//! Driving port for the connection and discovery read models.
//!
//! HTTP handlers call this port with the caller resolved from the session.
//! They never see the repositories behind it.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, ExploreEntry, ReceivedRequest, UserId, UserProfile};

/// Use-case surface for connection queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionsQuery: Send + Sync {
    /// Pending requests addressed to `caller`, with requester profiles.
    async fn received_requests(&self, caller: &UserId) -> Result<Vec<ReceivedRequest>, Error>;

    /// Profiles of everyone `caller` is connected to.
    async fn connections(&self, caller: &UserId) -> Result<Vec<UserProfile>, Error>;

    /// Users `caller` has no request with, each with a connection badge.
    async fn explore(&self, caller: &UserId) -> Result<Vec<ExploreEntry>, Error>;

    /// Users `caller` has no request with and who are not connected to
    /// anyone.
    async fn feed(&self, caller: &UserId, page: PageRequest) -> Result<Vec<UserProfile>, Error>;
}
