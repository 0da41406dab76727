//! Connection and discovery read models.
//!
//! Every operation is a stateless read over the relationship store. The only
//! logic here is building exclusion sets and shaping results; there are no
//! writes, retries, or transactions, and concurrent reads are not mutually
//! consistent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryFutureExt;
use pagination::{PageRequest, PageWindow};
use tracing::{debug, warn};

use crate::domain::ports::{
    ConnectionRequestRepository, ConnectionRequestRepositoryError, ConnectionsQuery,
    UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::{
    ConnectionBadge, ConnectionRequest, ConnectionStatus, Error, ExploreEntry, ReceivedRequest,
    UserId, UserIdSet, UserProfile,
};

/// Whether the feed honours the requested page window.
///
/// With [`FeedPagination::Ignore`] the window is still parsed and clamped but
/// every eligible user is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedPagination {
    /// Return the whole eligible set.
    #[default]
    Ignore,
    /// Return only the requested page.
    Apply,
}

impl From<bool> for FeedPagination {
    fn from(apply: bool) -> Self {
        if apply { Self::Apply } else { Self::Ignore }
    }
}

/// Domain service implementing [`ConnectionsQuery`].
#[derive(Clone)]
pub struct ConnectionFeedService<R, U> {
    requests: Arc<R>,
    users: Arc<U>,
    pagination: FeedPagination,
}

impl<R, U> ConnectionFeedService<R, U> {
    /// Create a service over the given repositories.
    pub fn new(requests: Arc<R>, users: Arc<U>) -> Self {
        Self {
            requests,
            users,
            pagination: FeedPagination::default(),
        }
    }

    /// Select how the feed treats the page window.
    #[must_use]
    pub fn with_pagination(mut self, pagination: FeedPagination) -> Self {
        self.pagination = pagination;
        self
    }
}

impl<R, U> ConnectionFeedService<R, U>
where
    R: ConnectionRequestRepository,
    U: UserProfileRepository,
{
    fn map_request_error(error: ConnectionRequestRepositoryError) -> Error {
        warn!(%error, "connection request lookup failed");
        match error {
            ConnectionRequestRepositoryError::Connection { message }
            | ConnectionRequestRepositoryError::Query { message } => {
                Error::invalid_request(message)
            }
        }
    }

    fn map_profile_error(error: UserProfileRepositoryError) -> Error {
        warn!(%error, "user profile lookup failed");
        match error {
            UserProfileRepositoryError::Connection { message }
            | UserProfileRepositoryError::Query { message } => Error::invalid_request(message),
        }
    }

    async fn profiles_by_id(&self, ids: Vec<UserId>) -> Result<HashMap<UserId, UserProfile>, Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let profiles = self
            .users
            .find_profiles(&ids)
            .await
            .map_err(Self::map_profile_error)?;
        Ok(profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect())
    }

    /// Requests involving `caller` plus every accepted request, fetched
    /// concurrently.
    async fn relationship_snapshot(
        &self,
        caller: &UserId,
    ) -> Result<(Vec<ConnectionRequest>, Vec<ConnectionRequest>), Error> {
        futures_util::try_join!(
            self.requests
                .find_involving(caller, None)
                .map_err(Self::map_request_error),
            self.requests
                .find_by_status(ConnectionStatus::Accepted)
                .map_err(Self::map_request_error),
        )
    }
}

fn unique_in_order<'a>(ids: impl IntoIterator<Item = &'a UserId>) -> Vec<UserId> {
    let mut seen = UserIdSet::new();
    ids.into_iter()
        .filter(|id| seen.insert((*id).clone()))
        .cloned()
        .collect()
}

#[async_trait]
impl<R, U> ConnectionsQuery for ConnectionFeedService<R, U>
where
    R: ConnectionRequestRepository,
    U: UserProfileRepository,
{
    async fn received_requests(&self, caller: &UserId) -> Result<Vec<ReceivedRequest>, Error> {
        let requests = self
            .requests
            .find_received(caller, ConnectionStatus::Interested)
            .await
            .map_err(Self::map_request_error)?;

        let requester_ids = unique_in_order(requests.iter().map(|r| &r.from_user_id));
        let profiles = self.profiles_by_id(requester_ids).await?;

        Ok(requests
            .into_iter()
            .filter_map(|request| {
                let profile = profiles.get(&request.from_user_id).cloned();
                if profile.is_none() {
                    debug!(request_id = %request.id, "requester missing; populating as null");
                }
                ReceivedRequest::populate(request, profile)
            })
            .collect())
    }

    async fn connections(&self, caller: &UserId) -> Result<Vec<UserProfile>, Error> {
        let accepted = self
            .requests
            .find_involving(caller, Some(ConnectionStatus::Accepted))
            .await
            .map_err(Self::map_request_error)?;

        let counterparts: Vec<&UserId> = accepted.iter().map(|r| r.counterpart(caller)).collect();
        let profiles = self
            .profiles_by_id(unique_in_order(counterparts.iter().copied()))
            .await?;

        Ok(counterparts
            .into_iter()
            .filter_map(|id| profiles.get(id).cloned())
            .collect())
    }

    async fn explore(&self, caller: &UserId) -> Result<Vec<ExploreEntry>, Error> {
        let (involving, accepted) = self.relationship_snapshot(caller).await?;

        let mut excluded = UserIdSet::from_endpoints(&involving);
        excluded.insert(caller.clone());
        let connected = UserIdSet::from_endpoints(&accepted);

        let candidates = self
            .users
            .find_excluding(&excluded, None)
            .await
            .map_err(Self::map_profile_error)?;

        debug!(
            excluded = excluded.len(),
            returned = candidates.len(),
            "explore list built"
        );
        Ok(candidates
            .into_iter()
            .map(|profile| {
                let status = if connected.contains(&profile.id) {
                    ConnectionBadge::Connected
                } else {
                    ConnectionBadge::NotConnected
                };
                ExploreEntry { profile, status }
            })
            .collect())
    }

    async fn feed(&self, caller: &UserId, page: PageRequest) -> Result<Vec<UserProfile>, Error> {
        let window: PageWindow = page.window();
        let (involving, accepted) = self.relationship_snapshot(caller).await?;

        let mut excluded = UserIdSet::from_endpoints(&involving);
        excluded.extend_endpoints(&accepted);
        excluded.insert(caller.clone());

        let applied = match self.pagination {
            FeedPagination::Ignore => None,
            FeedPagination::Apply => Some(window),
        };
        debug!(
            skip = window.skip(),
            limit = window.limit(),
            paginated = applied.is_some(),
            excluded = excluded.len(),
            "building feed"
        );

        self.users
            .find_excluding(&excluded, applied)
            .await
            .map_err(Self::map_profile_error)
    }
}

#[cfg(test)]
#[path = "connection_feed_service_tests.rs"]
mod tests;
