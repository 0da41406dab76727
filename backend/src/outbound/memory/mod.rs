//! In-memory relationship store.
//!
//! Backs the server when no database URL is configured and drives the
//! cross-layer scenario tests. Users and requests keep insertion order, which
//! stands in for store order.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use pagination::PageWindow;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    ConnectionRequestRepository, ConnectionRequestRepositoryError, UserProfileRepository,
    UserProfileRepositoryError,
};
use crate::domain::{ConnectionRequest, ConnectionStatus, UserId, UserIdSet, UserProfile};

const POISONED: &str = "relationship store lock poisoned";

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserProfile>,
    requests: Vec<ConnectionRequest>,
}

/// Thread-safe store implementing both driven ports.
///
/// ```
/// use connection_feed::domain::{ConnectionStatus, UserId, UserProfile};
/// use connection_feed::outbound::memory::InMemoryRelationshipStore;
///
/// let store = InMemoryRelationshipStore::new();
/// let (ada, grace) = (UserId::random(), UserId::random());
/// store.insert_user(UserProfile::new(ada.clone(), "Ada").expect("valid profile"));
/// store.insert_user(UserProfile::new(grace.clone(), "Grace").expect("valid profile"));
/// let request = store.insert_request(ada, grace, ConnectionStatus::Interested);
/// assert!(request.is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRelationshipStore {
    tables: RwLock<Tables>,
}

impl InMemoryRelationshipStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Option<RwLockReadGuard<'_, Tables>> {
        self.tables.read().ok()
    }

    fn write(&self) -> Option<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().ok()
    }

    /// Add or replace a user profile. Returns `false` if the lock is poisoned.
    pub fn insert_user(&self, profile: UserProfile) -> bool {
        let Some(mut tables) = self.write() else {
            return false;
        };
        match tables.users.iter_mut().find(|user| user.id == profile.id) {
            Some(existing) => *existing = profile,
            None => tables.users.push(profile),
        }
        true
    }

    /// Record a request from `from` to `to`, returning its id.
    ///
    /// Returns `None` for a self-request or a poisoned lock.
    pub fn insert_request(
        &self,
        from: UserId,
        to: UserId,
        status: ConnectionStatus,
    ) -> Option<Uuid> {
        if from == to {
            debug!(user = %from, "ignoring self-request");
            return None;
        }
        let request = ConnectionRequest::new(from, to, status);
        let id = request.id;
        self.write()?.requests.push(request);
        Some(id)
    }

    /// Move a request to `status`. Returns `false` when it does not exist.
    pub fn set_status(&self, request: Uuid, status: ConnectionStatus) -> bool {
        let Some(mut tables) = self.write() else {
            return false;
        };
        let Some(found) = tables.requests.iter_mut().find(|r| r.id == request) else {
            return false;
        };
        found.status = status;
        found.updated_at = Utc::now();
        true
    }

    fn select_requests<F>(
        &self,
        predicate: F,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError>
    where
        F: Fn(&ConnectionRequest) -> bool,
    {
        let tables = self
            .read()
            .ok_or_else(|| ConnectionRequestRepositoryError::query(POISONED))?;
        Ok(tables
            .requests
            .iter()
            .filter(|request| predicate(request))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ConnectionRequestRepository for InMemoryRelationshipStore {
    async fn find_received(
        &self,
        recipient: &UserId,
        status: ConnectionStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError> {
        self.select_requests(|r| &r.to_user_id == recipient && r.status == status)
    }

    async fn find_involving(
        &self,
        user: &UserId,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError> {
        self.select_requests(|r| r.involves(user) && status.is_none_or(|s| r.status == s))
    }

    async fn find_by_status(
        &self,
        status: ConnectionStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError> {
        self.select_requests(|r| r.status == status)
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryRelationshipStore {
    async fn find_profiles(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        let tables = self
            .read()
            .ok_or_else(|| UserProfileRepositoryError::query(POISONED))?;
        Ok(tables
            .users
            .iter()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn find_excluding(
        &self,
        excluded: &UserIdSet,
        window: Option<PageWindow>,
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        let tables = self
            .read()
            .ok_or_else(|| UserProfileRepositoryError::query(POISONED))?;
        let remaining = tables
            .users
            .iter()
            .filter(|user| !excluded.contains(&user.id))
            .cloned();
        Ok(match window {
            Some(window) => window.apply(remaining).collect(),
            None => remaining.collect(),
        })
    }
}
