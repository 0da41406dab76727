//! Driven port for reading the safe profile projection of users.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{UserId, UserIdSet, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user profile adapters.
    pub enum UserProfileRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user store unavailable: {message}",
        /// A query failed during execution.
        Query { message: String } => "user profile query failed: {message}",
    }
}

/// Read-only access to the `users` collection, projected to safe fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Profiles for the given identifiers.
    ///
    /// Unknown identifiers are silently absent from the result; order is not
    /// guaranteed to follow `ids`.
    async fn find_profiles(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError>;

    /// Every profile whose identifier is not in `excluded`, in store order.
    ///
    /// When `window` is given only that slice is returned.
    async fn find_excluding(
        &self,
        excluded: &UserIdSet,
        window: Option<PageWindow>,
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError>;
}
