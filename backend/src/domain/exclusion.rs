//! Exclusion sets used to filter discovery lists.

use std::collections::HashSet;

use super::{ConnectionRequest, UserId};

/// Set of users hidden from a discovery list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdSet(HashSet<UserId>);

impl UserIdSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Both endpoints of every request in `requests`.
    pub fn from_endpoints<'a, I>(requests: I) -> Self
    where
        I: IntoIterator<Item = &'a ConnectionRequest>,
    {
        let mut set = Self::new();
        set.extend_endpoints(requests);
        set
    }

    /// Add both endpoints of every request in `requests`.
    pub fn extend_endpoints<'a, I>(&mut self, requests: I)
    where
        I: IntoIterator<Item = &'a ConnectionRequest>,
    {
        for request in requests {
            for endpoint in request.endpoints() {
                self.0.insert(endpoint.clone());
            }
        }
    }

    /// Add a single user.
    pub fn insert(&mut self, user: UserId) -> bool {
        self.0.insert(user)
    }

    /// Whether `user` is excluded.
    pub fn contains(&self, user: &UserId) -> bool {
        self.0.contains(user)
    }

    /// Iterate over the excluded identifiers.
    pub fn ids(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }

    /// Number of excluded users.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<UserId> for UserIdSet {
    fn from_iter<T: IntoIterator<Item = UserId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionStatus;
    use rstest::rstest;

    #[rstest]
    fn collects_both_endpoints_without_duplicates() {
        let alice = UserId::random();
        let bob = UserId::random();
        let carol = UserId::random();
        let requests = [
            ConnectionRequest::new(alice.clone(), bob.clone(), ConnectionStatus::Interested),
            ConnectionRequest::new(carol.clone(), alice.clone(), ConnectionStatus::Rejected),
        ];

        let set = UserIdSet::from_endpoints(&requests);

        assert_eq!(set.len(), 3);
        assert!(set.contains(&alice));
        assert!(set.contains(&bob));
        assert!(set.contains(&carol));
    }

    #[rstest]
    fn insert_reports_new_members() {
        let alice = UserId::random();
        let mut set = UserIdSet::new();
        assert!(set.is_empty());
        assert!(set.insert(alice.clone()));
        assert!(!set.insert(alice));
    }
}
