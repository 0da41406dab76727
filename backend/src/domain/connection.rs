//! Connection requests and the read models built from them.
//!
//! A [`ConnectionRequest`] is a directed edge between two users. The store is
//! expected to hold at most one live request per unordered pair and never a
//! self-referencing one; nothing here enforces that.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{UserId, UserProfile};

/// Lifecycle status of a connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// The requester has asked to connect.
    Requested,
    /// The requester expressed interest; pending for the recipient.
    Interested,
    /// Both parties are connected.
    Accepted,
    /// The recipient declined.
    Rejected,
}

impl ConnectionStatus {
    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Interested => "interested",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown connection status: {0}")]
pub struct UnknownConnectionStatus(pub String);

impl FromStr for ConnectionStatus {
    type Err = UnknownConnectionStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            "interested" => Ok(Self::Interested),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownConnectionStatus(other.to_owned())),
        }
    }
}

/// Directed connection request between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConnectionRequest {
    /// Create a request stamped with the current time.
    pub fn new(from_user_id: UserId, to_user_id: UserId, status: ConnectionStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            from_user_id,
            to_user_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` is either endpoint.
    pub fn involves(&self, user: &UserId) -> bool {
        &self.from_user_id == user || &self.to_user_id == user
    }

    /// The endpoint opposite `caller`.
    ///
    /// When `caller` is the requester the recipient is returned; otherwise
    /// the requester is.
    pub fn counterpart(&self, caller: &UserId) -> &UserId {
        if &self.from_user_id == caller {
            &self.to_user_id
        } else {
            &self.from_user_id
        }
    }

    /// Both endpoints, requester first.
    pub fn endpoints(&self) -> [&UserId; 2] {
        [&self.from_user_id, &self.to_user_id]
    }
}

/// A pending request with the requester's profile joined in.
///
/// Serialises like a [`ConnectionRequest`] except that `fromUserId` carries
/// the profile object instead of a bare identifier. A requester with no
/// stored profile serialises as `null`; the request itself is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub from_user_id: Option<UserProfile>,
    pub to_user_id: UserId,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReceivedRequest {
    /// Join `requester` into `request`.
    ///
    /// Pass `None` when the requester has no profile. Returns `None` when a
    /// profile is given that does not belong to the requester.
    pub fn populate(request: ConnectionRequest, requester: Option<UserProfile>) -> Option<Self> {
        if requester
            .as_ref()
            .is_some_and(|profile| profile.id != request.from_user_id)
        {
            return None;
        }
        Some(Self {
            id: request.id,
            from_user_id: requester,
            to_user_id: request.to_user_id,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        })
    }
}

/// Badge shown next to explore entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionBadge {
    /// The user has at least one accepted connection.
    Connected,
    /// The user has no accepted connection.
    NotConnected,
}

/// Explore list entry: a profile with its badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreEntry {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub status: ConnectionBadge,
}
