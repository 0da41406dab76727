//! Domain primitives, ports, and services.
//!
//! Purpose: define the strongly typed values the connection endpoints return
//! and the service that computes them. Everything here is transport agnostic;
//! serialisation contracts (serde) are documented on each type.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - UserId / UserProfile: identity and safe-field projection.
//! - ConnectionRequest / ReceivedRequest / ExploreEntry: read models.
//! - ConnectionFeedService: implementation of the `ConnectionsQuery` port.

pub mod connection;
pub mod connection_feed_service;
pub mod error;
pub mod exclusion;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::connection::{
    ConnectionBadge, ConnectionRequest, ConnectionStatus, ExploreEntry, ReceivedRequest,
    UnknownConnectionStatus,
};
pub use self::connection_feed_service::{ConnectionFeedService, FeedPagination};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exclusion::UserIdSet;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Gender, UnknownGender, UserId, UserProfile, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use connection_feed::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
