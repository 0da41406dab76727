//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports expose typed errors so adapters map their failures into
//! predictable variants. The driving port speaks domain [`Error`]s.
//!
//! [`Error`]: crate::domain::Error

mod macros;
pub(crate) use macros::define_port_error;

mod connection_request_repository;
mod connections_query;
mod user_profile_repository;

#[cfg(test)]
pub use connection_request_repository::MockConnectionRequestRepository;
pub use connection_request_repository::{
    ConnectionRequestRepository, ConnectionRequestRepositoryError,
};
#[cfg(test)]
pub use connections_query::MockConnectionsQuery;
pub use connections_query::ConnectionsQuery;
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{UserProfileRepository, UserProfileRepositoryError};
