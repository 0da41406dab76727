//! PostgreSQL adapters for the relationship store using Diesel.
//!
//! Repositories are thin readers: they select rows, convert them to domain
//! types and map failures onto the port error enums. Row structs and table
//! definitions stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use connection_feed::outbound::persistence::{
//!     DbPool, DieselConnectionRequestRepository, DieselUserProfileRepository, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/devtinder")).await?;
//! let requests = DieselConnectionRequestRepository::new(pool.clone());
//! let profiles = DieselUserProfileRepository::new(pool);
//! # let _ = (requests, profiles);
//! # Ok(())
//! # }
//! ```

mod diesel_connection_request_repository;
mod diesel_user_profile_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_connection_request_repository::DieselConnectionRequestRepository;
pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
