//! Outbound adapters implementing the relationship store ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel.
//! - **memory**: a process-local store for running without a database.
//!
//! Adapters translate between store representations and domain types; they
//! contain no business logic.

pub mod memory;
pub mod persistence;
