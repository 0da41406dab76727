//! PostgreSQL-backed `ConnectionRequestRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ConnectionRequestRepository, ConnectionRequestRepositoryError};
use crate::domain::{ConnectionRequest, ConnectionStatus, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::ConnectionRequestRow;
use super::pool::{DbPool, PoolError};
use super::schema::connection_requests;

/// Diesel-backed reader for the `connection_requests` table.
///
/// Rows are returned oldest first, ties broken by id, so callers see a stable
/// store order.
#[derive(Clone)]
pub struct DieselConnectionRequestRepository {
    pool: DbPool,
}

impl DieselConnectionRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ConnectionRequestRepositoryError {
    map_pool_error(error, ConnectionRequestRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ConnectionRequestRepositoryError {
    map_diesel_error(
        error,
        ConnectionRequestRepositoryError::query,
        ConnectionRequestRepositoryError::connection,
    )
}

fn into_requests(
    rows: Vec<ConnectionRequestRow>,
) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError> {
    rows.into_iter()
        .map(|row| ConnectionRequest::try_from(row).map_err(ConnectionRequestRepositoryError::query))
        .collect()
}

#[async_trait]
impl ConnectionRequestRepository for DieselConnectionRequestRepository {
    async fn find_received(
        &self,
        recipient: &UserId,
        status: ConnectionStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows = connection_requests::table
            .filter(connection_requests::to_user_id.eq(*recipient.as_uuid()))
            .filter(connection_requests::status.eq(status.as_str()))
            .order((
                connection_requests::created_at.asc(),
                connection_requests::id.asc(),
            ))
            .select(ConnectionRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        into_requests(rows)
    }

    async fn find_involving(
        &self,
        user: &UserId,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id = *user.as_uuid();

        let mut query = connection_requests::table
            .filter(
                connection_requests::from_user_id
                    .eq(id)
                    .or(connection_requests::to_user_id.eq(id)),
            )
            .order((
                connection_requests::created_at.asc(),
                connection_requests::id.asc(),
            ))
            .select(ConnectionRequestRow::as_select())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(connection_requests::status.eq(status.as_str()));
        }

        let rows = query.load(&mut conn).await.map_err(diesel_error)?;
        into_requests(rows)
    }

    async fn find_by_status(
        &self,
        status: ConnectionStatus,
    ) -> Result<Vec<ConnectionRequest>, ConnectionRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows = connection_requests::table
            .filter(connection_requests::status.eq(status.as_str()))
            .order((
                connection_requests::created_at.asc(),
                connection_requests::id.asc(),
            ))
            .select(ConnectionRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        into_requests(rows)
    }
}
