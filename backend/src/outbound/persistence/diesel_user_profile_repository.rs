//! PostgreSQL-backed `UserProfileRepository` using Diesel.
//!
//! Only the safe profile columns are selected; see [`ProfileRow`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{UserId, UserIdSet, UserProfile};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::ProfileRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed reader for user profiles.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserProfileRepositoryError {
    map_pool_error(error, UserProfileRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_diesel_error(
        error,
        UserProfileRepositoryError::query,
        UserProfileRepositoryError::connection,
    )
}

/// Offset and limit as the signed integers Postgres expects.
fn sql_bounds(window: PageWindow) -> (i64, i64) {
    let offset = i64::try_from(window.skip()).unwrap_or(i64::MAX);
    (offset, i64::from(window.limit()))
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn find_profiles(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = users::table
            .filter(users::id.eq_any(ids))
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(UserProfile::from).collect())
    }

    async fn find_excluding(
        &self,
        excluded: &UserIdSet,
        window: Option<PageWindow>,
    ) -> Result<Vec<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let excluded: Vec<Uuid> = excluded.ids().map(|id| *id.as_uuid()).collect();

        let mut query = users::table
            .filter(users::id.ne_all(excluded))
            .order((users::created_at.asc(), users::id.asc()))
            .select(ProfileRow::as_select())
            .into_boxed();
        if let Some(window) = window {
            let (offset, limit) = sql_bounds(window);
            query = query.offset(offset).limit(limit);
        }

        let rows = query.load(&mut conn).await.map_err(diesel_error)?;
        Ok(rows.into_iter().map(UserProfile::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagination::PageRequest;
    use rstest::rstest;

    #[rstest]
    #[case(1, 10, 0, 10)]
    #[case(3, 50, 100, 50)]
    fn windows_translate_to_sql_bounds(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] offset: i64,
        #[case] expected_limit: i64,
    ) {
        let window = PageRequest::new(Some(page), Some(limit)).window();
        assert_eq!(sql_bounds(window), (offset, expected_limit));
    }

    #[rstest]
    fn pool_failures_map_to_connection_errors() {
        let err = pool_error(PoolError::build("bad url"));
        assert_eq!(err, UserProfileRepositoryError::connection("bad url"));
    }
}
