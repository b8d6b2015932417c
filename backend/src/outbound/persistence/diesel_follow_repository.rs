//! PostgreSQL-backed `FollowRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FollowRepository, FollowRepositoryError};
use crate::domain::{FollowCounts, FollowEdge, User, UserId};

use super::error_mapping::{DieselFailure, classify, pool_message};
use super::models::{NewFollowRow, UserRow};
use super::pool::DbPool;
use super::schema::{follows, users};

const EDGE_KEY: &str = "follows_pkey";

/// Diesel-backed implementation of the [`FollowRepository`] port.
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> FollowRepositoryError {
    match classify(error, operation) {
        DieselFailure::Unique { constraint } if constraint.as_deref() == Some(EDGE_KEY) => {
            FollowRepositoryError::duplicate_edge()
        }
        DieselFailure::Unique { .. } => FollowRepositoryError::query("unique constraint violated"),
        DieselFailure::ForeignKey => FollowRepositoryError::missing_user(),
        DieselFailure::Connection(message) => FollowRepositoryError::connection(message),
        DieselFailure::Query(message) => FollowRepositoryError::query(message),
    }
}

fn query_error(operation: &'static str) -> impl Fn(diesel::result::Error) -> FollowRepositoryError {
    move |error| map_diesel_error(error, operation)
}

fn to_users(rows: Vec<UserRow>) -> Result<Vec<User>, FollowRepositoryError> {
    rows.into_iter()
        .map(UserRow::into_user)
        .collect::<Result<Vec<_>, _>>()
        .map_err(FollowRepositoryError::query)
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

impl DieselFollowRepository {
    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        FollowRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| FollowRepositoryError::connection(pool_message(err)))
    }
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn insert(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError> {
        let mut conn = self.conn().await?;
        let row = NewFollowRow {
            follower_id: *edge.follower().as_uuid(),
            followee_id: *edge.followee().as_uuid(),
        };
        diesel::insert_into(follows::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(query_error("insert follow"))
    }

    async fn delete(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError> {
        let mut conn = self.conn().await?;
        let removed = diesel::delete(
            follows::table.find((*edge.follower().as_uuid(), *edge.followee().as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(query_error("delete follow"))?;
        if removed == 0 {
            return Err(FollowRepositoryError::edge_not_found());
        }
        Ok(())
    }

    async fn exists(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        let mut conn = self.conn().await?;
        diesel::select(diesel::dsl::exists(
            follows::table.find((*follower.as_uuid(), *followee.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(query_error("check follow"))
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        candidates: &[UserId],
    ) -> Result<Vec<UserId>, FollowRepositoryError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let uuids: Vec<Uuid> = candidates.iter().map(|id| *id.as_uuid()).collect();
        let followed: Vec<Uuid> = follows::table
            .filter(follows::follower_id.eq(follower.as_uuid()))
            .filter(follows::followee_id.eq_any(uuids))
            .select(follows::followee_id)
            .load(&mut conn)
            .await
            .map_err(query_error("load followed candidates"))?;
        Ok(followed.into_iter().map(UserId::from_uuid).collect())
    }

    async fn followers(&self, user: &UserId) -> Result<Vec<User>, FollowRepositoryError> {
        let mut conn = self.conn().await?;
        let follower_ids = follows::table
            .filter(follows::followee_id.eq(*user.as_uuid()))
            .select(follows::follower_id);
        let rows = users::table
            .filter(users::id.eq_any(follower_ids))
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error("load followers"))?;
        to_users(rows)
    }

    async fn following(&self, user: &UserId) -> Result<Vec<User>, FollowRepositoryError> {
        let mut conn = self.conn().await?;
        let followee_ids = follows::table
            .filter(follows::follower_id.eq(*user.as_uuid()))
            .select(follows::followee_id);
        let rows = users::table
            .filter(users::id.eq_any(followee_ids))
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error("load following"))?;
        to_users(rows)
    }

    async fn counts(&self, user: &UserId) -> Result<FollowCounts, FollowRepositoryError> {
        let mut conn = self.conn().await?;
        let followers: i64 = follows::table
            .filter(follows::followee_id.eq(user.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_error("count followers"))?;
        let following: i64 = follows::table
            .filter(follows::follower_id.eq(user.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_error("count following"))?;
        Ok(FollowCounts {
            followers: to_count(followers),
            following: to_count(following),
        })
    }
}
