//! PostgreSQL-backed `TweetRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{TweetRepository, TweetRepositoryError};
use crate::domain::{TweetRecord, TweetSource};

use super::error_mapping::{DieselFailure, classify, pool_message};
use super::models::TweetRow;
use super::pool::DbPool;
use super::schema::{follows, tweets};

/// Diesel-backed implementation of the [`TweetRepository`] port.
#[derive(Clone)]
pub struct DieselTweetRepository {
    pool: DbPool,
}

impl DieselTweetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> TweetRepositoryError {
    match classify(error, operation) {
        DieselFailure::ForeignKey => TweetRepositoryError::missing_user(),
        DieselFailure::Unique { .. } => TweetRepositoryError::query("unique constraint violated"),
        DieselFailure::Connection(message) => TweetRepositoryError::connection(message),
        DieselFailure::Query(message) => TweetRepositoryError::query(message),
    }
}

#[async_trait]
impl TweetRepository for DieselTweetRepository {
    async fn insert(&self, tweet: &TweetRecord) -> Result<(), TweetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| TweetRepositoryError::connection(pool_message(err)))?;
        diesel::insert_into(tweets::table)
            .values(TweetRow::from(tweet))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert tweet"))
    }

    async fn page(
        &self,
        source: &TweetSource,
        request: PageRequest,
    ) -> Result<Vec<TweetRecord>, TweetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| TweetRepositoryError::connection(pool_message(err)))?;

        let mut query = tweets::table
            .select(TweetRow::as_select())
            .order((tweets::created_at.desc(), tweets::id.desc()))
            .offset(i64::from(request.offset()))
            .limit(i64::from(request.limit()))
            .into_boxed();
        query = match source {
            TweetSource::AuthoredBy(author) => {
                query.filter(tweets::author_id.eq(*author.as_uuid()))
            }
            TweetSource::FollowedBy(follower) => query.filter(
                tweets::author_id.eq_any(
                    follows::table
                        .filter(follows::follower_id.eq(*follower.as_uuid()))
                        .select(follows::followee_id),
                ),
            ),
        };

        let rows = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load tweet page"))?;
        rows.into_iter()
            .map(TweetRow::into_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(TweetRepositoryError::query)
    }
}
