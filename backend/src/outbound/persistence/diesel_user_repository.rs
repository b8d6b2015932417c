//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Account, SessionToken, User, UserId};

use super::error_mapping::{DieselFailure, classify, escape_like, pool_message};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

const USERNAME_KEY: &str = "users_username_key";
const SESSION_TOKEN_KEY: &str = "users_session_token_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &'static str,
    username: Option<&str>,
) -> UserRepositoryError {
    match classify(error, operation) {
        DieselFailure::Unique { constraint } => match constraint.as_deref() {
            Some(SESSION_TOKEN_KEY) => UserRepositoryError::duplicate_session_token(),
            Some(USERNAME_KEY) => {
                UserRepositoryError::duplicate_username(username.unwrap_or_default())
            }
            _ => UserRepositoryError::query("unique constraint violated"),
        },
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::ForeignKey => UserRepositoryError::query("foreign key violation"),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn query_error(operation: &'static str) -> impl Fn(diesel::result::Error) -> UserRepositoryError {
    move |error| map_diesel_error(error, operation, None)
}

fn to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserRepositoryError> {
    rows.into_iter()
        .map(UserRow::into_user)
        .collect::<Result<Vec<_>, _>>()
        .map_err(UserRepositoryError::query)
}

fn to_user(row: Option<UserRow>) -> Result<Option<User>, UserRepositoryError> {
    row.map(UserRow::into_user)
        .transpose()
        .map_err(UserRepositoryError::query)
}

impl DieselUserRepository {
    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        UserRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| UserRepositoryError::connection(pool_message(err)))
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &Account) -> Result<(), UserRepositoryError> {
        let mut conn = self.conn().await?;
        let row = NewUserRow::from(account);
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert user", Some(row.username)))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.conn().await?;
        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error("find user by id"))?;
        to_user(row)
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error("load users"))?;
        to_users(rows)
    }

    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, UserRepositoryError> {
        let mut conn = self.conn().await?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error("find account by username"))?;
        row.map(UserRow::into_account)
            .transpose()
            .map_err(UserRepositoryError::query)
    }

    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.conn().await?;
        let row = users::table
            .filter(users::session_token.eq(token.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error("find user by session token"))?;
        to_user(row)
    }

    async fn session_token_exists(&self, token: &SessionToken) -> Result<bool, UserRepositoryError> {
        let mut conn = self.conn().await?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::session_token.eq(token.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(query_error("check session token"))
    }

    async fn update_session_token(
        &self,
        id: &UserId,
        token: &SessionToken,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.conn().await?;
        let updated = diesel::update(users::table.find(id.as_uuid()))
            .set(users::session_token.eq(token.as_str()))
            .execute(&mut conn)
            .await
            .map_err(query_error("rotate session token"))?;
        Ok(updated > 0)
    }

    async fn search_by_username_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.conn().await?;
        let pattern = format!("{}%", escape_like(prefix));
        let rows = users::table
            .filter(users::username.ilike(pattern))
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_error("search users"))?;
        to_users(rows)
    }
}
