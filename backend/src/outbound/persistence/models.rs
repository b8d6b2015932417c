//! Internal Diesel row structs.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain; conversions below validate stored values on the way out.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Account, PasswordDigest, SessionToken, TweetBody, TweetId, TweetRecord, User, UserId,
    Username,
};

use super::schema::{follows, tweets, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_digest: String,
    pub session_token: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, String> {
        let username = Username::new(&self.username)
            .map_err(|err| format!("stored username for {} is invalid: {err}", self.id))?;
        Ok(User::new(UserId::from_uuid(self.id), username, self.created_at))
    }

    pub(crate) fn into_account(self) -> Result<Account, String> {
        let password_digest = PasswordDigest::new(self.password_digest.clone());
        let session_token = SessionToken::new(self.session_token.clone())
            .ok_or_else(|| format!("stored session token for {} is empty", self.id))?;
        Ok(Account {
            user: self.into_user()?,
            password_digest,
            session_token,
        })
    }
}

/// Insertable struct for creating accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_digest: &'a str,
    pub session_token: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Account> for NewUserRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            id: *account.user.id().as_uuid(),
            username: account.user.username().as_ref(),
            password_digest: account.password_digest.as_str(),
            session_token: account.session_token.as_str(),
            created_at: account.user.created_at(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = follows)]
pub(crate) struct NewFollowRow {
    pub follower_id: Uuid,
    pub followee_id: Uuid,
}

/// Row struct for reading from the tweets table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tweets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TweetRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub mentioned_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl TweetRow {
    pub(crate) fn into_record(self) -> Result<TweetRecord, String> {
        let body = TweetBody::new(self.body)
            .map_err(|err| format!("stored body of tweet {} is invalid: {err}", self.id))?;
        Ok(TweetRecord {
            id: TweetId::from_uuid(self.id),
            author_id: UserId::from_uuid(self.author_id),
            body,
            mentioned_user_id: self.mentioned_user_id.map(UserId::from_uuid),
            created_at: self.created_at,
        })
    }
}

impl From<&TweetRecord> for TweetRow {
    fn from(record: &TweetRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            author_id: *record.author_id.as_uuid(),
            body: record.body.as_ref().to_owned(),
            mentioned_user_id: record.mentioned_user_id.as_ref().map(|id| *id.as_uuid()),
            created_at: record.created_at,
        }
    }
}
