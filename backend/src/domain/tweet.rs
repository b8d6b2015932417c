//! Tweets and their validated body.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{User, UserId};

/// Maximum tweet body length in Unicode scalar values.
pub const TWEET_BODY_MAX: usize = 280;

/// Validation errors for tweet bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TweetValidationError {
    #[error("Body can't be blank")]
    EmptyBody,
    #[error("Tweet cannot be more than {max} characters.")]
    BodyTooLong { max: usize, actual: usize },
}

impl TweetValidationError {
    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyBody => "empty_body",
            Self::BodyTooLong { .. } => "body_too_long",
        }
    }
}

/// Stable tweet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(Uuid);

impl TweetId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tweet text.
///
/// ## Invariants
/// - Not blank once trimmed.
/// - At most [`TWEET_BODY_MAX`] characters, counted as `char`s.
///
/// The stored text is kept exactly as submitted.
///
/// # Examples
/// ```
/// use backend::domain::TweetBody;
///
/// assert!(TweetBody::new("hello").is_ok());
/// assert!(TweetBody::new("x".repeat(281)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TweetBody(String);

impl TweetBody {
    pub fn new(body: impl Into<String>) -> Result<Self, TweetValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(TweetValidationError::EmptyBody);
        }
        let actual = body.chars().count();
        if actual > TWEET_BODY_MAX {
            return Err(TweetValidationError::BodyTooLong {
                max: TWEET_BODY_MAX,
                actual,
            });
        }
        Ok(Self(body))
    }
}

impl AsRef<str> for TweetBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<TweetBody> for String {
    fn from(value: TweetBody) -> Self {
        value.0
    }
}

impl TryFrom<String> for TweetBody {
    type Error = TweetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Tweet as stored, referencing users by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRecord {
    pub id: TweetId,
    pub author_id: UserId,
    pub body: TweetBody,
    pub mentioned_user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl TweetRecord {
    /// Ids of every user this tweet references.
    pub fn referenced_users(&self) -> impl Iterator<Item = &UserId> {
        std::iter::once(&self.author_id).chain(self.mentioned_user_id.iter())
    }
}

/// Tweet with author and mention resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: TweetId,
    pub author: User,
    pub body: TweetBody,
    pub mentioned_user: Option<User>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   \n\t")]
    fn blank_bodies_are_rejected(#[case] raw: &str) {
        assert_eq!(TweetBody::new(raw), Err(TweetValidationError::EmptyBody));
    }

    #[rstest]
    #[case("a".repeat(280), true)]
    #[case("a".repeat(281), false)]
    #[case("é".repeat(280), true)]
    #[case("🐦".repeat(281), false)]
    fn length_is_counted_in_characters(#[case] raw: String, #[case] accepted: bool) {
        assert_eq!(TweetBody::new(raw).is_ok(), accepted);
    }

    #[rstest]
    fn too_long_error_reports_length() {
        let err = TweetBody::new("b".repeat(300)).expect_err("too long");
        assert_eq!(
            err,
            TweetValidationError::BodyTooLong {
                max: TWEET_BODY_MAX,
                actual: 300
            }
        );
        assert_eq!(err.to_string(), "Tweet cannot be more than 280 characters.");
    }

    #[rstest]
    fn referenced_users_include_mention() {
        let author = UserId::random();
        let mentioned = UserId::random();
        let record = TweetRecord {
            id: TweetId::random(),
            author_id: author.clone(),
            body: TweetBody::new("hi").expect("body"),
            mentioned_user_id: Some(mentioned.clone()),
            created_at: Utc::now(),
        };
        let ids: Vec<_> = record.referenced_users().cloned().collect();
        assert_eq!(ids, vec![author, mentioned]);
    }
}
