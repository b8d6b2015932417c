//! Driving ports for posting and reading tweets.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, FeedKind, Tweet, UserId};

/// Unvalidated tweet submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetDraft {
    pub body: String,
    pub mentioned_user_id: Option<UserId>,
}

/// Tweet composition use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetCommand: Send + Sync {
    /// Validate and publish a tweet by `author`.
    async fn create_tweet(&self, author: &UserId, draft: TweetDraft) -> Result<Tweet, Error>;
}

/// Paged tweet reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// One page of `user`'s feed or profile tweets, newest first.
    async fn page_of_tweets(
        &self,
        user: &UserId,
        kind: FeedKind,
        request: PageRequest,
    ) -> Result<Page<Tweet>, Error>;
}
