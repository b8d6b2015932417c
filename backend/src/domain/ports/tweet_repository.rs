//! Port for tweet persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{TweetRecord, TweetSource};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tweet repository adapters.
    pub enum TweetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "tweet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "tweet repository query failed: {message}",
        /// The author or mentioned user does not exist.
        MissingUser => "tweet references an unknown user",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Persist a new tweet.
    async fn insert(&self, tweet: &TweetRecord) -> Result<(), TweetRepositoryError>;

    /// One window of tweets matching `source`.
    ///
    /// Ordered by `created_at` descending, then id descending.
    async fn page(
        &self,
        source: &TweetSource,
        request: PageRequest,
    ) -> Result<Vec<TweetRecord>, TweetRepositoryError>;
}
