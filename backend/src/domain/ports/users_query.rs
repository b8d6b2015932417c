//! Driving port for user directory queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserProfile, UserSummary};

/// Read-side use-cases over users, always from a viewer's perspective.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch a user or fail with `not_found`.
    async fn find_user(&self, id: &UserId) -> Result<User, Error>;

    /// Profile of `id`: counts, follow state and the first page of tweets.
    async fn profile(&self, viewer: &UserId, id: &UserId) -> Result<UserProfile, Error>;

    /// Users whose username starts with `query`, ignoring case.
    ///
    /// A blank query yields no users.
    async fn search(&self, viewer: &UserId, query: &str) -> Result<Vec<UserSummary>, Error>;
}
