//! Port for follow edge persistence.

use async_trait::async_trait;

use crate::domain::{FollowCounts, FollowEdge, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by follow repository adapters.
    pub enum FollowRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "follow repository query failed: {message}",
        /// The edge already exists.
        DuplicateEdge => "follow edge already exists",
        /// The edge does not exist.
        EdgeNotFound => "follow edge not found",
        /// One side of the edge references a user that does not exist.
        MissingUser => "follow edge references an unknown user",
    }
}

/// Directed follow graph storage.
///
/// Traversals return users ordered by username.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Create an edge.
    async fn insert(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError>;

    /// Remove an edge.
    async fn delete(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError>;

    /// Whether `follower` follows `followee`.
    async fn exists(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<bool, FollowRepositoryError>;

    /// The subset of `candidates` that `follower` follows.
    async fn followed_among(
        &self,
        follower: &UserId,
        candidates: &[UserId],
    ) -> Result<Vec<UserId>, FollowRepositoryError>;

    /// Users following `user`.
    async fn followers(&self, user: &UserId) -> Result<Vec<User>, FollowRepositoryError>;

    /// Users `user` follows.
    async fn following(&self, user: &UserId) -> Result<Vec<User>, FollowRepositoryError>;

    /// Follower and following totals for `user`.
    async fn counts(&self, user: &UserId) -> Result<FollowCounts, FollowRepositoryError>;
}
