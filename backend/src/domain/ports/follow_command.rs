//! Driving ports for the social graph.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserSummary};

/// Mutations on follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowCommand: Send + Sync {
    /// Make `follower` follow `followee`.
    async fn follow(&self, follower: &UserId, followee: &UserId) -> Result<(), Error>;

    /// Remove the edge from `follower` to `followee`.
    async fn unfollow(&self, follower: &UserId, followee: &UserId) -> Result<(), Error>;
}

/// Traversals over follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowQuery: Send + Sync {
    async fn is_following(&self, follower: &UserId, followee: &UserId) -> Result<bool, Error>;

    /// Users following `user`, flagged with whether `viewer` follows each.
    async fn followers(&self, viewer: &UserId, user: &UserId) -> Result<Vec<UserSummary>, Error>;

    /// Users `user` follows, flagged with whether `viewer` follows each.
    async fn following(&self, viewer: &UserId, user: &UserId) -> Result<Vec<UserSummary>, Error>;
}
