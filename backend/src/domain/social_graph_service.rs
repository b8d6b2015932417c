//! Follow graph domain service.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    FollowCommand, FollowQuery, FollowRepository, FollowRepositoryError, UserRepository,
};
use crate::domain::tweet_service::map_user_error;
use crate::domain::{Error, FollowEdge, User, UserId, UserSummary};

/// Implements [`FollowCommand`] and [`FollowQuery`].
#[derive(Clone)]
pub struct SocialGraphService<U, F> {
    users: Arc<U>,
    follows: Arc<F>,
}

impl<U, F> SocialGraphService<U, F> {
    pub fn new(users: Arc<U>, follows: Arc<F>) -> Self {
        Self { users, follows }
    }
}

pub(crate) fn map_follow_error(error: FollowRepositoryError) -> Error {
    match error {
        FollowRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("follow repository unavailable: {message}"))
        }
        FollowRepositoryError::Query { message } => {
            Error::internal(format!("follow repository error: {message}"))
        }
        FollowRepositoryError::DuplicateEdge => Error::conflict("already following this user")
            .with_details(json!({ "code": "already_following" })),
        FollowRepositoryError::EdgeNotFound => Error::not_found("not following this user")
            .with_details(json!({ "code": "not_following" })),
        FollowRepositoryError::MissingUser => user_not_found(),
    }
}

fn user_not_found() -> Error {
    Error::not_found("user not found")
}

/// Flag each user with whether `viewer` follows them.
pub(crate) async fn summarise<F>(
    follows: &F,
    viewer: &UserId,
    users: Vec<User>,
) -> Result<Vec<UserSummary>, Error>
where
    F: FollowRepository + ?Sized,
{
    if users.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<UserId> = users.iter().map(|user| user.id().clone()).collect();
    let followed: HashSet<UserId> = follows
        .followed_among(viewer, &ids)
        .await
        .map_err(map_follow_error)?
        .into_iter()
        .collect();
    Ok(users
        .into_iter()
        .map(|user| {
            let following = followed.contains(user.id());
            UserSummary { user, following }
        })
        .collect())
}

impl<U, F> SocialGraphService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn require_user(&self, id: &UserId) -> Result<(), Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(|_| ())
            .ok_or_else(user_not_found)
    }
}

#[async_trait]
impl<U, F> FollowCommand for SocialGraphService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn follow(&self, follower: &UserId, followee: &UserId) -> Result<(), Error> {
        let edge = FollowEdge::new(follower.clone(), followee.clone()).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "code": "self_follow" }))
        })?;
        self.require_user(followee).await?;
        self.follows.insert(&edge).await.map_err(map_follow_error)?;
        info!(follower = %follower, followee = %followee, "follow created");
        Ok(())
    }

    async fn unfollow(&self, follower: &UserId, followee: &UserId) -> Result<(), Error> {
        let Ok(edge) = FollowEdge::new(follower.clone(), followee.clone()) else {
            return Err(map_follow_error(FollowRepositoryError::EdgeNotFound));
        };
        self.follows.delete(&edge).await.map_err(map_follow_error)?;
        info!(follower = %follower, followee = %followee, "follow removed");
        Ok(())
    }
}

#[async_trait]
impl<U, F> FollowQuery for SocialGraphService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn is_following(&self, follower: &UserId, followee: &UserId) -> Result<bool, Error> {
        self.follows
            .exists(follower, followee)
            .await
            .map_err(map_follow_error)
    }

    async fn followers(&self, viewer: &UserId, user: &UserId) -> Result<Vec<UserSummary>, Error> {
        self.require_user(user).await?;
        let users = self.follows.followers(user).await.map_err(map_follow_error)?;
        summarise(self.follows.as_ref(), viewer, users).await
    }

    async fn following(&self, viewer: &UserId, user: &UserId) -> Result<Vec<UserSummary>, Error> {
        self.require_user(user).await?;
        let users = self.follows.following(user).await.map_err(map_follow_error)?;
        summarise(self.follows.as_ref(), viewer, users).await
    }
}
