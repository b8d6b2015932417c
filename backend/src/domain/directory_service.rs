//! User directory: lookups, username search and profiles.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{FollowRepository, TweetRepository, UserRepository, UsersQuery};
use crate::domain::social_graph_service::{map_follow_error, summarise};
use crate::domain::tweet_service::{load_page, map_user_error};
use crate::domain::{Error, TweetSource, User, UserId, UserProfile, UserSummary};

/// Implements [`UsersQuery`].
#[derive(Clone)]
pub struct DirectoryService<U, F, T> {
    users: Arc<U>,
    follows: Arc<F>,
    tweets: Arc<T>,
}

impl<U, F, T> DirectoryService<U, F, T> {
    pub fn new(users: Arc<U>, follows: Arc<F>, tweets: Arc<T>) -> Self {
        Self {
            users,
            follows,
            tweets,
        }
    }
}

#[async_trait]
impl<U, F, T> UsersQuery for DirectoryService<U, F, T>
where
    U: UserRepository,
    F: FollowRepository,
    T: TweetRepository,
{
    async fn find_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn profile(&self, viewer: &UserId, id: &UserId) -> Result<UserProfile, Error> {
        let user = self.find_user(id).await?;
        let counts = self.follows.counts(id).await.map_err(map_follow_error)?;
        let followed_by_viewer = self
            .follows
            .exists(viewer, id)
            .await
            .map_err(map_follow_error)?;
        let tweets = load_page(
            self.users.as_ref(),
            self.tweets.as_ref(),
            &TweetSource::AuthoredBy(id.clone()),
            PageRequest::default(),
        )
        .await?;
        Ok(UserProfile {
            user,
            counts,
            followed_by_viewer,
            tweets,
        })
    }

    async fn search(&self, viewer: &UserId, query: &str) -> Result<Vec<UserSummary>, Error> {
        let prefix = query.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        let users = self
            .users
            .search_by_username_prefix(prefix)
            .await
            .map_err(map_user_error)?;
        summarise(self.follows.as_ref(), viewer, users).await
    }
}
