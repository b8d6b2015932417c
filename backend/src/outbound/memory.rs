//! In-process store implementing every repository port.
//!
//! Used when no database is configured and by tests. It enforces the same
//! uniqueness and ordering rules as the PostgreSQL schema: unique usernames
//! and session tokens, one edge per ordered pair, edges and tweets removed
//! with their users, and feed pages ordered by `created_at` then id, both
//! descending.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{
    FollowRepository, FollowRepositoryError, TweetRepository, TweetRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Account, FollowCounts, FollowEdge, SessionToken, TweetRecord, TweetSource, User, UserId,
};

#[derive(Default)]
struct State {
    accounts: HashMap<UserId, Account>,
    /// (follower, followee)
    edges: BTreeSet<(UserId, UserId)>,
    tweets: Vec<TweetRecord>,
}

impl State {
    fn username_taken(&self, username: &str) -> bool {
        self.accounts
            .values()
            .any(|account| account.user.username().as_ref() == username)
    }

    fn token_holder(&self, token: &SessionToken) -> Option<&Account> {
        self.accounts
            .values()
            .find(|account| &account.session_token == token)
    }

    fn sorted_users<'a>(&self, ids: impl Iterator<Item = &'a UserId>) -> Vec<User> {
        let mut users: Vec<User> = ids
            .filter_map(|id| self.accounts.get(id))
            .map(|account| account.user.clone())
            .collect();
        users.sort_by(|a, b| a.username().cmp(b.username()));
        users
    }
}

/// Mutex-guarded in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

/// Signals a poisoned lock; mapped into each port's query error.
struct Poisoned;

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, Poisoned> {
        self.state.lock().map_err(|_| Poisoned)
    }

    /// Remove a user together with their edges and tweets; mentions of them
    /// are cleared.
    pub fn delete_user(&self, id: &UserId) -> bool {
        let Ok(mut state) = self.lock() else {
            return false;
        };
        if state.accounts.remove(id).is_none() {
            return false;
        }
        state
            .edges
            .retain(|(follower, followee)| follower != id && followee != id);
        state.tweets.retain(|tweet| &tweet.author_id != id);
        for tweet in &mut state.tweets {
            if tweet.mentioned_user_id.as_ref() == Some(id) {
                tweet.mentioned_user_id = None;
            }
        }
        true
    }
}

impl From<Poisoned> for UserRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query("in-memory store lock poisoned")
    }
}

impl From<Poisoned> for FollowRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query("in-memory store lock poisoned")
    }
}

impl From<Poisoned> for TweetRepositoryError {
    fn from(_: Poisoned) -> Self {
        Self::query("in-memory store lock poisoned")
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, account: &Account) -> Result<(), UserRepositoryError> {
        let mut state = self.lock()?;
        let username = account.user.username().as_ref();
        if state.username_taken(username) {
            return Err(UserRepositoryError::duplicate_username(username));
        }
        if state.token_holder(&account.session_token).is_some() {
            return Err(UserRepositoryError::duplicate_session_token());
        }
        state
            .accounts
            .insert(account.user.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock()?;
        Ok(state.accounts.get(id).map(|account| account.user.clone()))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        let state = self.lock()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.accounts.get(id))
            .map(|account| account.user.clone())
            .collect())
    }

    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, UserRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .accounts
            .values()
            .find(|account| account.user.username().as_ref() == username)
            .cloned())
    }

    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock()?;
        Ok(state.token_holder(token).map(|account| account.user.clone()))
    }

    async fn session_token_exists(&self, token: &SessionToken) -> Result<bool, UserRepositoryError> {
        let state = self.lock()?;
        Ok(state.token_holder(token).is_some())
    }

    async fn update_session_token(
        &self,
        id: &UserId,
        token: &SessionToken,
    ) -> Result<bool, UserRepositoryError> {
        let mut state = self.lock()?;
        if state
            .token_holder(token)
            .is_some_and(|holder| holder.user.id() != id)
        {
            return Err(UserRepositoryError::duplicate_session_token());
        }
        match state.accounts.get_mut(id) {
            Some(account) => {
                account.session_token = token.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search_by_username_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let state = self.lock()?;
        let needle = prefix.to_lowercase();
        let matches = state
            .accounts
            .iter()
            .filter(|(_, account)| {
                account
                    .user
                    .username()
                    .as_ref()
                    .to_lowercase()
                    .starts_with(&needle)
            })
            .map(|(id, _)| id);
        Ok(state.sorted_users(matches))
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn insert(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError> {
        let mut state = self.lock()?;
        if !state.accounts.contains_key(edge.follower())
            || !state.accounts.contains_key(edge.followee())
        {
            return Err(FollowRepositoryError::missing_user());
        }
        let inserted = state
            .edges
            .insert((edge.follower().clone(), edge.followee().clone()));
        if inserted {
            Ok(())
        } else {
            Err(FollowRepositoryError::duplicate_edge())
        }
    }

    async fn delete(&self, edge: &FollowEdge) -> Result<(), FollowRepositoryError> {
        let mut state = self.lock()?;
        let removed = state
            .edges
            .remove(&(edge.follower().clone(), edge.followee().clone()));
        if removed {
            Ok(())
        } else {
            Err(FollowRepositoryError::edge_not_found())
        }
    }

    async fn exists(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .edges
            .contains(&(follower.clone(), followee.clone())))
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        candidates: &[UserId],
    ) -> Result<Vec<UserId>, FollowRepositoryError> {
        let state = self.lock()?;
        Ok(candidates
            .iter()
            .filter(|candidate| {
                state
                    .edges
                    .contains(&(follower.clone(), (*candidate).clone()))
            })
            .cloned()
            .collect())
    }

    async fn followers(&self, user: &UserId) -> Result<Vec<User>, FollowRepositoryError> {
        let state = self.lock()?;
        let ids = state
            .edges
            .iter()
            .filter(|(_, followee)| followee == user)
            .map(|(follower, _)| follower);
        Ok(state.sorted_users(ids))
    }

    async fn following(&self, user: &UserId) -> Result<Vec<User>, FollowRepositoryError> {
        let state = self.lock()?;
        let ids = state
            .edges
            .iter()
            .filter(|(follower, _)| follower == user)
            .map(|(_, followee)| followee);
        Ok(state.sorted_users(ids))
    }

    async fn counts(&self, user: &UserId) -> Result<FollowCounts, FollowRepositoryError> {
        let state = self.lock()?;
        let mut counts = FollowCounts::default();
        for (follower, followee) in &state.edges {
            if followee == user {
                counts.followers += 1;
            }
            if follower == user {
                counts.following += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl TweetRepository for InMemoryStore {
    async fn insert(&self, tweet: &TweetRecord) -> Result<(), TweetRepositoryError> {
        let mut state = self.lock()?;
        let known = tweet
            .referenced_users()
            .all(|id| state.accounts.contains_key(id));
        if !known {
            return Err(TweetRepositoryError::missing_user());
        }
        state.tweets.push(tweet.clone());
        Ok(())
    }

    async fn page(
        &self,
        source: &TweetSource,
        request: PageRequest,
    ) -> Result<Vec<TweetRecord>, TweetRepositoryError> {
        let state = self.lock()?;
        let mut matching: Vec<&TweetRecord> = state
            .tweets
            .iter()
            .filter(|tweet| match source {
                TweetSource::AuthoredBy(author) => &tweet.author_id == author,
                TweetSource::FollowedBy(follower) => state
                    .edges
                    .contains(&(follower.clone(), tweet.author_id.clone())),
            })
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
