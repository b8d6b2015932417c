//! Tweet composition and feed domain service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    FeedQuery, TweetCommand, TweetDraft, TweetRepository, TweetRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    Error, FeedKind, Tweet, TweetBody, TweetId, TweetRecord, TweetSource, User, UserId,
};

/// Implements [`TweetCommand`] and [`FeedQuery`].
#[derive(Clone)]
pub struct TweetService<U, T> {
    users: Arc<U>,
    tweets: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, T> TweetService<U, T> {
    pub fn new(users: Arc<U>, tweets: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            tweets,
            clock,
        }
    }
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

pub(crate) fn map_tweet_error(error: TweetRepositoryError) -> Error {
    match error {
        TweetRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("tweet repository unavailable: {message}"))
        }
        TweetRepositoryError::Query { message } => {
            Error::internal(format!("tweet repository error: {message}"))
        }
        TweetRepositoryError::MissingUser => {
            invalid_tweet(vec![("mentionedUserId", "unknown_user", MENTION_MISSING.to_owned())])
        }
    }
}

const MENTION_MISSING: &str = "Mentioned user must exist";

/// Build the validation error carried back to the composer.
///
/// `messages` mirrors the full list shown to users; `errors` keeps the
/// per-field codes.
fn invalid_tweet(failures: Vec<(&'static str, &'static str, String)>) -> Error {
    let messages: Vec<&str> = failures.iter().map(|(_, _, message)| message.as_str()).collect();
    let errors: Vec<_> = failures
        .iter()
        .map(|(field, code, _)| json!({ "field": field, "code": code }))
        .collect();
    let summary = messages.first().copied().unwrap_or("invalid tweet").to_owned();
    Error::invalid_request(summary).with_details(json!({
        "messages": messages,
        "errors": errors,
    }))
}

/// Fetch one window of records and resolve every referenced user in a
/// single batch.
pub(crate) async fn load_page<U, T>(
    users: &U,
    tweets: &T,
    source: &TweetSource,
    request: PageRequest,
) -> Result<Page<Tweet>, Error>
where
    U: UserRepository + ?Sized,
    T: TweetRepository + ?Sized,
{
    let records = tweets.page(source, request).await.map_err(map_tweet_error)?;

    let mut ids: Vec<UserId> = records
        .iter()
        .flat_map(TweetRecord::referenced_users)
        .cloned()
        .collect();
    ids.sort();
    ids.dedup();

    let directory: HashMap<UserId, User> = if ids.is_empty() {
        HashMap::new()
    } else {
        users
            .find_many(&ids)
            .await
            .map_err(map_user_error)?
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect()
    };

    let mut hydrated = Vec::with_capacity(records.len());
    for record in records {
        hydrated.push(hydrate(record, &directory)?);
    }
    Ok(Page::new(hydrated, request))
}

fn hydrate(record: TweetRecord, directory: &HashMap<UserId, User>) -> Result<Tweet, Error> {
    let author = directory.get(&record.author_id).cloned().ok_or_else(|| {
        Error::internal(format!("author {} of tweet {} is missing", record.author_id, record.id))
    })?;
    // A mention whose user vanished between queries renders as no mention.
    let mentioned_user = record
        .mentioned_user_id
        .as_ref()
        .and_then(|id| directory.get(id).cloned());
    Ok(Tweet {
        id: record.id,
        author,
        body: record.body,
        mentioned_user,
        created_at: record.created_at,
    })
}

#[async_trait]
impl<U, T> TweetCommand for TweetService<U, T>
where
    U: UserRepository,
    T: TweetRepository,
{
    async fn create_tweet(&self, author_id: &UserId, draft: TweetDraft) -> Result<Tweet, Error> {
        let TweetDraft {
            body,
            mentioned_user_id,
        } = draft;

        let mut failures = Vec::new();
        let body = match TweetBody::new(body) {
            Ok(body) => Some(body),
            Err(err) => {
                failures.push(("body", err.code(), err.to_string()));
                None
            }
        };

        let mut lookup = vec![author_id.clone()];
        lookup.extend(mentioned_user_id.iter().cloned());
        let found = self
            .users
            .find_many(&lookup)
            .await
            .map_err(map_user_error)?;
        let find = |id: &UserId| found.iter().find(|user| user.id() == id).cloned();

        let author = find(author_id).ok_or_else(|| Error::unauthorized("login required"))?;
        let mentioned_user = match mentioned_user_id.as_ref() {
            Some(id) => {
                let user = find(id);
                if user.is_none() {
                    failures.push(("mentionedUserId", "unknown_user", MENTION_MISSING.to_owned()));
                }
                user
            }
            None => None,
        };

        let Some(body) = body.filter(|_| failures.is_empty()) else {
            return Err(invalid_tweet(failures));
        };

        let record = TweetRecord {
            id: TweetId::random(),
            author_id: author_id.clone(),
            body,
            mentioned_user_id,
            created_at: self.clock.utc(),
        };
        self.tweets.insert(&record).await.map_err(|err| {
            if matches!(err, TweetRepositoryError::MissingUser) {
                warn!(tweet_id = %record.id, "mentioned user disappeared before insert");
            }
            map_tweet_error(err)
        })?;
        info!(tweet_id = %record.id, author_id = %author_id, "tweet posted");

        Ok(Tweet {
            id: record.id,
            author,
            body: record.body,
            mentioned_user,
            created_at: record.created_at,
        })
    }
}

#[async_trait]
impl<U, T> FeedQuery for TweetService<U, T>
where
    U: UserRepository,
    T: TweetRepository,
{
    async fn page_of_tweets(
        &self,
        user: &UserId,
        kind: FeedKind,
        request: PageRequest,
    ) -> Result<Page<Tweet>, Error> {
        let source = kind.source_for(user.clone());
        load_page(self.users.as_ref(), self.tweets.as_ref(), &source, request).await
    }
}

#[cfg(test)]
#[path = "tweet_service_tests.rs"]
mod tests;
