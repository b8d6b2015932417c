//! Wire types exchanged with the Chirp HTTP API and the requests the
//! controllers ask their host to perform.
//!
//! JSON bodies are camelCase on the wire.

use std::fmt;

use chrono::{DateTime, Utc};
use pagination::Page;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use url::form_urlencoded;
use uuid::Uuid;

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Account identifier.
    pub id: Uuid,
    /// Unique handle.
    pub username: String,
    /// Signup time.
    pub created_at: DateTime<Utc>,
}

impl UserDto {
    /// Display handle, `@` followed by the username.
    #[must_use]
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }

    /// Profile path for links.
    #[must_use]
    pub fn profile_path(&self) -> String {
        format!("/users/{}", self.id)
    }
}

/// A user plus whether the viewer follows them, as returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummaryDto {
    /// The listed user.
    #[serde(flatten)]
    pub user: UserDto,
    /// Whether the viewer follows `user`.
    pub following: bool,
}

/// Tweet with its author and optional mention resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetDto {
    /// Tweet identifier.
    pub id: Uuid,
    /// Author of the tweet.
    pub author: UserDto,
    /// Tweet text.
    pub body: String,
    /// Mentioned user, when any.
    #[serde(default)]
    pub mentioned_user: Option<UserDto>,
    /// Publication time.
    pub created_at: DateTime<Utc>,
}

/// One window of tweets.
pub type TweetPage = Page<TweetDto>;

/// Body of follow and unfollow responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowStatusDto {
    /// Follow state after the request.
    pub following: bool,
}

/// Error payload returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {message}")]
pub struct ApiErrorDto {
    /// Machine-readable category such as `invalid_request`.
    pub code: String,
    /// Human-readable summary.
    pub message: String,
    /// Correlation identifier echoed from the `trace-id` header.
    #[serde(default)]
    pub trace_id: Option<String>,
    /// Field-level context.
    #[serde(default)]
    pub details: Option<Value>,
}

impl ApiErrorDto {
    /// Messages to show the user.
    ///
    /// Uses `details.messages` when the server supplied it, otherwise the
    /// summary message.
    ///
    /// # Examples
    /// ```
    /// use client_state::api::ApiErrorDto;
    /// use serde_json::json;
    ///
    /// let err: ApiErrorDto = serde_json::from_value(json!({
    ///     "code": "invalid_request",
    ///     "message": "Body can't be blank",
    ///     "details": { "messages": ["Body can't be blank"] }
    /// }))
    /// .unwrap();
    /// assert_eq!(err.messages(), vec!["Body can't be blank".to_owned()]);
    /// ```
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        let listed: Vec<String> = self
            .details
            .as_ref()
            .and_then(|details| details.get("messages"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        if listed.is_empty() {
            vec![self.message.clone()]
        } else {
            listed
        }
    }
}

/// Which tweets an infinite list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweetSource {
    /// The viewer's feed.
    Feed,
    /// Tweets written by one user.
    Profile(Uuid),
}

/// Tweet submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTweet {
    /// Tweet text.
    pub body: String,
    /// Mentioned user, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentioned_user_id: Option<Uuid>,
}

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

/// A call a controller wants its host to make.
///
/// Controllers never perform I/O; they hand one of these back and expect
/// the outcome to be reported through their event methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Start following a user.
    Follow {
        /// User to follow.
        user_id: Uuid,
    },
    /// Stop following a user.
    Unfollow {
        /// User to unfollow.
        user_id: Uuid,
    },
    /// Username prefix search.
    SearchUsers {
        /// Non-empty query.
        query: String,
    },
    /// One page of tweets.
    FetchTweets {
        /// Feed or profile.
        source: TweetSource,
        /// Tweets to skip.
        offset: u32,
        /// Page size.
        limit: u32,
    },
    /// Publish a tweet.
    PostTweet(NewTweet),
}

impl ApiRequest {
    /// HTTP method to use.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Follow { .. } | Self::PostTweet(_) => Method::Post,
            Self::Unfollow { .. } => Method::Delete,
            Self::SearchUsers { .. } | Self::FetchTweets { .. } => Method::Get,
        }
    }

    /// Path and query string, relative to the API root.
    ///
    /// # Examples
    /// ```
    /// use client_state::api::ApiRequest;
    ///
    /// let request = ApiRequest::SearchUsers { query: "ada l".to_owned() };
    /// assert_eq!(request.path(), "/users/search?query=ada+l");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Follow { user_id } | Self::Unfollow { user_id } => {
                format!("/users/{user_id}/follow")
            }
            Self::SearchUsers { query } => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .append_pair("query", query)
                    .finish();
                format!("/users/search?{encoded}")
            }
            Self::FetchTweets {
                source,
                offset,
                limit,
            } => {
                let mut params = form_urlencoded::Serializer::new(String::new());
                match source {
                    TweetSource::Feed => params.append_pair("type", "feed"),
                    TweetSource::Profile(user_id) => params
                        .append_pair("type", "profile")
                        .append_pair("userId", &user_id.to_string()),
                };
                params
                    .append_pair("offset", &offset.to_string())
                    .append_pair("limit", &limit.to_string());
                format!("/tweets?{}", params.finish())
            }
            Self::PostTweet(_) => "/tweets".to_owned(),
        }
    }

    /// JSON body, for requests that carry one.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::PostTweet(tweet) => Some(json!(tweet)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn summaries_flatten_the_user() {
        let summary: UserSummaryDto = serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "username": "ada",
            "createdAt": "2024-05-01T12:00:00Z",
            "following": true
        }))
        .expect("summary");
        assert_eq!(summary.user.handle(), "@ada");
        assert!(summary.following);
    }

    #[rstest]
    fn error_without_detail_messages_falls_back_to_summary() {
        let err = ApiErrorDto {
            code: "conflict".to_owned(),
            message: "Already following".to_owned(),
            trace_id: None,
            details: Some(json!({ "code": "already_following" })),
        };
        assert_eq!(err.messages(), vec!["Already following".to_owned()]);
        assert_eq!(err.to_string(), "conflict: Already following");
    }

    #[rstest]
    #[case(TweetSource::Feed, "/tweets?type=feed&offset=20&limit=10")]
    #[case(
        TweetSource::Profile(Uuid::nil()),
        "/tweets?type=profile&userId=00000000-0000-0000-0000-000000000000&offset=20&limit=10"
    )]
    fn tweet_fetches_encode_their_window(#[case] source: TweetSource, #[case] expected: &str) {
        let request = ApiRequest::FetchTweets {
            source,
            offset: 20,
            limit: 10,
        };
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), expected);
    }

    #[rstest]
    fn follow_and_unfollow_share_a_path() {
        let user_id = Uuid::nil();
        let follow = ApiRequest::Follow { user_id };
        let unfollow = ApiRequest::Unfollow { user_id };
        assert_eq!(follow.path(), unfollow.path());
        assert_eq!(follow.method(), Method::Post);
        assert_eq!(unfollow.method(), Method::Delete);
    }

    #[rstest]
    fn post_tweet_omits_absent_mention() {
        let request = ApiRequest::PostTweet(NewTweet {
            body: "hello".to_owned(),
            mentioned_user_id: None,
        });
        assert_eq!(request.body(), Some(json!({ "body": "hello" })));
    }
}
