//! Feed selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Which tweets a page is drawn from, as requested by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// Tweets authored by accounts the user follows.
    Feed,
    /// Tweets authored by the user.
    Profile,
}

/// Raised when a feed kind string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feed type: {0}")]
pub struct UnknownFeedKind(pub String);

impl FromStr for FeedKind {
    type Err = UnknownFeedKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feed" => Ok(Self::Feed),
            "profile" => Ok(Self::Profile),
            other => Err(UnknownFeedKind(other.to_owned())),
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feed => f.write_str("feed"),
            Self::Profile => f.write_str("profile"),
        }
    }
}

impl FeedKind {
    /// Resolve the kind against a concrete user.
    pub fn source_for(self, user: UserId) -> TweetSource {
        match self {
            Self::Feed => TweetSource::FollowedBy(user),
            Self::Profile => TweetSource::AuthoredBy(user),
        }
    }
}

/// Author filter passed to tweet repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweetSource {
    /// Tweets written by this user.
    AuthoredBy(UserId),
    /// Tweets written by anyone this user follows.
    FollowedBy(UserId),
}
