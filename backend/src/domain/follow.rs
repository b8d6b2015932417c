//! Follow edges and user directory views built on them.

use serde::Serialize;

use pagination::Page;

use super::{Tweet, User, UserId};

/// Raised when an edge would point a user at themselves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("users cannot follow themselves")]
pub struct SelfFollowError;

/// Directed follow relationship.
///
/// ## Invariants
/// - `follower` and `followee` differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FollowEdge {
    follower: UserId,
    followee: UserId,
}

impl FollowEdge {
    /// Build an edge, rejecting self-follows.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{FollowEdge, UserId};
    ///
    /// let ada = UserId::random();
    /// assert!(FollowEdge::new(ada.clone(), ada).is_err());
    /// ```
    pub fn new(follower: UserId, followee: UserId) -> Result<Self, SelfFollowError> {
        if follower == followee {
            return Err(SelfFollowError);
        }
        Ok(Self { follower, followee })
    }

    pub fn follower(&self) -> &UserId {
        &self.follower
    }

    pub fn followee(&self) -> &UserId {
        &self.followee
    }
}

/// Follower and following totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowCounts {
    pub followers: u64,
    pub following: u64,
}

/// A user listed alongside whether the viewer follows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: User,
    pub following: bool,
}

/// Profile page data for one user as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user: User,
    pub counts: FollowCounts,
    pub followed_by_viewer: bool,
    pub tweets: Page<Tweet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Username;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn distinct_users_form_an_edge() {
        let a = UserId::random();
        let b = UserId::random();
        let edge = FollowEdge::new(a.clone(), b.clone()).expect("edge");
        assert_eq!(edge.follower(), &a);
        assert_eq!(edge.followee(), &b);
    }

    #[test]
    fn summary_flattens_user_fields() {
        let user = User::new(
            UserId::random(),
            Username::new("ada").expect("username"),
            Utc::now(),
        );
        let value = serde_json::to_value(UserSummary {
            user: user.clone(),
            following: true,
        })
        .expect("serialisable");
        assert_eq!(value["username"], json!("ada"));
        assert_eq!(value["following"], json!(true));
        assert_eq!(value["id"], json!(user.id().to_string()));
    }
}
