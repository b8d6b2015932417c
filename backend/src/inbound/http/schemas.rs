//! OpenAPI schemas for domain types.
//!
//! Domain types stay free of `utoipa`; these mirrors describe their JSON
//! shape for the generated document.

#![expect(
    dead_code,
    reason = "schema mirrors are only read by utoipa derive output"
)]

use utoipa::ToSchema;

/// Machine-readable error category.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error payload returned by every failing endpoint.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Body can't be blank")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `field`, `code` and `messages`.
    details: Option<serde_json::Value>,
}

/// Public view of an account.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "ada")]
    username: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// A user plus whether the viewer follows them.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserSummary)]
#[schema(rename_all = "camelCase")]
pub struct UserSummarySchema {
    id: String,
    username: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    following: bool,
}

#[derive(ToSchema)]
#[schema(as = crate::domain::FollowCounts)]
pub struct FollowCountsSchema {
    followers: u64,
    following: u64,
}

/// Tweet with author and mention resolved.
#[derive(ToSchema)]
#[schema(as = crate::domain::Tweet)]
#[schema(rename_all = "camelCase")]
pub struct TweetSchema {
    id: String,
    author: UserSchema,
    #[schema(example = "hello @grace")]
    body: String,
    mentioned_user: Option<UserSchema>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// One page of tweets, newest first.
#[derive(ToSchema)]
#[schema(as = crate::domain::TweetPage)]
#[schema(rename_all = "camelCase")]
pub struct TweetPageSchema {
    data: Vec<TweetSchema>,
    offset: u32,
    limit: u32,
    /// Absent on the last page.
    next_offset: Option<u32>,
}

#[derive(ToSchema)]
#[schema(as = crate::domain::UserProfile)]
#[schema(rename_all = "camelCase")]
pub struct UserProfileSchema {
    user: UserSchema,
    counts: FollowCountsSchema,
    followed_by_viewer: bool,
    tweets: TweetPageSchema,
}
