//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services that implement the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - `Error`: transport-agnostic error payload.
//! - `User`, `Username`, `UserId`: public identity of an account.
//! - `Tweet`, `TweetBody`, `FeedKind`: tweets and feed selection.
//! - `FollowEdge`, `UserSummary`, `UserProfile`: social graph views.
//! - `AccountService`, `DirectoryService`, `SocialGraphService` and
//!   `TweetService`: driving port implementations generic over repositories.

pub mod auth;
pub mod error;
pub mod feed;
pub mod follow;
pub mod ports;
pub mod trace_id;
pub mod tweet;
pub mod user;

mod account_service;
mod directory_service;
mod social_graph_service;
mod tweet_service;

pub use self::account_service::{AccountService, TOKEN_ATTEMPTS};
pub use self::auth::{
    Account, CredentialsValidationError, LoginCredentials, PASSWORD_MIN, PasswordDigest,
    Session, SessionToken, SignupCredentials,
};
pub use self::directory_service::DirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::feed::{FeedKind, TweetSource, UnknownFeedKind};
pub use self::follow::{FollowCounts, FollowEdge, SelfFollowError, UserProfile, UserSummary};
pub use self::social_graph_service::SocialGraphService;
pub use self::trace_id::TraceId;
pub use self::tweet::{
    TWEET_BODY_MAX, Tweet, TweetBody, TweetId, TweetRecord, TweetValidationError,
};
pub use self::tweet_service::TweetService;
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
