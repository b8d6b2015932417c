//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `UsersQuery`, `FollowCommand`, ...) are
//! called by inbound adapters. Driven ports (`*Repository`, credentials) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod credentials;
mod follow_command;
mod follow_repository;
mod login_service;
mod tweet_command;
mod tweet_repository;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use credentials::{MockPasswordHasher, MockSessionTokenSource};
pub use credentials::{CredentialError, PasswordHasher, SessionTokenSource};
#[cfg(test)]
pub use follow_command::{MockFollowCommand, MockFollowQuery};
pub use follow_command::{FollowCommand, FollowQuery};
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
pub use follow_repository::{FollowRepository, FollowRepositoryError};
#[cfg(test)]
pub use login_service::{MockLoginService, MockSignupService};
pub use login_service::{LoginService, SignupService};
#[cfg(test)]
pub use tweet_command::{MockFeedQuery, MockTweetCommand};
pub use tweet_command::{FeedQuery, TweetCommand, TweetDraft};
#[cfg(test)]
pub use tweet_repository::MockTweetRepository;
pub use tweet_repository::{TweetRepository, TweetRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
