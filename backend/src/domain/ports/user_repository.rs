//! Port abstraction for user persistence adapters and their errors.
//!
//! The repository stores accounts (user plus credentials) and answers the
//! lookups needed by authentication and the user directory. Username and
//! session-token uniqueness are enforced by adapters and reported through
//! dedicated error variants so services can distinguish a race from a fault.

use async_trait::async_trait;

use crate::domain::{Account, SessionToken, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already holds the username.
        DuplicateUsername { username: String } => "username already taken: {username}",
        /// Another account already holds the session token.
        DuplicateSessionToken => "session token already in use",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account.
    async fn insert(&self, account: &Account) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch every user in `ids`; unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch an account, credentials included, by exact username.
    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, UserRepositoryError>;

    /// Resolve the user currently holding `token`.
    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Whether any account holds `token`.
    async fn session_token_exists(&self, token: &SessionToken) -> Result<bool, UserRepositoryError>;

    /// Replace the session token of `id`.
    ///
    /// Returns `false` when no such user exists.
    async fn update_session_token(
        &self,
        id: &UserId,
        token: &SessionToken,
    ) -> Result<bool, UserRepositoryError>;

    /// Users whose username starts with `prefix`, ignoring case, ordered by
    /// username.
    async fn search_by_username_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<User>, UserRepositoryError>;
}
