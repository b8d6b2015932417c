//! Driving ports for session and account use-cases.
//!
//! Inbound adapters call these to log users in and out, sign them up, and
//! resolve the user behind a session token without touching persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Session, SessionToken, SignupCredentials, User, UserId};

/// Domain use-case port for authentication and session lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and issue a fresh session token.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, Error>;

    /// Log in as an existing user without a password.
    async fn login_demo(&self, user_id: &UserId) -> Result<Session, Error>;

    /// Rotate the token held by whoever owns `token`.
    ///
    /// Unknown tokens are ignored.
    async fn logout(&self, token: &SessionToken) -> Result<(), Error>;

    /// Resolve the user currently holding `token`.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<User>, Error>;
}

/// Domain use-case port for account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account and log it in.
    async fn sign_up(&self, credentials: &SignupCredentials) -> Result<Session, Error>;
}
