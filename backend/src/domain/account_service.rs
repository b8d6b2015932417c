//! Account and session domain service.
//!
//! Implements [`LoginService`] and [`SignupService`] over a user repository,
//! a password hasher and a session token source. Every login rotates the
//! session token; logout rotates it again so the old token is dead.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CredentialError, LoginService, PasswordHasher, SessionTokenSource, SignupService,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Account, Error, LoginCredentials, Session, SessionToken, SignupCredentials, User, UserId,
};

/// Number of tokens drawn before giving up on finding an unused one.
pub const TOKEN_ATTEMPTS: usize = 8;

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Session lifecycle and signup service.
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> AccountService<U, H, T> {
    /// Create a new service with the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: SessionTokenSource,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::DuplicateUsername { username } => username_taken(&username),
            UserRepositoryError::DuplicateSessionToken => {
                Error::internal("session token collision was not retried")
            }
        }
    }

    fn map_credential_error(error: CredentialError) -> Error {
        Error::internal(error.to_string())
    }

    fn exhausted() -> Error {
        Error::internal("could not allocate an unused session token")
    }

    /// Draw tokens until one is not held by any account.
    async fn unused_token(&self) -> Result<Option<SessionToken>, Error> {
        let token = self.tokens.generate();
        let taken = self
            .users
            .session_token_exists(&token)
            .await
            .map_err(Self::map_user_error)?;
        if taken {
            debug!("session token collision, drawing again");
            Ok(None)
        } else {
            Ok(Some(token))
        }
    }

    /// Give `user_id` a fresh unique token.
    ///
    /// Returns `None` when the user no longer exists.
    async fn rotate_token(&self, user_id: &UserId) -> Result<Option<SessionToken>, Error> {
        for _ in 0..TOKEN_ATTEMPTS {
            let Some(token) = self.unused_token().await? else {
                continue;
            };
            match self.users.update_session_token(user_id, &token).await {
                Ok(true) => return Ok(Some(token)),
                Ok(false) => return Ok(None),
                Err(UserRepositoryError::DuplicateSessionToken) => {
                    debug!("session token taken concurrently, drawing again");
                }
                Err(other) => return Err(Self::map_user_error(other)),
            }
        }
        warn!(user_id = %user_id, "session token attempts exhausted");
        Err(Self::exhausted())
    }

    async fn start_session(&self, user: User) -> Result<Session, Error> {
        let token = self
            .rotate_token(user.id())
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;
        info!(user_id = %user.id(), "session started");
        Ok(Session { user, token })
    }
}

fn username_taken(username: &str) -> Error {
    Error::conflict("Username has already been taken").with_details(json!({
        "field": "username",
        "code": "username_taken",
        "username": username,
        "messages": ["Username has already been taken"],
    }))
}

#[async_trait]
impl<U, H, T> LoginService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: SessionTokenSource,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, Error> {
        let Some(account) = self
            .users
            .find_account_by_username(credentials.username())
            .await
            .map_err(Self::map_user_error)?
        else {
            debug!("login for unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_digest)
            .map_err(Self::map_credential_error)?;
        if !verified {
            debug!(user_id = %account.user.id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.start_session(account.user).await
    }

    async fn login_demo(&self, user_id: &UserId) -> Result<Session, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        self.start_session(user).await
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), Error> {
        let Some(user) = self
            .users
            .find_by_session_token(token)
            .await
            .map_err(Self::map_user_error)?
        else {
            return Ok(());
        };
        self.rotate_token(user.id()).await?;
        info!(user_id = %user.id(), "session ended");
        Ok(())
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<User>, Error> {
        self.users
            .find_by_session_token(token)
            .await
            .map_err(Self::map_user_error)
    }
}

#[async_trait]
impl<U, H, T> SignupService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: SessionTokenSource,
{
    async fn sign_up(&self, credentials: &SignupCredentials) -> Result<Session, Error> {
        let username = credentials.username();
        let existing = self
            .users
            .find_account_by_username(username.as_ref())
            .await
            .map_err(Self::map_user_error)?;
        if existing.is_some() {
            return Err(username_taken(username.as_ref()));
        }

        let password_digest = self
            .hasher
            .hash(credentials.password())
            .map_err(Self::map_credential_error)?;
        let user = User::new(UserId::random(), username.clone(), self.clock.utc());

        for _ in 0..TOKEN_ATTEMPTS {
            let Some(token) = self.unused_token().await? else {
                continue;
            };
            let account = Account {
                user: user.clone(),
                password_digest: password_digest.clone(),
                session_token: token.clone(),
            };
            match self.users.insert(&account).await {
                Ok(()) => {
                    info!(user_id = %user.id(), "account created");
                    return Ok(Session { user, token });
                }
                Err(UserRepositoryError::DuplicateSessionToken) => {
                    debug!("session token taken concurrently, drawing again");
                }
                Err(other) => return Err(Self::map_user_error(other)),
            }
        }
        warn!("session token attempts exhausted during signup");
        Err(Self::exhausted())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
