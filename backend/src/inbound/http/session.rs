//! Cookie session wrapper.
//!
//! The cookie holds only the opaque session token. Identity is resolved on
//! every request against the login service so a rotated token stops working
//! immediately.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::LoginService;
use crate::domain::{Error, SessionToken, User};

pub(crate) const SESSION_TOKEN_KEY: &str = "session_token";

/// Handler-facing view of the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `token` in the cookie, replacing any previous one.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_TOKEN_KEY, token.as_str())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token carried by the cookie, if any.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let token = raw.and_then(SessionToken::new);
        if token.is_none() && self.0.contains_key(SESSION_TOKEN_KEY) {
            warn!("blank session token in cookie");
        }
        Ok(token)
    }

    /// Resolve the signed-in user, if the cookie carries a live token.
    pub async fn current_user(&self, login: &dyn LoginService) -> Result<Option<User>, Error> {
        match self.token()? {
            Some(token) => login.resolve(&token).await,
            None => Ok(None),
        }
    }

    /// Resolve the signed-in user or fail with `401 Unauthorized`.
    pub async fn require_user(&self, login: &dyn LoginService) -> Result<User, Error> {
        self.current_user(login)
            .await?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}
