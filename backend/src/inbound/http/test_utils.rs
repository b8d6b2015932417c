//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use chrono::Utc;

use crate::domain::ports::{
    MockFeedQuery, MockFollowCommand, MockFollowQuery, MockLoginService, MockSignupService,
    MockTweetCommand, MockUsersQuery,
};
use crate::domain::{Error, SessionToken, User, UserId, Username};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{SESSION_COOKIE, configure};
pub use crate::test_support::session_middleware as test_session_middleware;

const TEST_LOGIN_PATH: &str = "/__test/session";

/// The session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mocked driving ports, wired into an [`HttpState`] by [`MockPorts::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub signup: MockSignupService,
    pub users: MockUsersQuery,
    pub follows: MockFollowCommand,
    pub follow_query: MockFollowQuery,
    pub tweets: MockTweetCommand,
    pub feed: MockFeedQuery,
}

impl MockPorts {
    /// Mocks where any session token resolves to `user`.
    pub fn signed_in_as(user: &User) -> Self {
        let mut ports = Self::default();
        let resolved = user.clone();
        ports
            .login
            .expect_resolve()
            .returning(move |_| Ok(Some(resolved.clone())));
        ports
    }

    /// Mocks where no session token resolves.
    pub fn signed_out() -> Self {
        let mut ports = Self::default();
        ports.login.expect_resolve().returning(|_| Ok(None));
        ports
    }

    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            signup: Arc::new(self.signup),
            users: Arc::new(self.users),
            follows: Arc::new(self.follows),
            follow_query: Arc::new(self.follow_query),
            tweets: Arc::new(self.tweets),
            feed: Arc::new(self.feed),
        }
    }
}

/// A user named `name` with a random id.
pub fn user_named(name: &str) -> User {
    User::new(
        UserId::random(),
        Username::new(name).expect("valid username"),
        Utc::now(),
    )
}

/// App wired with `state`, the test session middleware and every route.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route(TEST_LOGIN_PATH, web::post().to(store_test_token))
        .configure(configure)
}

/// Request against the test-only route that stores a session token.
///
/// Pair it with [`session_cookie`]; which user the token resolves to is up
/// to the login mock.
pub fn sign_in() -> test::TestRequest {
    test::TestRequest::post().uri(TEST_LOGIN_PATH)
}

async fn store_test_token(session: SessionContext) -> Result<HttpResponse, Error> {
    let token = SessionToken::new("tok-test").expect("token");
    session.persist_token(&token)?;
    Ok(HttpResponse::Ok().finish())
}
