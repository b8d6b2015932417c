//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod follows;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tweets;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

/// Name of the private session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Register every session-aware endpoint.
///
/// The caller provides [`state::HttpState`] as app data and wraps the
/// services with the session middleware. `/users/search` is registered
/// ahead of `/users/{id}` so the literal segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(sessions::login)
        .service(sessions::current_session)
        .service(sessions::logout)
        .service(users::sign_up)
        .service(users::search_users)
        .service(users::user_profile)
        .service(users::followers)
        .service(users::following)
        .service(follows::follow)
        .service(follows::unfollow)
        .service(tweets::create_tweet)
        .service(tweets::feed)
        .service(tweets::list_tweets);
}
