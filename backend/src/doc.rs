//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler, the schema mirrors from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//! The document backs Swagger UI in debug builds and is printed by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::SESSION_COOKIE;
use crate::inbound::http::follows::FollowStatus;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FollowCountsSchema, TweetPageSchema, TweetSchema,
    UserProfileSchema, UserSchema, UserSummarySchema,
};
use crate::inbound::http::sessions::LoginRequest;
use crate::inbound::http::tweets::TweetRequest;
use crate::inbound::http::users::SignupRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE,
                "Private session cookie issued by POST /session and POST /users.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Chirp API",
        description = "Users, follows, tweets and feeds behind a session cookie."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sessions::login,
        crate::inbound::http::sessions::current_session,
        crate::inbound::http::sessions::logout,
        crate::inbound::http::users::sign_up,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::user_profile,
        crate::inbound::http::users::followers,
        crate::inbound::http::users::following,
        crate::inbound::http::follows::follow,
        crate::inbound::http::follows::unfollow,
        crate::inbound::http::tweets::create_tweet,
        crate::inbound::http::tweets::feed,
        crate::inbound::http::tweets::list_tweets,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        UserSummarySchema,
        FollowCountsSchema,
        UserProfileSchema,
        TweetSchema,
        TweetPageSchema,
        FollowStatus,
        LoginRequest,
        SignupRequest,
        TweetRequest,
    )),
    tags(
        (name = "session", description = "Login and logout"),
        (name = "users", description = "Accounts, profiles and search"),
        (name = "follows", description = "Follow edges"),
        (name = "tweets", description = "Posting and reading tweets"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
