//! User handlers: signup, profiles, search and follow traversals.
//!
//! ```text
//! POST /users {"username":"ada","password":"secret"}
//! GET  /users/search?query=ad
//! GET  /users/{id}
//! GET  /users/{id}/followers
//! GET  /users/{id}/following
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{SignupCredentials, UserProfile, UserSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserProfileSchema, UserSchema, UserSummarySchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::sessions::require_logged_out;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{credentials_error, parse_user_id};

/// Signup request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Username prefix, matched case-insensitively.
    #[serde(default)]
    pub query: String,
}

/// Create an account and log it in.
#[utoipa::path(
    post,
    path = "/users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid username or password", body = ErrorSchema),
        (status = 403, description = "Already logged in", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signUp",
    security([])
)]
#[post("/users")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    require_logged_out(&session, &state).await?;
    let credentials = SignupCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(credentials_error)?;
    let opened = state.signup.sign_up(&credentials).await?;
    session.persist_token(&opened.token)?;
    info!(user_id = %opened.user.id(), "account created");
    Ok(HttpResponse::Created().json(opened.user))
}

/// Users whose username starts with `query`, with the viewer's follow state.
#[utoipa::path(
    get,
    path = "/users/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching users", body = [UserSummarySchema]),
        (status = 401, description = "Not logged in", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<UserSummary>>> {
    let viewer = session.require_user(state.login.as_ref()).await?;
    let found = state.users.search(viewer.id(), &params.query).await?;
    Ok(web::Json(found))
}

/// Profile page data for one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile", body = UserProfileSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Not logged in", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userProfile"
)]
#[get("/users/{id}")]
pub async fn user_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserProfile>> {
    let viewer = session.require_user(state.login.as_ref()).await?;
    let id = parse_user_id("id", &path)?;
    let profile = state.users.profile(viewer.id(), &id).await?;
    Ok(web::Json(profile))
}

/// Users following `id`.
#[utoipa::path(
    get,
    path = "/users/{id}/followers",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Followers", body = [UserSummarySchema]),
        (status = 401, description = "Not logged in", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "followers"
)]
#[get("/users/{id}/followers")]
pub async fn followers(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserSummary>>> {
    let viewer = session.require_user(state.login.as_ref()).await?;
    let id = parse_user_id("id", &path)?;
    Ok(web::Json(state.follow_query.followers(viewer.id(), &id).await?))
}

/// Users `id` follows.
#[utoipa::path(
    get,
    path = "/users/{id}/following",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Followed users", body = [UserSummarySchema]),
        (status = 401, description = "Not logged in", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "following"
)]
#[get("/users/{id}/following")]
pub async fn following(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserSummary>>> {
    let viewer = session.require_user(state.login.as_ref()).await?;
    let id = parse_user_id("id", &path)?;
    Ok(web::Json(state.follow_query.following(viewer.id(), &id).await?))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
