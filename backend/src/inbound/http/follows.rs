//! Follow and unfollow handlers.
//!
//! ```text
//! POST   /users/{id}/follow  -> 201 {"following": true}
//! DELETE /users/{id}/follow  -> 200 {"following": false}
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Follow state after a follow or unfollow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct FollowStatus {
    pub following: bool,
}

/// Follow a user.
#[utoipa::path(
    post,
    path = "/users/{id}/follow",
    params(("id" = String, Path, description = "User to follow")),
    responses(
        (status = 201, description = "Now following", body = FollowStatus),
        (status = 400, description = "Self-follow or malformed id", body = ErrorSchema),
        (status = 401, description = "Not logged in", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 409, description = "Already following", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "follow"
)]
#[post("/users/{id}/follow")]
pub async fn follow(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let viewer = session.require_user(state.login.as_ref()).await?;
    let followee = parse_user_id("id", &path)?;
    state.follows.follow(viewer.id(), &followee).await?;
    Ok(HttpResponse::Created().json(FollowStatus { following: true }))
}

/// Stop following a user.
#[utoipa::path(
    delete,
    path = "/users/{id}/follow",
    params(("id" = String, Path, description = "User to unfollow")),
    responses(
        (status = 200, description = "No longer following", body = FollowStatus),
        (status = 401, description = "Not logged in", body = ErrorSchema),
        (status = 404, description = "Not following", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "unfollow"
)]
#[delete("/users/{id}/follow")]
pub async fn unfollow(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<FollowStatus>> {
    let viewer = session.require_user(state.login.as_ref()).await?;
    let followee = parse_user_id("id", &path)?;
    state.follows.unfollow(viewer.id(), &followee).await?;
    Ok(web::Json(FollowStatus { following: false }))
}
