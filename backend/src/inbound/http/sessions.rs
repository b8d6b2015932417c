//! Session handlers.
//!
//! ```text
//! POST   /session {"username":"ada","password":"secret"} or {"demo":"<user id>"}
//! GET    /session
//! DELETE /session
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, Session, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{credentials_error, parse_user_id};

/// Login request body.
///
/// Either `demo` (log in as that user) or both credentials must be present.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Id of an existing user to log in as without a password.
    #[serde(default)]
    pub demo: Option<String>,
}

/// Refuse the request when the cookie already carries a live session.
pub(crate) async fn require_logged_out(
    session: &SessionContext,
    state: &HttpState,
) -> Result<(), Error> {
    match session.current_user(state.login.as_ref()).await? {
        Some(_) => Err(Error::forbidden("already logged in")),
        None => Ok(()),
    }
}

async fn open_session(state: &HttpState, payload: LoginRequest) -> Result<Session, Error> {
    if let Some(demo) = payload.demo.as_deref().filter(|id| !id.trim().is_empty()) {
        let user_id = parse_user_id("demo", demo.trim())?;
        return state.login.login_demo(&user_id).await;
    }
    let credentials = LoginCredentials::try_from_parts(
        payload.username.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )
    .map_err(credentials_error)?;
    state.login.authenticate(&credentials).await
}

/// Log in and set the session cookie.
#[utoipa::path(
    post,
    path = "/session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 403, description = "Already logged in", body = ErrorSchema),
        (status = 404, description = "Demo user not found", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/session")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    require_logged_out(&session, &state).await?;
    let opened = open_session(&state, payload.into_inner()).await?;
    session.persist_token(&opened.token)?;
    info!(user_id = %opened.user.id(), "session opened");
    Ok(web::Json(opened.user))
}

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Not logged in", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user = session.require_user(state.login.as_ref()).await?;
    Ok(web::Json(user))
}

/// Log out: rotate the stored token and drop the cookie.
#[utoipa::path(
    delete,
    path = "/session",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not logged in", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "logout"
)]
#[delete("/session")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.require_user(state.login.as_ref()).await?;
    if let Some(token) = session.token()? {
        state.login.logout(&token).await?;
    }
    session.purge();
    info!(user_id = %user.id(), "session closed");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
