//! Tweet handlers.
//!
//! ```text
//! POST /tweets {"body":"hi @ada","mentionedUserId":"<uuid>"}
//! GET  /feed?offset=0&limit=10
//! GET  /tweets?type=profile&userId=<uuid>&offset=10
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::{Page, PageParams};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::TweetDraft;
use crate::domain::{FeedKind, Tweet};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TweetPageSchema, TweetSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{feed_kind, page_request, parse_user_id};

/// Tweet submission body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TweetRequest {
    #[serde(default)]
    pub body: String,
    /// Id of a user mentioned by the tweet. Blank means no mention.
    #[serde(default)]
    pub mentioned_user_id: Option<String>,
}

/// Window over the viewer's feed.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FeedParams {
    /// Number of tweets to skip.
    pub offset: Option<i64>,
    /// Page size, 1 to 100.
    pub limit: Option<i64>,
}

/// Query accepted by the tweet listing used for infinite scroll.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TweetListParams {
    /// `feed` (default) or `profile`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Profile owner; defaults to the viewer. Ignored for `feed`.
    pub user_id: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

fn page_with_links(req: &HttpRequest, page: Page<Tweet>) -> Page<Tweet> {
    page.with_links(&req.full_url())
}

/// Publish a tweet as the viewer.
#[utoipa::path(
    post,
    path = "/tweets",
    request_body = TweetRequest,
    responses(
        (status = 201, description = "Tweet published", body = TweetSchema),
        (status = 400, description = "Blank, too long or unknown mention", body = ErrorSchema),
        (status = 401, description = "Not logged in", body = ErrorSchema)
    ),
    tags = ["tweets"],
    operation_id = "createTweet"
)]
#[post("/tweets")]
pub async fn create_tweet(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TweetRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user(state.login.as_ref()).await?;
    let TweetRequest {
        body,
        mentioned_user_id,
    } = payload.into_inner();
    let mentioned_user_id = mentioned_user_id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| parse_user_id("mentionedUserId", raw))
        .transpose()?;
    let tweet = state
        .tweets
        .create_tweet(
            author.id(),
            TweetDraft {
                body,
                mentioned_user_id,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(tweet))
}

/// Tweets by accounts the viewer follows, newest first.
#[utoipa::path(
    get,
    path = "/feed",
    params(FeedParams),
    responses(
        (status = 200, description = "Feed page", body = TweetPageSchema),
        (status = 400, description = "Invalid window", body = ErrorSchema),
        (status = 401, description = "Not logged in", body = ErrorSchema)
    ),
    tags = ["tweets"],
    operation_id = "feed"
)]
#[get("/feed")]
pub async fn feed(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<FeedParams>,
) -> ApiResult<web::Json<Page<Tweet>>> {
    let viewer = session.require_user(state.login.as_ref()).await?;
    let FeedParams { offset, limit } = params.into_inner();
    let request = page_request(PageParams { offset, limit })?;
    let page = state
        .feed
        .page_of_tweets(viewer.id(), FeedKind::Feed, request)
        .await?;
    Ok(web::Json(page_with_links(&req, page)))
}

/// Feed or profile tweets for infinite scroll.
#[utoipa::path(
    get,
    path = "/tweets",
    params(TweetListParams),
    responses(
        (status = 200, description = "Tweet page", body = TweetPageSchema),
        (status = 400, description = "Unknown type, malformed id or invalid window", body = ErrorSchema),
        (status = 401, description = "Not logged in", body = ErrorSchema)
    ),
    tags = ["tweets"],
    operation_id = "listTweets"
)]
#[get("/tweets")]
pub async fn list_tweets(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<TweetListParams>,
) -> ApiResult<web::Json<Page<Tweet>>> {
    let viewer = session.require_user(state.login.as_ref()).await?;
    let TweetListParams {
        kind,
        user_id,
        offset,
        limit,
    } = params.into_inner();
    let kind = feed_kind(kind.as_deref())?;
    let request = page_request(PageParams { offset, limit })?;
    let owner = match (kind, user_id.as_deref().filter(|raw| !raw.is_empty())) {
        (FeedKind::Profile, Some(raw)) => parse_user_id("userId", raw)?,
        _ => viewer.id().clone(),
    };
    debug!(%kind, user_id = %owner, offset = request.offset(), "listing tweets");
    let page = state.feed.page_of_tweets(&owner, kind, request).await?;
    Ok(web::Json(page_with_links(&req, page)))
}

#[cfg(test)]
#[path = "tweets_tests.rs"]
mod tests;
