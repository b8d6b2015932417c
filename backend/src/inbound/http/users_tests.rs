//! Tests for the user handlers.

use actix_web::http::StatusCode;
use actix_web::test;
use pagination::{Page, PageRequest};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{Error, FollowCounts, Session, SessionToken, User};
use crate::inbound::http::test_utils::{MockPorts, session_cookie, sign_in, test_app, user_named};

fn summary(user: &User, is_following: bool) -> UserSummary {
    UserSummary {
        user: user.clone(),
        following: is_following,
    }
}

#[rstest]
#[actix_web::test]
async fn signup_creates_account_and_logs_in() {
    let ada = user_named("ada");
    let mut ports = MockPorts::signed_out();
    let session = Session {
        user: ada.clone(),
        token: SessionToken::new("tok-1").expect("token"),
    };
    ports
        .signup
        .expect_sign_up()
        .withf(|creds| creds.username().as_ref() == "ada" && creds.password() == "secret")
        .times(1)
        .returning(move |_| Ok(session.clone()));
    let app = test::init_service(test_app(ports.into_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": "ada", "password": "secret" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let _cookie = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "ada");
}

#[rstest]
#[case(json!({ "username": "ada", "password": "12345" }), "password", "password_too_short")]
#[case(json!({ "username": "no spaces", "password": "secret" }), "username", "invalid_username")]
#[case(json!({ "password": "secret" }), "username", "empty_username")]
#[actix_web::test]
async fn signup_validates_credentials(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = MockPorts::signed_out();
    ports.signup.expect_sign_up().never();
    let app = test::init_service(test_app(ports.into_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post().uri("/users").set_json(body).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn taken_username_is_a_conflict() {
    let mut ports = MockPorts::signed_out();
    ports.signup.expect_sign_up().returning(|_| {
        Err(Error::conflict("Username has already been taken")
            .with_details(json!({ "field": "username", "code": "username_taken" })))
    });
    let app = test::init_service(test_app(ports.into_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": "ada", "password": "secret" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[rstest]
#[actix_web::test]
async fn search_passes_query_and_viewer() {
    let viewer = user_named("viewer");
    let ada = user_named("ada");
    let mut ports = MockPorts::signed_in_as(&viewer);
    let viewer_id = viewer.id().clone();
    let hit = summary(&ada, true);
    ports
        .users
        .expect_search()
        .withf(move |viewer, query| viewer == &viewer_id && query == "AD")
        .times(1)
        .returning(move |_, _| Ok(vec![hit.clone()]));
    let app = test::init_service(test_app(ports.into_state())).await;
    let cookie = session_cookie(&test::call_service(&app, sign_in().to_request()).await);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users/search?query=AD")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["username"], "ada");
    assert_eq!(body[0]["following"], true);
}

#[rstest]
#[actix_web::test]
async fn search_requires_login() {
    let app = test::init_service(test_app(MockPorts::signed_out().into_state())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/users/search?query=a").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn profile_renders_counts_and_tweets() {
    let viewer = user_named("viewer");
    let ada = user_named("ada");
    let ada_id = ada.id().clone();
    let mut ports = MockPorts::signed_in_as(&viewer);
    let profile = UserProfile {
        user: ada.clone(),
        counts: FollowCounts {
            followers: 3,
            following: 1,
        },
        followed_by_viewer: true,
        tweets: Page::new(Vec::new(), PageRequest::default()),
    };
    ports
        .users
        .expect_profile()
        .withf(move |_, id| id == &ada_id)
        .returning(move |_, _| Ok(profile.clone()));
    let app = test::init_service(test_app(ports.into_state())).await;
    let cookie = session_cookie(&test::call_service(&app, sign_in().to_request()).await);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/users/{}", ada.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["user"]["username"], "ada");
    assert_eq!(body["counts"]["followers"], 3);
    assert_eq!(body["followedByViewer"], true);
    assert_eq!(body["tweets"]["data"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn malformed_profile_id_is_rejected() {
    let viewer = user_named("viewer");
    let mut ports = MockPorts::signed_in_as(&viewer);
    ports.users.expect_profile().never();
    let app = test::init_service(test_app(ports.into_state())).await;
    let cookie = session_cookie(&test::call_service(&app, sign_in().to_request()).await);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/users/not-a-uuid")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("followers")]
#[case("following")]
#[actix_web::test]
async fn traversals_list_users(#[case] direction: &str) {
    let viewer = user_named("viewer");
    let ada = user_named("ada");
    let grace = summary(&user_named("grace"), false);
    let mut ports = MockPorts::signed_in_as(&viewer);
    let listed = vec![grace];
    let for_followers = listed.clone();
    ports
        .follow_query
        .expect_followers()
        .returning(move |_, _| Ok(for_followers.clone()));
    ports
        .follow_query
        .expect_following()
        .returning(move |_, _| Ok(listed.clone()));
    let app = test::init_service(test_app(ports.into_state())).await;
    let cookie = session_cookie(&test::call_service(&app, sign_in().to_request()).await);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/users/{}/{direction}", ada.id()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["username"], "grace");
    assert_eq!(body[0]["following"], false);
}
