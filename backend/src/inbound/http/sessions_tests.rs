//! Tests for the session handlers.

use actix_web::http::StatusCode;
use actix_web::test;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::SessionToken;
use crate::inbound::http::test_utils::{MockPorts, session_cookie, sign_in, test_app, user_named};

fn session_for(user: &User, token: &str) -> Session {
    Session {
        user: user.clone(),
        token: SessionToken::new(token).expect("token"),
    }
}

#[rstest]
#[actix_web::test]
async fn login_sets_cookie_and_returns_user() {
    let ada = user_named("ada");
    let mut ports = MockPorts::signed_out();
    let session = session_for(&ada, "tok-1");
    ports
        .login
        .expect_authenticate()
        .withf(|creds| creds.username() == "ada" && creds.password() == "secret")
        .times(1)
        .returning(move |_| Ok(session.clone()));
    let app = test::init_service(test_app(ports.into_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/session")
            .set_json(json!({ "username": "ada", "password": "secret" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let _cookie = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "ada");
    assert_eq!(body["id"], ada.id().to_string());
    assert!(body.get("sessionToken").is_none());
}

#[rstest]
#[actix_web::test]
async fn bad_credentials_are_unauthorised() {
    let mut ports = MockPorts::signed_out();
    ports
        .login
        .expect_authenticate()
        .returning(|_| Err(Error::unauthorized("invalid credentials")));
    let app = test::init_service(test_app(ports.into_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/session")
            .set_json(json!({ "username": "ada", "password": "wrong" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(json!({ "username": "", "password": "pw" }), "username", "empty_username")]
#[case(json!({ "username": "ada" }), "password", "empty_password")]
#[actix_web::test]
async fn blank_fields_are_rejected_before_authentication(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = MockPorts::signed_out();
    ports.login.expect_authenticate().never();
    let app = test::init_service(test_app(ports.into_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post().uri("/session").set_json(body).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn demo_login_skips_password() {
    let grace = user_named("grace");
    let id = grace.id().clone();
    let mut ports = MockPorts::signed_out();
    let session = session_for(&grace, "tok-demo");
    ports
        .login
        .expect_login_demo()
        .with(eq(id.clone()))
        .times(1)
        .returning(move |_| Ok(session.clone()));
    ports.login.expect_authenticate().never();
    let app = test::init_service(test_app(ports.into_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/session")
            .set_json(json!({ "demo": id.to_string() }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "grace");
}

#[rstest]
#[actix_web::test]
async fn login_is_forbidden_when_already_signed_in() {
    let ada = user_named("ada");
    let mut ports = MockPorts::signed_in_as(&ada);
    ports.login.expect_authenticate().never();
    let app = test::init_service(test_app(ports.into_state())).await;
    let cookie = session_cookie(&test::call_service(&app, sign_in().to_request()).await);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/session")
            .cookie(cookie)
            .set_json(json!({ "username": "ada", "password": "secret" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn current_session_requires_login() {
    let app = test::init_service(test_app(MockPorts::signed_out().into_state())).await;
    let res =
        test::call_service(&app, test::TestRequest::get().uri("/session").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn logout_rotates_token_and_returns_no_content() {
    let ada = user_named("ada");
    let mut ports = MockPorts::signed_in_as(&ada);
    ports
        .login
        .expect_logout()
        .withf(|token| token.as_str() == "tok-test")
        .times(1)
        .returning(|_| Ok(()));
    let app = test::init_service(test_app(ports.into_state())).await;
    let cookie = session_cookie(&test::call_service(&app, sign_in().to_request()).await);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/session")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
