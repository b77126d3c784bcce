//! Sign-up and sign-in over HTTP.

mod common;

use axum::http::{Method, StatusCode};
use banana_api::messages::Locale;
use banana_core::repository::UserRepository;
use common::{TestApp, form};

#[tokio::test]
async fn signup_then_signin_issues_valid_token() {
    let app = TestApp::new();

    let (status, json) = app.signup("a@b.com", "pw", "Ada").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({ "success": true, "code": 0, "message": "성공하였습니다." })
    );

    let (status, json) = app.signin("a@b.com", "pw").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["code"], 0);
    let token = json["data"].as_str().expect("token string");

    let stored = app
        .state
        .users
        .find_by_uid("a@b.com")
        .await
        .unwrap()
        .expect("stored user");
    assert!(app.state.tokens.validate(token));
    assert_eq!(app.state.tokens.subject(token).unwrap(), stored.msrl.to_string());
    assert_ne!(stored.password, "pw");
}

#[tokio::test]
async fn signin_with_wrong_password_fails() {
    let app = TestApp::new();
    app.signup("a@b.com", "pw", "Ada").await;

    let (status, json) = app.signin("a@b.com", "WRONG").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], -1001);
    assert_eq!(
        json["message"],
        "계정이 존재하지 않거나 이메일 또는 비밀번호가 정확하지 않습니다."
    );
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn signin_unknown_user_matches_wrong_password() {
    let app = TestApp::new();
    app.signup("a@b.com", "pw", "Ada").await;

    let wrong_password = app.signin("a@b.com", "WRONG").await;
    let unknown_user = app.signin("nobody@x", "pw").await;
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = TestApp::new();
    let (status, _) = app.signup("a@b.com", "pw", "Ada").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = app.signup("a@b.com", "other", "Eve").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], -1004);

    // The original account keeps its password.
    let (status, _) = app.signin("a@b.com", "pw").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_form_field_is_invalid_request() {
    let app = TestApp::new();
    let (status, json) = app
        .send_json(form(
            Method::POST,
            "/v1/signup",
            &[("id", "a@b.com"), ("password", "pw")],
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], -1005);
}

#[tokio::test]
async fn overlong_uid_is_invalid_request() {
    let app = TestApp::new();
    let uid = format!("{}@example.com", "x".repeat(30));
    let (status, json) = app.signup(&uid, "pw", "Ada").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn english_catalog_is_used_when_configured() {
    let app = TestApp::with_locale(Locale::En);
    let (_, json) = app.signup("a@b.com", "pw", "Ada").await;
    assert_eq!(json["message"], "Success.");

    let (_, json) = app.signin("a@b.com", "nope").await;
    assert_eq!(json["code"], -1001);
    assert_eq!(
        json["message"],
        "Your account does not exist or your email or password is incorrect."
    );
}
