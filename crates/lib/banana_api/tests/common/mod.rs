//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use banana_api::config::ApiConfig;
use banana_api::messages::Locale;
use banana_api::{AppState, router};
use banana_core::auth::password::MIN_COST;
use banana_core::repository::memory::InMemoryUserRepository;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-that-is-at-least-32-bytes!";

pub struct TestApp {
    pub state: AppState,
    pub repo: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_locale(Locale::Ko)
    }

    pub fn with_locale(locale: Locale) -> Self {
        let mut config = ApiConfig::with_secret(SECRET);
        config.bcrypt_cost = MIN_COST;
        config.locale = locale;
        let repo = Arc::new(InMemoryUserRepository::new());
        let state = AppState::new(&config, repo.clone()).expect("app state");
        Self { state, repo }
    }

    fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Send a request and return status plus body text.
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, String) {
        let resp = self.router().oneshot(req).await.expect("request");
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
    }

    /// Send a request and parse the body as JSON.
    pub async fn send_json(&self, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.send(req).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {body}"));
        (status, json)
    }

    pub async fn signup(&self, id: &str, password: &str, name: &str) -> (StatusCode, serde_json::Value) {
        self.send_json(form(
            Method::POST,
            "/v1/signup",
            &[("id", id), ("password", password), ("name", name)],
            None,
        ))
        .await
    }

    pub async fn signin(&self, id: &str, password: &str) -> (StatusCode, serde_json::Value) {
        self.send_json(form(
            Method::POST,
            "/v1/signin",
            &[("id", id), ("password", password)],
            None,
        ))
        .await
    }

    /// Sign up and sign in, returning the issued token.
    pub async fn register_and_signin(&self, id: &str, password: &str, name: &str) -> String {
        let (status, _) = self.signup(id, password, name).await;
        assert_eq!(status, StatusCode::OK);
        let (status, json) = self.signin(id, password).await;
        assert_eq!(status, StatusCode::OK);
        json["data"].as_str().expect("token").to_string()
    }
}

/// Percent-encode a form value.
fn encode(value: &str) -> String {
    let mut out = String::new();
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Build a form-encoded request.
pub fn form(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    token: Option<&str>,
) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header("X-AUTH-TOKEN", token);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Build a body-less request.
pub fn empty(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("X-AUTH-TOKEN", token);
    }
    builder.body(Body::empty()).unwrap()
}
