//! # banana_api
//!
//! HTTP API library for Banana.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod messages;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::middleware::{from_fn_with_state, map_response_with_state};
use axum::routing::{delete, get, post};
use banana_core::auth::AuthError;
use banana_core::auth::password::PasswordHasher;
use banana_core::auth::token::TokenService;
use banana_core::models::user::ROLE_USER;
use banana_core::repository::UserRepository;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{hello, sign, users};
use crate::messages::MessageCatalog;
use crate::middleware::authorize::{RequiredRoles, require_roles};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User store.
    pub users: Arc<dyn UserRepository>,
    /// Access token issuer and validator.
    pub tokens: Arc<TokenService>,
    /// Password hasher.
    pub passwords: PasswordHasher,
    /// Response code and message lookup.
    pub messages: MessageCatalog,
}

impl AppState {
    /// Build state from configuration. Fails on a weak secret, a token
    /// lifetime that is not a positive whole number of seconds, or an
    /// out-of-range bcrypt cost.
    pub fn new(config: &ApiConfig, users: Arc<dyn UserRepository>) -> Result<Self, AuthError> {
        let tokens =
            TokenService::with_ttl_millis(config.jwt_secret.as_bytes(), config.token_ttl_ms)?;
        let passwords = PasswordHasher::new(config.bcrypt_cost)?;
        Ok(Self {
            users,
            tokens: Arc::new(tokens),
            passwords,
            messages: MessageCatalog::new(config.locale),
        })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no role required)
    let public = Router::new()
        .route("/v1/signin", post(sign::signin_handler))
        .route("/v1/signup", post(sign::signup_handler))
        .route("/helloworld/string", get(hello::hello_string))
        .route("/helloworld/json", get(hello::hello_json));

    // Routes requiring ROLE_USER
    let secured = Router::new()
        .route("/v1/users", get(users::list_users_handler))
        .route(
            "/v1/user",
            get(users::current_user_handler)
                .post(users::create_user_handler)
                .put(users::update_user_handler),
        )
        .route("/v1/user/{msrl}", delete(users::delete_user_handler))
        .route_layer(from_fn_with_state(
            RequiredRoles::any_of(&[ROLE_USER]),
            require_roles,
        ));

    Router::new()
        .merge(public)
        .merge(secured)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(map_response_with_state(
            state.messages,
            error::render_failures,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
