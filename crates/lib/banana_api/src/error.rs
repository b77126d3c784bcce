//! Application error types and the failure envelope.
//!
//! Handlers and middleware return [`AppError`]. Its `IntoResponse` impl only
//! sets the status and tags the response with a [`Failure`]; the
//! [`render_failures`] layer then writes the `CommonResult` body using the
//! configured message catalog.

use std::any::Any;

use axum::{
    Json,
    extract::{
        State,
        rejection::{FormRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use banana_core::auth::AuthError;
use banana_core::repository::RepositoryError;
use thiserror::Error;
use tracing::{debug, error};

use crate::messages::MessageCatalog;
use crate::models::CommonResult;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Failure kinds surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Unknown,
    UserNotFound,
    EmailSigninFailed,
    EntryPoint,
    AccessDenied,
    UidAlreadyTaken,
    InvalidRequest,
}

impl Failure {
    /// Message-catalog key.
    pub fn key(self) -> &'static str {
        match self {
            Failure::Unknown => "unKnown",
            Failure::UserNotFound => "userNotFound",
            Failure::EmailSigninFailed => "emailSigninFailed",
            Failure::EntryPoint => "entryPointException",
            Failure::AccessDenied => "accessDenied",
            Failure::UidAlreadyTaken => "uidAlreadyTaken",
            Failure::InvalidRequest => "invalidRequest",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Failure::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            Failure::UserNotFound => StatusCode::NOT_FOUND,
            Failure::EmailSigninFailed | Failure::EntryPoint => StatusCode::UNAUTHORIZED,
            Failure::AccessDenied => StatusCode::FORBIDDEN,
            Failure::UidAlreadyTaken => StatusCode::CONFLICT,
            Failure::InvalidRequest => StatusCode::BAD_REQUEST,
        }
    }
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email sign-in failed")]
    EmailSigninFailed,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Uid already taken: {0}")]
    UidAlreadyTaken(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn failure(&self) -> Failure {
        match self {
            AppError::UserNotFound => Failure::UserNotFound,
            AppError::EmailSigninFailed => Failure::EmailSigninFailed,
            AppError::Unauthenticated => Failure::EntryPoint,
            AppError::AccessDenied(_) => Failure::AccessDenied,
            AppError::UidAlreadyTaken(_) => Failure::UidAlreadyTaken,
            AppError::InvalidRequest(_) => Failure::InvalidRequest,
            AppError::Internal(_) => Failure::Unknown,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(detail) => error!(detail = %detail, "request failed"),
            other => debug!(error = %other, "request rejected"),
        }
        let failure = self.failure();
        let mut response = failure.status().into_response();
        response.extensions_mut().insert(failure);
        response
    }
}

/// Response layer: replaces the body of any response tagged with a
/// [`Failure`] by the localized failure envelope.
pub async fn render_failures(
    State(catalog): State<MessageCatalog>,
    mut response: Response,
) -> Response {
    let Some(failure) = response.extensions_mut().remove::<Failure>() else {
        return response;
    };
    let status = response.status();
    (status, Json(CommonResult::failure(&catalog, failure.key()))).into_response()
}

/// Panic handler for `CatchPanicLayer`: the request fails as
/// [`AppError::Internal`] and renders as the unknown-failure envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::DuplicateUid(uid) => AppError::UidAlreadyTaken(uid),
            RepositoryError::Db(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::EmailSigninFailed,
            AuthError::TokenError(_) => AppError::Unauthenticated,
            AuthError::UserNotFound(_) => AppError::UserNotFound,
            AuthError::ValidationError(msg) => AppError::InvalidRequest(msg),
            AuthError::Repository(e) => AppError::from(e),
            AuthError::WeakSecret(_) | AuthError::Internal(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_failure_kind() {
        assert_eq!(AppError::UserNotFound.failure().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::EmailSigninFailed.failure().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthenticated.failure().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::AccessDenied("x".into()).failure().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::UidAlreadyTaken("x".into()).failure().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal("x".into()).failure().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn every_failure_key_is_in_catalog() {
        let catalog = MessageCatalog::default();
        for failure in [
            Failure::UserNotFound,
            Failure::EmailSigninFailed,
            Failure::EntryPoint,
            Failure::AccessDenied,
            Failure::UidAlreadyTaken,
            Failure::InvalidRequest,
        ] {
            assert_ne!(catalog.code(failure.key()), catalog.code(Failure::Unknown.key()));
        }
    }

    #[test]
    fn auth_errors_map_to_client_failures() {
        assert!(matches!(
            AppError::from(AuthError::CredentialError),
            AppError::EmailSigninFailed
        ));
        assert!(matches!(
            AppError::from(AuthError::UserNotFound("1".into())),
            AppError::UserNotFound
        ));
        assert!(matches!(
            AppError::from(AuthError::Repository(RepositoryError::DuplicateUid("a".into()))),
            AppError::UidAlreadyTaken(uid) if uid == "a"
        ));
        assert!(matches!(
            AppError::from(AuthError::TokenError("bad".into())),
            AppError::Unauthenticated
        ));
    }

    #[test]
    fn panic_response_is_unknown_failure() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.extensions().get::<Failure>(), Some(&Failure::Unknown));

        let response = panic_response(Box::new(String::from("boom")));
        assert_eq!(response.extensions().get::<Failure>(), Some(&Failure::Unknown));
    }

    #[test]
    fn into_response_tags_failure() {
        let response = AppError::AccessDenied("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.extensions().get::<Failure>(),
            Some(&Failure::AccessDenied)
        );
    }
}
