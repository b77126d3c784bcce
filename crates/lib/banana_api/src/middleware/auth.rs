//! Authentication filter: `X-AUTH-TOKEN` extraction and principal resolution.
//!
//! Runs before every route. It never rejects a request: when the token is
//! missing, invalid, expired, or names an unknown user, the request simply
//! carries no [`AuthenticatedUser`] and the authorization gate decides.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use banana_core::auth::AuthError;
use banana_core::auth::principal::{Principal, load_principal};
use banana_core::models::user::AccountDetails;
use tracing::{debug, warn};

use crate::AppState;
use crate::error::AppError;

/// Request header carrying the access token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Principal installed in request extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

/// Axum middleware: resolves `X-AUTH-TOKEN` to a principal and, on success,
/// injects [`AuthenticatedUser`] into request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(principal) = resolve_principal(&state, request.headers()).await {
        request.extensions_mut().insert(AuthenticatedUser(principal));
    }

    next.run(request).await
}

/// Read the token header, trimmed; `None` when absent, empty, or not ASCII.
fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn resolve_principal(state: &AppState, headers: &HeaderMap) -> Option<Principal> {
    let token = token_from_headers(headers)?;

    if !state.tokens.validate(token) {
        debug!("auth: invalid or expired token");
        return None;
    }

    let subject = match state.tokens.subject(token) {
        Ok(subject) => subject,
        Err(e) => {
            debug!(error = %e, "auth: token subject unreadable");
            return None;
        }
    };

    match load_principal(state.users.as_ref(), &subject).await {
        Ok(principal) if principal.account_active() => Some(principal),
        Ok(principal) => {
            debug!(msrl = principal.id(), "auth: account inactive");
            None
        }
        Err(AuthError::UserNotFound(_)) => {
            debug!(subject = %subject, "auth: token subject has no user");
            None
        }
        Err(e) => {
            warn!(error = %e, "auth: principal lookup failed");
            None
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn token_header_is_trimmed_and_required() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("   "));
        assert_eq!(token_from_headers(&headers), None);

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static(" abc.def.ghi "));
        assert_eq!(token_from_headers(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_header_is_not_consulted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(token_from_headers(&headers), None);
    }
}
