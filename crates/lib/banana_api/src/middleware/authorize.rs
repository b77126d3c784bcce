//! Authorization gate: per-route role requirements.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use banana_core::auth::principal::Principal;

use super::auth::AuthenticatedUser;
use crate::error::{AppError, AppResult};

/// Roles a route accepts; holding any one of them admits the caller.
#[derive(Debug, Clone)]
pub struct RequiredRoles(Arc<[String]>);

impl RequiredRoles {
    pub fn any_of(roles: &[&str]) -> Self {
        Self(roles.iter().map(|r| r.to_string()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn roles(&self) -> &[String] {
        &self.0
    }
}

/// Pure policy check.
///
/// - No role required: admit.
/// - No principal: [`AppError::Unauthenticated`].
/// - Principal without any required role: [`AppError::AccessDenied`].
pub fn authorize(principal: Option<&Principal>, required: &RequiredRoles) -> AppResult<()> {
    if required.is_empty() {
        return Ok(());
    }
    let principal = principal.ok_or(AppError::Unauthenticated)?;
    if principal.has_any_role(required.roles()) {
        Ok(())
    } else {
        Err(AppError::AccessDenied(format!(
            "requires one of {:?}",
            required.roles()
        )))
    }
}

/// Axum middleware enforcing [`RequiredRoles`] on the routes it layers.
///
/// Must run inside the authentication filter.
pub async fn require_roles(
    State(required): State<RequiredRoles>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let principal = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| &user.0);
    authorize(principal, &required)?;
    Ok(next.run(request).await)
}
