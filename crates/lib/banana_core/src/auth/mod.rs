//! Authentication and authorization logic.
//!
//! Provides password hashing, token issuance and validation, and the
//! resolution of a token subject into an authenticated principal.

pub mod password;
pub mod principal;
pub mod token;

use thiserror::Error;

use crate::repository::RepositoryError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Signing secret is {0} bytes; at least {min} are required", min = token::MIN_SECRET_LEN)]
    WeakSecret(usize),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}
