//! Resolution of a token subject into an authenticated principal.

use tracing::debug;

use super::AuthError;
use crate::models::user::{AccountDetails, User};
use crate::repository::UserRepository;

/// The authenticated identity bound to one request.
///
/// Authorities come from the stored user record, not from the token, so role
/// changes apply on the next request without reissuing tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    identity: User,
}

impl Principal {
    pub fn new(identity: User) -> Self {
        Self { identity }
    }

    /// Login identifier of the principal.
    pub fn uid(&self) -> &str {
        &self.identity.uid
    }

    /// True if the principal holds at least one of `required`.
    pub fn has_any_role<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .any(|role| self.authorities().iter().any(|held| held == role.as_ref()))
    }
}

impl AccountDetails for Principal {
    fn id(&self) -> i64 {
        self.identity.id()
    }

    fn authorities(&self) -> &[String] {
        self.identity.authorities()
    }

    fn account_active(&self) -> bool {
        self.identity.account_active()
    }
}

/// Load the principal named by a token subject.
///
/// The subject is the string form of the user's `msrl`; a subject that is not
/// numeric or names no stored user yields [`AuthError::UserNotFound`].
pub async fn load_principal(
    users: &dyn UserRepository,
    subject: &str,
) -> Result<Principal, AuthError> {
    let msrl: i64 = subject.parse().map_err(|_| {
        debug!(subject, "token subject is not a numeric user id");
        AuthError::UserNotFound(subject.to_string())
    })?;

    users
        .find_by_id(msrl)
        .await?
        .map(Principal::new)
        .ok_or_else(|| AuthError::UserNotFound(subject.to_string()))
}
