//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's `msrl` in string form.
    pub sub: String,
    /// Roles copied at issuance (e.g. `["ROLE_USER"]`).
    pub roles: Vec<String>,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}
