//! Password hashing via bcrypt.

use std::sync::Arc;

use tracing::debug;

use super::AuthError;

/// Default bcrypt cost factor.
pub const DEFAULT_COST: u32 = 10;

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Adaptive one-way password hasher.
///
/// The produced string is self-describing (`$2b$<cost>$<salt><digest>`), so
/// hashes created under an older cost keep verifying after the cost changes.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash at `cost` checked by [`PasswordHasher::verify_missing`].
    decoy: Arc<str>,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost (4..=31).
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AuthError::ValidationError(format!(
                "bcrypt cost must be between {MIN_COST} and {MAX_COST}, got {cost}"
            )));
        }
        let decoy = bcrypt::hash("banana-decoy", cost)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))?;
        Ok(Self {
            cost,
            decoy: decoy.into(),
        })
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::ValidationError(format!(
                "Password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` for a malformed hash instead of failing.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                debug!(error = %e, "stored password hash could not be parsed");
                false
            }
        }
    }

    /// Spend the same bcrypt work as [`PasswordHasher::verify`] for a user
    /// that does not exist. Always `false`.
    pub fn verify_missing(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.decoy);
        false
    }
}
