//! JWT token issuance and verification.
//!
//! Tokens are compact HS256 JWS strings carrying `{sub, roles, iat, exp}`.
//! Nothing is stored server-side; a token is valid while its signature
//! verifies under the process secret and `now < exp`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Default token lifetime: one hour.
pub const DEFAULT_TTL_MS: i64 = 60 * 60 * 1000;

/// HS256 needs a key of at least 256 bits.
pub const MIN_SECRET_LEN: usize = 32;

/// Issues and validates signed access tokens.
///
/// Built once at startup from the configured secret and shared read-only
/// across requests.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Build a token service from raw secret bytes and a token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, AuthError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::WeakSecret(secret.len()));
        }
        if ttl <= Duration::zero() {
            return Err(AuthError::ValidationError(
                "token lifetime must be positive".into(),
            ));
        }
        // `iat` and `exp` are whole seconds, so the lifetime must be too.
        if ttl != Duration::seconds(ttl.num_seconds()) {
            return Err(AuthError::ValidationError(format!(
                "token lifetime must be a whole number of seconds, got {}ms",
                ttl.num_milliseconds()
            )));
        }

        // Expiry is checked separately against the caller's clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// Build a token service with a lifetime given in milliseconds.
    pub fn with_ttl_millis(secret: &[u8], ttl_ms: i64) -> Result<Self, AuthError> {
        Self::new(secret, Duration::milliseconds(ttl_ms))
    }

    /// Issue a token for `subject` valid from now until now + TTL.
    pub fn create_token(&self, subject: &str, roles: &[String]) -> Result<String, AuthError> {
        self.create_token_at(subject, roles, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    ///
    /// The issue instant is truncated to the whole second recorded in `iat`;
    /// the token is valid on `[iat, iat + ttl)`.
    pub fn create_token_at(
        &self,
        subject: &str,
        roles: &[String],
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = issued_at.timestamp();
        let claims = TokenClaims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            iat,
            exp: iat + self.ttl.num_seconds(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
    }

    /// Strictly parse a token: the signature must verify and every claim must
    /// be present. Expiry is not checked here; see [`TokenService::validate`].
    pub fn parse(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(format!("jwt decode: {e}")))
    }

    /// Return the `sub` claim of a token that parses.
    pub fn subject(&self, token: &str) -> Result<String, AuthError> {
        self.parse(token).map(|claims| claims.sub)
    }

    /// True iff the token parses and has not expired.
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Utc::now())
    }

    /// Same as [`TokenService::validate`] against an explicit clock reading.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.parse(token) {
            Ok(claims) => now.timestamp() < claims.exp,
            Err(_) => false,
        }
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
