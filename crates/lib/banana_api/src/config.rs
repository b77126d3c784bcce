//! API server configuration.

use std::fmt;

use banana_core::auth::password::DEFAULT_COST;
use banana_core::auth::token::DEFAULT_TTL_MS;

use crate::messages::Locale;

/// Configuration for the API server.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// HMAC signing secret for access tokens; at least 32 bytes.
    pub jwt_secret: String,
    /// Access token lifetime in milliseconds.
    pub token_ttl_ms: i64,
    /// bcrypt cost factor for new password hashes.
    pub bcrypt_cost: u32,
    /// Locale of the response message catalog.
    pub locale: Locale,
}

impl ApiConfig {
    /// Configuration with the given secret and defaults elsewhere.
    ///
    /// | Field          | Default          |
    /// |----------------|------------------|
    /// | `bind_addr`    | `127.0.0.1:8080` |
    /// | `token_ttl_ms` | `3600000`        |
    /// | `bcrypt_cost`  | `10`             |
    /// | `locale`       | `ko`             |
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            jwt_secret: jwt_secret.into(),
            token_ttl_ms: DEFAULT_TTL_MS,
            bcrypt_cost: DEFAULT_COST,
            locale: Locale::default(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_ms", &self.token_ttl_ms)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("locale", &self.locale)
            .finish()
    }
}
