//! User directory models.

use std::fmt;

use serde::Serialize;

/// Role granted to every account created through sign-up.
pub const ROLE_USER: &str = "ROLE_USER";

/// Role allowed to manage other users' records.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Maximum length of a login identifier.
pub const UID_MAX_LEN: usize = 30;

/// Maximum length of a display name.
pub const NAME_MAX_LEN: usize = 100;

/// Persisted user record.
///
/// `password` always holds a bcrypt hash and is never serialized.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub msrl: i64,
    pub uid: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub roles: Vec<String>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("msrl", &self.msrl)
            .field("uid", &self.uid)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// A user that has not been stored yet; `msrl` is assigned by the repository.
#[derive(Clone)]
pub struct NewUser {
    pub uid: String,
    pub name: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("uid", &self.uid)
            .field("name", &self.name)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

/// Capabilities the authorization layer needs from an account.
pub trait AccountDetails {
    /// Numeric account id (`msrl`).
    fn id(&self) -> i64;

    /// Roles held by the account, in storage order.
    fn authorities(&self) -> &[String];

    /// Whether the account may authenticate at all.
    fn account_active(&self) -> bool;
}

impl AccountDetails for User {
    fn id(&self) -> i64 {
        self.msrl
    }

    fn authorities(&self) -> &[String] {
        &self.roles
    }

    // Expiry, locking and disabling are not modelled; every stored account is active.
    fn account_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            msrl: 7,
            uid: "a@b.com".into(),
            name: "Ada".into(),
            password: "$2b$04$hash".into(),
            roles: vec![ROLE_USER.into()],
        }
    }

    #[test]
    fn json_omits_password() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["msrl"], 7);
        assert_eq!(json["uid"], "a@b.com");
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["roles"], serde_json::json!(["ROLE_USER"]));
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("$2b$04$hash"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn account_details_reflect_record() {
        let user = sample();
        assert_eq!(user.id(), 7);
        assert_eq!(user.authorities(), ["ROLE_USER".to_string()]);
        assert!(user.account_active());
    }
}
