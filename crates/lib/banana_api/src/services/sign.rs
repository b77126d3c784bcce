//! Sign-in and registration flows.

use banana_core::models::user::{NAME_MAX_LEN, NewUser, ROLE_USER, UID_MAX_LEN, User};
use banana_core::repository::UserRepository;
use tracing::{debug, info};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// Verify credentials and issue an access token for the user.
///
/// Unknown uid and wrong password fail identically, in body and in bcrypt
/// work, so callers cannot tell which accounts exist.
pub async fn signin(state: &AppState, uid: &str, password: &str) -> AppResult<String> {
    let found = state.users.find_by_uid(uid).await?;
    let verified = match &found {
        Some(user) => state.passwords.verify(password, &user.password),
        None => state.passwords.verify_missing(password),
    };
    let user = found.filter(|_| verified).ok_or_else(|| {
        debug!("sign-in rejected");
        AppError::EmailSigninFailed
    })?;

    let token = state
        .tokens
        .create_token(&user.msrl.to_string(), &user.roles)?;
    info!(msrl = user.msrl, "user signed in");
    Ok(token)
}

/// Register a user with the default role, hashing the password.
pub async fn register(state: &AppState, uid: &str, name: &str, password: &str) -> AppResult<User> {
    validate_uid(uid)?;
    validate_name(name)?;
    if password.is_empty() {
        return Err(AppError::InvalidRequest("password must not be empty".into()));
    }

    let password_hash = state.passwords.hash(password)?;
    let user = state
        .users
        .insert(NewUser {
            uid: uid.to_string(),
            name: name.to_string(),
            password_hash,
            roles: vec![ROLE_USER.to_string()],
        })
        .await?;

    info!(msrl = user.msrl, "user registered");
    Ok(user)
}

fn validate_uid(uid: &str) -> AppResult<()> {
    if uid.trim().is_empty() {
        return Err(AppError::InvalidRequest("id must not be empty".into()));
    }
    if uid.chars().count() > UID_MAX_LEN {
        return Err(AppError::InvalidRequest(format!(
            "id must be at most {UID_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidRequest("name must not be empty".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(AppError::InvalidRequest(format!(
            "name must be at most {NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}
