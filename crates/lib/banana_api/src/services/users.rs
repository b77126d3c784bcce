//! User directory operations for authenticated callers.

use banana_core::auth::principal::Principal;
use banana_core::models::user::{AccountDetails, ROLE_ADMIN, User};
use banana_core::repository::UserRepository;
use tracing::info;

use super::sign::validate_name;
use crate::AppState;
use crate::error::{AppError, AppResult};

/// All users.
pub async fn list(state: &AppState) -> AppResult<Vec<User>> {
    Ok(state.users.find_all().await?)
}

/// Fresh copy of the caller's own record.
pub async fn current(state: &AppState, principal: &Principal) -> AppResult<User> {
    state
        .users
        .find_by_uid(principal.uid())
        .await?
        .ok_or(AppError::UserNotFound)
}

/// Rename a user. Callers may only rename themselves unless they are admins.
pub async fn rename(
    state: &AppState,
    principal: &Principal,
    msrl: i64,
    name: &str,
) -> AppResult<User> {
    ensure_can_manage(principal, msrl)?;
    validate_name(name)?;
    let user = state
        .users
        .update_name(msrl, name)
        .await?
        .ok_or(AppError::UserNotFound)?;
    info!(msrl, by = principal.id(), "user renamed");
    Ok(user)
}

/// Delete a user. Callers may only delete themselves unless they are admins.
pub async fn remove(state: &AppState, principal: &Principal, msrl: i64) -> AppResult<()> {
    ensure_can_manage(principal, msrl)?;
    if !state.users.delete(msrl).await? {
        return Err(AppError::UserNotFound);
    }
    info!(msrl, by = principal.id(), "user deleted");
    Ok(())
}

fn ensure_can_manage(principal: &Principal, msrl: i64) -> AppResult<()> {
    if principal.id() == msrl || principal.has_any_role(&[ROLE_ADMIN]) {
        Ok(())
    } else {
        Err(AppError::AccessDenied(format!(
            "user {} may not modify user {msrl}",
            principal.id()
        )))
    }
}

#[cfg(test)]
mod tests {
    use banana_core::models::user::ROLE_USER;

    use super::*;

    fn principal(msrl: i64, roles: &[&str]) -> Principal {
        Principal::new(User {
            msrl,
            uid: format!("user{msrl}"),
            name: "n".into(),
            password: String::new(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        })
    }

    #[test]
    fn owner_may_manage_self() {
        assert!(ensure_can_manage(&principal(3, &[ROLE_USER]), 3).is_ok());
    }

    #[test]
    fn others_are_denied() {
        let err = ensure_can_manage(&principal(3, &[ROLE_USER]), 4).unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));
    }

    #[test]
    fn admin_may_manage_anyone() {
        assert!(ensure_can_manage(&principal(3, &[ROLE_USER, ROLE_ADMIN]), 4).is_ok());
    }
}
