//! User directory request handlers. Every route here sits behind the
//! authorization gate.

use axum::Json;
use axum::extract::State;
use banana_core::models::user::User;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::{AppForm, AppPath};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CommonResult, CreateUserForm, ListResult, SingleResult, UpdateUserForm};
use crate::services::{sign, users};

/// `GET /v1/users`: list all users.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ListResult<User>>> {
    let all = users::list(&state).await?;
    Ok(Json(ListResult::new(&state.messages, all)))
}

/// `GET /v1/user`: the caller's own record.
pub async fn current_user_handler(
    State(state): State<AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> AppResult<Json<SingleResult<User>>> {
    let user = users::current(&state, &principal).await?;
    Ok(Json(SingleResult::new(&state.messages, user)))
}

/// `POST /v1/user`: create a user on behalf of an authenticated caller.
pub async fn create_user_handler(
    State(state): State<AppState>,
    AppForm(form): AppForm<CreateUserForm>,
) -> AppResult<Json<SingleResult<User>>> {
    let user = sign::register(&state, &form.uid, &form.name, &form.password).await?;
    Ok(Json(SingleResult::new(&state.messages, user)))
}

/// `PUT /v1/user`: rename a user.
pub async fn update_user_handler(
    State(state): State<AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    AppForm(form): AppForm<UpdateUserForm>,
) -> AppResult<Json<SingleResult<User>>> {
    let user = users::rename(&state, &principal, form.msrl, &form.name).await?;
    Ok(Json(SingleResult::new(&state.messages, user)))
}

/// `DELETE /v1/user/{msrl}`: delete a user.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    AppPath(msrl): AppPath<i64>,
) -> AppResult<Json<CommonResult>> {
    users::remove(&state, &principal, msrl).await?;
    Ok(Json(CommonResult::success(&state.messages)))
}
