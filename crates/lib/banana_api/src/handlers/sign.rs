//! Sign-in and sign-up request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppForm;
use crate::models::{CommonResult, SigninForm, SignupForm, SingleResult};
use crate::services::sign;

/// `POST /v1/signin`: exchange uid + password for an access token.
pub async fn signin_handler(
    State(state): State<AppState>,
    AppForm(form): AppForm<SigninForm>,
) -> AppResult<Json<SingleResult<String>>> {
    let token = sign::signin(&state, &form.id, &form.password).await?;
    Ok(Json(SingleResult::new(&state.messages, token)))
}

/// `POST /v1/signup`: create an account with the default role.
pub async fn signup_handler(
    State(state): State<AppState>,
    AppForm(form): AppForm<SignupForm>,
) -> AppResult<Json<CommonResult>> {
    sign::register(&state, &form.id, &form.name, &form.password).await?;
    Ok(Json(CommonResult::success(&state.messages)))
}
