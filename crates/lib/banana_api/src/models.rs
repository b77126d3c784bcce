//! Request forms and response envelopes.

use serde::{Deserialize, Serialize};

use crate::messages::{self, MessageCatalog};

/// Envelope shared by every JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonResult {
    pub success: bool,
    pub code: i32,
    pub message: String,
}

impl CommonResult {
    pub fn success(catalog: &MessageCatalog) -> Self {
        Self {
            success: true,
            code: catalog.code(messages::SUCCESS),
            message: catalog.message(messages::SUCCESS).to_string(),
        }
    }

    /// Failure envelope for a catalog key such as `userNotFound`.
    pub fn failure(catalog: &MessageCatalog, key: &str) -> Self {
        Self {
            success: false,
            code: catalog.code(key),
            message: catalog.message(key).to_string(),
        }
    }
}

/// Success envelope carrying one value.
#[derive(Debug, Clone, Serialize)]
pub struct SingleResult<T> {
    #[serde(flatten)]
    pub result: CommonResult,
    pub data: T,
}

impl<T> SingleResult<T> {
    pub fn new(catalog: &MessageCatalog, data: T) -> Self {
        Self {
            result: CommonResult::success(catalog),
            data,
        }
    }
}

/// Success envelope carrying a list.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T> {
    #[serde(flatten)]
    pub result: CommonResult,
    pub data: Vec<T>,
}

impl<T> ListResult<T> {
    pub fn new(catalog: &MessageCatalog, data: Vec<T>) -> Self {
        Self {
            result: CommonResult::success(catalog),
            data,
        }
    }
}

/// `POST /v1/signin` form.
#[derive(Debug, Deserialize)]
pub struct SigninForm {
    pub id: String,
    pub password: String,
}

/// `POST /v1/signup` form.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub id: String,
    pub password: String,
    pub name: String,
}

/// `POST /v1/user` form.
#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub uid: String,
    pub name: String,
    pub password: String,
}

/// `PUT /v1/user` form.
#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    pub msrl: i64,
    pub name: String,
}

/// `GET /helloworld/json` body.
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
}
