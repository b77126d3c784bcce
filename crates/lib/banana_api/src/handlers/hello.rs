//! Hello world endpoints: liveness checks that need no authentication.

use axum::Json;

use crate::models::HelloResponse;

/// `GET /helloworld/string`: plain-text greeting.
pub async fn hello_string() -> &'static str {
    "Hello world!!"
}

/// `GET /helloworld/json`: JSON greeting.
pub async fn hello_json() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "hello world!!".to_string(),
    })
}
