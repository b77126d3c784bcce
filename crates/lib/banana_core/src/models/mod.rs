//! Domain models shared by the repository, the auth core and the API.

pub mod auth;
pub mod user;
