//! Request handlers.

pub mod hello;
pub mod sign;
pub mod users;
