//! Business flows behind the handlers.

pub mod sign;
pub mod users;
