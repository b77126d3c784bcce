//! # banana_core
//!
//! Core domain and authentication logic for Banana.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod repository;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
