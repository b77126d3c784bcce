//! User persistence.
//!
//! The auth core only talks to [`UserRepository`]. `postgres` is the
//! production store; `memory` backs tests and `--in-memory` runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::user::{NewUser, User};

/// Repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("uid already registered: {0}")]
    DuplicateUid(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Store of user records keyed by `msrl`, also searchable by `uid`.
///
/// Implementations must give read-your-writes: a user returned by `insert`
/// is visible to the next `find_by_uid` from the same caller.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, msrl: i64) -> Result<Option<User>, RepositoryError>;

    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, RepositoryError>;

    /// All users ordered by `msrl`.
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// Store a new user, assigning the next `msrl`.
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Change a user's display name. `None` if no such user.
    async fn update_name(&self, msrl: i64, name: &str) -> Result<Option<User>, RepositoryError>;

    /// Delete a user and its roles. `false` if no such user.
    async fn delete(&self, msrl: i64) -> Result<bool, RepositoryError>;
}
