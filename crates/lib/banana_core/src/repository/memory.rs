//! In-process user repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepositoryError, UserRepository};
use crate::models::user::{NewUser, User};

#[derive(Debug, Default)]
struct Store {
    last_msrl: i64,
    users: BTreeMap<i64, User>,
}

/// Repository holding users in memory; contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a user's roles. Returns `false` if no such user.
    pub async fn set_roles(&self, msrl: i64, roles: Vec<String>) -> bool {
        match self.store.write().await.users.get_mut(&msrl) {
            Some(user) => {
                user.roles = roles;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, msrl: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.read().await.users.get(&msrl).cloned())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.uid == uid).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.store.read().await.users.values().cloned().collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut store = self.store.write().await;
        if store.users.values().any(|u| u.uid == user.uid) {
            return Err(RepositoryError::DuplicateUid(user.uid));
        }

        // Ids are never reused, even after deletes.
        store.last_msrl += 1;
        let stored = User {
            msrl: store.last_msrl,
            uid: user.uid,
            name: user.name,
            password: user.password_hash,
            roles: user.roles,
        };
        store.users.insert(stored.msrl, stored.clone());
        Ok(stored)
    }

    async fn update_name(&self, msrl: i64, name: &str) -> Result<Option<User>, RepositoryError> {
        let mut store = self.store.write().await;
        Ok(store.users.get_mut(&msrl).map(|user| {
            user.name = name.to_string();
            user.clone()
        }))
    }

    async fn delete(&self, msrl: i64) -> Result<bool, RepositoryError> {
        Ok(self.store.write().await.users.remove(&msrl).is_some())
    }
}
