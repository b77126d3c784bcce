//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{RepositoryError, UserRepository};
use crate::models::user::{NewUser, User};

/// Users joined with their ordered roles.
const SELECT_USERS: &str = "SELECT u.msrl, u.uid, u.name, u.password, \
     COALESCE(array_agg(r.role ORDER BY r.position) FILTER (WHERE r.role IS NOT NULL), \
              ARRAY[]::text[]) AS roles \
     FROM users u \
     LEFT JOIN user_roles r ON r.user_msrl = u.msrl";

type UserRow = (i64, String, String, String, Vec<String>);

fn into_user((msrl, uid, name, password, roles): UserRow) -> User {
    User {
        msrl,
        uid,
        name,
        password,
        roles,
    }
}

/// User repository over a `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, msrl: i64) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USERS} WHERE u.msrl = $1 GROUP BY u.msrl"
        ))
        .bind(msrl)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(into_user))
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USERS} WHERE u.uid = $1 GROUP BY u.msrl"
        ))
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(into_user))
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USERS} GROUP BY u.msrl ORDER BY u.msrl"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(into_user).collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let msrl = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (uid, name, password) VALUES ($1, $2, $3) RETURNING msrl",
        )
        .bind(&user.uid)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::DuplicateUid(user.uid.clone())
            }
            other => RepositoryError::Db(other),
        })?;

        for (position, role) in user.roles.iter().enumerate() {
            sqlx::query("INSERT INTO user_roles (user_msrl, position, role) VALUES ($1, $2, $3)")
                .bind(msrl)
                .bind(position as i32)
                .bind(role)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(User {
            msrl,
            uid: user.uid,
            name: user.name,
            password: user.password_hash,
            roles: user.roles,
        })
    }

    async fn update_name(&self, msrl: i64, name: &str) -> Result<Option<User>, RepositoryError> {
        let updated = sqlx::query("UPDATE users SET name = $2 WHERE msrl = $1")
            .bind(msrl)
            .bind(name)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if updated == 0 {
            return Ok(None);
        }
        self.find_by_id(msrl).await
    }

    async fn delete(&self, msrl: i64) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM users WHERE msrl = $1")
            .bind(msrl)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
