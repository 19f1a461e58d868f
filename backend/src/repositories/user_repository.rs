//! Database repository for user management operations.

use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::UserStore;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// SQLite-backed implementation of [`UserStore`].
///
/// Username uniqueness comes from the UNIQUE constraint on `users.name`, so
/// concurrent duplicate registrations are serialized by the database itself.
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, name: &str, password_hash: &str) -> ServiceResult<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, password)
            VALUES (?, ?)
            RETURNING id, name, password
            "#,
        )
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ServiceError::already_exists("User", name))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, password FROM users WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
