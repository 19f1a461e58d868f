//! Database repository for refresh token storage.
//!
//! A refresh token is honored for renewal only while its row exists; deleting
//! the row is the revocation mechanism.

use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::RefreshTokenStore;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// SQLite-backed implementation of [`RefreshTokenStore`].
pub struct TokenRepository {
    pool: SqlitePool,
}

impl TokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for TokenRepository {
    async fn insert(&self, token: &str, user_id: i64) -> ServiceResult<()> {
        let result = sqlx::query("INSERT INTO refresh_tokens (token, user_id) VALUES (?, ?)")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ServiceError::already_exists("Refresh token", token))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(&self, token: &str) -> ServiceResult<bool> {
        let row = sqlx::query("SELECT token FROM refresh_tokens WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn delete(&self, token: &str) -> ServiceResult<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
