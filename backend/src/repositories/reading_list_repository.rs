//! Database repository for reading-list entries.

use crate::database::models::ReadingListEntry;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::ReadingListStore;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// SQLite-backed implementation of [`ReadingListStore`].
///
/// The UNIQUE constraint on `(user_id, book_id)` surfaces duplicate saves as
/// `AlreadyExists`, which the API layer turns into 409.
pub struct ReadingListRepository {
    pool: SqlitePool,
}

impl ReadingListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingListStore for ReadingListRepository {
    async fn add(&self, user_id: i64, book_id: &str) -> ServiceResult<()> {
        let result = sqlx::query("INSERT INTO reading_list (user_id, book_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ServiceError::already_exists("Reading list entry", book_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self, user_id: i64) -> ServiceResult<Vec<ReadingListEntry>> {
        let entries = sqlx::query_as::<_, ReadingListEntry>(
            "SELECT user_id, book_id FROM reading_list WHERE user_id = ? ORDER BY added_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn remove(&self, user_id: i64, book_id: &str) -> ServiceResult<bool> {
        let result = sqlx::query("DELETE FROM reading_list WHERE user_id = ? AND book_id = ?")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
