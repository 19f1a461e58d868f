//! Storage abstractions and their implementations.
//!
//! The session controller and reading-list handlers talk to these traits, not
//! to sqlx directly. Production wires in the SQLite repositories; service
//! tests use the in-memory stores. Uniqueness is enforced atomically by the
//! backing store (insert-if-absent), not by locks in the callers.

use crate::database::models::{ReadingListEntry, User};
use crate::errors::ServiceResult;
use async_trait::async_trait;

pub mod memory;
pub mod reading_list_repository;
pub mod token_repository;
pub mod user_repository;

/// Durable mapping from username to password hash.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user. Fails with `AlreadyExists` if the name is taken;
    /// concurrent duplicate creates must yield exactly one success.
    async fn create(&self, name: &str, password_hash: &str) -> ServiceResult<User>;

    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<User>>;
}

/// Durable set of currently-valid refresh tokens.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Stores a token for a user. Fails with `AlreadyExists` on a duplicate
    /// token value (practically unreachable given token randomness).
    async fn insert(&self, token: &str, user_id: i64) -> ServiceResult<()>;

    async fn exists(&self, token: &str) -> ServiceResult<bool>;

    /// Removes a token. Deleting an absent token is not an error.
    async fn delete(&self, token: &str) -> ServiceResult<()>;
}

/// Per-user saved books.
#[async_trait]
pub trait ReadingListStore: Send + Sync {
    /// Saves a book for a user. Fails with `AlreadyExists` if the pair is
    /// already saved.
    async fn add(&self, user_id: i64, book_id: &str) -> ServiceResult<()>;

    async fn list(&self, user_id: i64) -> ServiceResult<Vec<ReadingListEntry>>;

    /// Removes a saved book, returning whether it was present.
    async fn remove(&self, user_id: i64, book_id: &str) -> ServiceResult<bool>;
}
