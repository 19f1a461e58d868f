//! In-memory store implementations.
//!
//! Mutex-backed counterparts to the SQLite repositories, used by the service
//! tests. Insert-if-absent happens entirely under the lock, so the uniqueness
//! guarantees match the database implementations.

use crate::database::models::{ReadingListEntry, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::{ReadingListStore, RefreshTokenStore, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct UserTable {
    by_name: HashMap<String, User>,
    next_id: i64,
}

/// In-memory implementation of [`UserStore`].
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: Mutex<UserTable>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, name: &str, password_hash: &str) -> ServiceResult<User> {
        let mut table = self.inner.lock().unwrap();
        if table.by_name.contains_key(name) {
            return Err(ServiceError::already_exists("User", name));
        }

        table.next_id += 1;
        let user = User {
            id: table.next_id,
            name: name.to_string(),
            password: password_hash.to_string(),
        };
        table.by_name.insert(name.to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<User>> {
        Ok(self.inner.lock().unwrap().by_name.get(name).cloned())
    }
}

/// In-memory implementation of [`RefreshTokenStore`].
#[derive(Default)]
pub struct InMemoryTokenStore {
    inner: Mutex<HashMap<String, i64>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryTokenStore {
    async fn insert(&self, token: &str, user_id: i64) -> ServiceResult<()> {
        let mut tokens = self.inner.lock().unwrap();
        if tokens.contains_key(token) {
            return Err(ServiceError::already_exists("Refresh token", token));
        }
        tokens.insert(token.to_string(), user_id);
        Ok(())
    }

    async fn exists(&self, token: &str) -> ServiceResult<bool> {
        Ok(self.inner.lock().unwrap().contains_key(token))
    }

    async fn delete(&self, token: &str) -> ServiceResult<()> {
        self.inner.lock().unwrap().remove(token);
        Ok(())
    }
}

/// In-memory implementation of [`ReadingListStore`]. A `Vec` rather than a
/// set, so `list` returns entries in insertion order like the SQLite
/// repository does.
#[derive(Default)]
pub struct InMemoryReadingListStore {
    inner: Mutex<Vec<(i64, String)>>,
}

impl InMemoryReadingListStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadingListStore for InMemoryReadingListStore {
    async fn add(&self, user_id: i64, book_id: &str) -> ServiceResult<()> {
        let mut entries = self.inner.lock().unwrap();
        if entries
            .iter()
            .any(|(id, book)| *id == user_id && book == book_id)
        {
            return Err(ServiceError::already_exists("Reading list entry", book_id));
        }
        entries.push((user_id, book_id.to_string()));
        Ok(())
    }

    async fn list(&self, user_id: i64) -> ServiceResult<Vec<ReadingListEntry>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(id, book_id)| ReadingListEntry {
                user_id: *id,
                book_id: book_id.clone(),
            })
            .collect())
    }

    async fn remove(&self, user_id: i64, book_id: &str) -> ServiceResult<bool> {
        let mut entries = self.inner.lock().unwrap();
        let before = entries.len();
        entries.retain(|(id, book)| !(*id == user_id && book == book_id));
        Ok(entries.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reading_list_preserves_insertion_order() {
        let store = InMemoryReadingListStore::new();
        store.add(1, "OL27448W").await.unwrap();
        store.add(1, "OL45804W").await.unwrap();

        let books: Vec<String> = store
            .list(1)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.book_id)
            .collect();
        assert_eq!(books, vec!["OL27448W", "OL45804W"]);
    }

    #[tokio::test]
    async fn duplicate_reading_list_entry_conflicts() {
        let store = InMemoryReadingListStore::new();
        store.add(1, "OL45804W").await.unwrap();

        let err = store.add(1, "OL45804W").await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));

        // The same book under a different user is a distinct entry.
        store.add(2, "OL45804W").await.unwrap();
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let store = InMemoryReadingListStore::new();
        store.add(1, "OL45804W").await.unwrap();

        assert!(store.remove(1, "OL45804W").await.unwrap());
        assert!(!store.remove(1, "OL45804W").await.unwrap());
        assert!(store.list(1).await.unwrap().is_empty());
    }
}
