//! Persistent entity models.
//!
//! Row types returned by the repositories. Password hashes stay inside this
//! module's `User`; anything leaving the API boundary goes through
//! `PublicUser`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user. The `password` column holds the bcrypt hash, never the
/// plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub password: String,
}

/// User fields safe to return to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            name: user.name,
        }
    }
}

/// A saved reading-list entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ReadingListEntry {
    pub user_id: i64,
    pub book_id: String,
}
