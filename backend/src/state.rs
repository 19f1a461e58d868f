//! Shared application state injected into every request.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::api::books::upstream::BookClient;
use crate::cache::ResponseCache;
use crate::config::Config;
use crate::errors::ServiceResult;
use crate::repositories::reading_list_repository::ReadingListRepository;
use crate::repositories::token_repository::TokenRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::{ReadingListStore, RefreshTokenStore, UserStore};
use crate::utils::jwt::TokenIssuer;

/// Everything the handlers need, behind cheap Arc clones. The stores are
/// trait objects so tests can swap in the in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<dyn RefreshTokenStore>,
    pub reading_list: Arc<dyn ReadingListStore>,
    pub issuer: Arc<TokenIssuer>,
    pub cache: Arc<ResponseCache>,
    pub books: Arc<BookClient>,
}

impl AppState {
    /// Production wiring: SQLite-backed stores over the given pool.
    ///
    /// Token secrets are checked here, at construction, so a missing secret
    /// stops the server from starting instead of failing the first login.
    pub fn new(pool: SqlitePool, config: &Config) -> ServiceResult<Self> {
        let issuer = Arc::new(TokenIssuer::new(config)?);

        Ok(AppState {
            users: Arc::new(UserRepository::new(pool.clone())),
            tokens: Arc::new(TokenRepository::new(pool.clone())),
            reading_list: Arc::new(ReadingListRepository::new(pool)),
            issuer,
            cache: Arc::new(ResponseCache::new()),
            books: Arc::new(BookClient::new(config)),
        })
    }
}
