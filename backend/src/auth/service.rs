//! Core business logic for the authentication system.
//!
//! The session controller: registration, login, access-token renewal, and
//! logout. It is storage-agnostic; the stores are injected as trait objects
//! so tests can run against the in-memory implementations.
//!
//! A refresh token is honored for renewal only if it verifies
//! cryptographically AND is still present in the refresh token store.
//! Logout deletes the stored row, which revokes the token immediately even
//! though its signature would otherwise still be accepted.

use std::sync::Arc;

use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest, TokenResponse};
use crate::database::models::PublicUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::{RefreshTokenStore, UserStore};
use crate::utils::jwt::TokenIssuer;
use crate::utils::password::{hash_password, verify_password};
use validator::Validate;

/// Authentication service orchestrating the stores, the password hasher, and
/// the token issuer.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn RefreshTokenStore>,
    issuer: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn RefreshTokenStore>,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        AuthService {
            users,
            tokens,
            issuer,
        }
    }

    /// Register a new user. Fails with `AlreadyExists` if the name is taken;
    /// the duplicate check is atomic in the store, so concurrent registrations
    /// of the same name produce exactly one success.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<PublicUser> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(validation_errors.to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self.users.create(&request.name, &password_hash).await?;

        tracing::info!(user = %user.name, id = user.id, "registered user");
        Ok(user.into())
    }

    /// Authenticate a user and mint an access/refresh token pair.
    ///
    /// Both tokens are minted before the refresh token is persisted, so a
    /// signing failure can never leave an orphaned store row with no token
    /// delivered to the client.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(validation_errors.to_string()));
        }

        let user = self
            .users
            .find_by_name(&request.name)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &request.name))?;

        if !verify_password(&request.password, &user.password)? {
            return Err(ServiceError::unauthorized("Bad credentials"));
        }

        let accesstoken = self.issuer.issue_access(user.id, &user.name)?;
        let refreshtoken = self.issuer.issue_refresh(user.id, &user.name)?;
        self.tokens.insert(&refreshtoken, user.id).await?;

        tracing::info!(user = %user.name, "login succeeded");
        Ok(LoginResponse {
            accesstoken,
            refreshtoken,
        })
    }

    /// Exchange a refresh token for a new access token. The refresh token is
    /// reused, not rotated.
    pub async fn renew(&self, token: Option<&str>) -> ServiceResult<TokenResponse> {
        // Only an absent token is "missing" (401). A supplied token that the
        // store does not hold, the empty string included, is rejected (403).
        let token = token.ok_or_else(|| ServiceError::unauthorized("Refresh token missing"))?;

        if !self.tokens.exists(token).await? {
            return Err(ServiceError::forbidden("Unknown refresh token"));
        }

        let claims = self
            .issuer
            .verify_refresh(token)
            .map_err(|err| ServiceError::forbidden(err.to_string()))?;

        let accesstoken = self.issuer.issue_access(claims.sub, &claims.name)?;
        tracing::debug!(user = %claims.name, "renewed access token");
        Ok(TokenResponse { accesstoken })
    }

    /// Revoke a refresh token by deleting it from the store. Idempotent:
    /// deleting an absent token succeeds the same way.
    pub async fn logout(&self, token: Option<&str>) -> ServiceResult<()> {
        if let Some(token) = token {
            self.tokens.delete(token).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::repositories::memory::{InMemoryTokenStore, InMemoryUserStore};

    fn test_issuer() -> Arc<TokenIssuer> {
        let config = Config {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            access_token_secret: "access-secret".into(),
            refresh_token_secret: "refresh-secret".into(),
            access_token_ttl_seconds: 900,
            server_port: 0,
            openlibrary_base_url: String::new(),
            nyt_base_url: String::new(),
            nyt_api_key: String::new(),
        };
        Arc::new(TokenIssuer::new(&config).unwrap())
    }

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryTokenStore::new()),
            test_issuer(),
        )
    }

    fn register_request(name: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            password: password.into(),
        }
    }

    fn login_request(name: &str, password: &str) -> LoginRequest {
        LoginRequest {
            name: name.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn register_succeeds_once_and_conflicts_after() {
        let service = service();

        let user = service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();
        assert_eq!(user.name, "alice");

        let err = service
            .register(register_request("alice", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_plaintext() {
        let users = Arc::new(InMemoryUserStore::new());
        let service = AuthService::new(
            users.clone(),
            Arc::new(InMemoryTokenStore::new()),
            test_issuer(),
        );

        service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();

        let stored = users.find_by_name("alice").await.unwrap().unwrap();
        assert_ne!(stored.password, "pw123");
    }

    #[tokio::test]
    async fn login_issues_both_tokens_for_valid_credentials() {
        let service = service();
        service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();

        let response = service.login(login_request("alice", "pw123")).await.unwrap();
        assert!(!response.accesstoken.is_empty());
        assert!(!response.refreshtoken.is_empty());
        assert_ne!(response.accesstoken, response.refreshtoken);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let service = service();
        service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();

        let err = service
            .login(login_request("alice", "pw124"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn login_rejects_blank_credentials_before_the_store() {
        let service = service();
        service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();

        let err = service.login(login_request("", "pw123")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));

        let err = service.login(login_request("alice", "")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn login_rejects_unknown_user() {
        let service = service();
        let err = service
            .login(login_request("nobody", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn renew_requires_a_token() {
        let service = service();
        let err = service.renew(None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn renew_rejects_an_empty_token_as_unknown() {
        // "" is a supplied token, just not one the store holds.
        let service = service();
        let err = service.renew(Some("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn renew_rejects_a_token_that_was_never_stored() {
        let service = service();
        // Correctly signed, but never persisted: store membership is half of
        // the validity conjunction.
        let token = test_issuer().issue_refresh(1, "alice").unwrap();
        let err = service.renew(Some(&token)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn renew_returns_a_fresh_access_token() {
        let service = service();
        service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();
        let login = service.login(login_request("alice", "pw123")).await.unwrap();

        let renewed = service.renew(Some(&login.refreshtoken)).await.unwrap();
        assert!(!renewed.accesstoken.is_empty());
    }

    #[tokio::test]
    async fn logout_revokes_the_refresh_token() {
        let service = service();
        service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();
        let login = service.login(login_request("alice", "pw123")).await.unwrap();

        service.logout(Some(&login.refreshtoken)).await.unwrap();

        // The signature would still pass, but the store row is gone.
        let err = service
            .renew(Some(&login.refreshtoken))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let service = service();
        service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();
        let login = service.login(login_request("alice", "pw123")).await.unwrap();

        service.logout(Some(&login.refreshtoken)).await.unwrap();
        service.logout(Some(&login.refreshtoken)).await.unwrap();
        service.logout(None).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_duplicate_registration_yields_one_success() {
        let service = Arc::new(service());

        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.register(register_request("bob", "pw1")).await })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.register(register_request("bob", "pw2")).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(ServiceError::AlreadyExists { .. })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);
    }

    #[tokio::test]
    async fn multiple_logins_coexist() {
        let service = service();
        service
            .register(register_request("alice", "pw123"))
            .await
            .unwrap();

        let first = service.login(login_request("alice", "pw123")).await.unwrap();
        let second = service.login(login_request("alice", "pw123")).await.unwrap();

        // Each login stores its own refresh token; revoking one leaves the
        // other valid.
        service.logout(Some(&first.refreshtoken)).await.unwrap();
        assert!(service.renew(Some(&second.refreshtoken)).await.is_ok());
    }
}
