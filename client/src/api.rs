//! HTTP seams to the backend.
//!
//! The session manager and search controller talk to these traits; tests
//! substitute fakes, production uses the reqwest-backed implementations.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::ClientError;

/// The two session calls the manager makes on its own: renewal and logout.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a refresh token for a new access token.
    async fn renew(&self, refresh_token: &str) -> Result<String, ClientError>;

    /// Revoke a refresh token server-side.
    async fn logout(&self, refresh_token: &str) -> Result<(), ClientError>;
}

/// Book search, used by the cancellation-aware search controller.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Value, ClientError>;
}

#[derive(Debug, Deserialize)]
struct RenewResponse {
    accesstoken: String,
}

/// reqwest-backed implementation of both API seams.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpApi {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn renew(&self, refresh_token: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .json(&json!({ "token": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Rejected(format!(
                "renewal returned {}",
                response.status()
            )));
        }

        Ok(response.json::<RenewResponse>().await?.accesstoken)
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ClientError> {
        self.http
            .delete(format!("{}/logout", self.base_url))
            .json(&json!({ "token": refresh_token }))
            .send()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SearchApi for HttpApi {
    async fn search(&self, query: &str) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/books/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Rejected(format!(
                "search returned {}",
                response.status()
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}
