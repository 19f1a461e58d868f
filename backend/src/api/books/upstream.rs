//! HTTP client for the Open Library and New York Times book APIs.
//!
//! Upstream payloads are passed through as opaque JSON; the routes that call
//! these methods memoize the results in the response cache.

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use serde_json::Value;

/// Thin reqwest wrapper over the two upstream book APIs.
pub struct BookClient {
    http: reqwest::Client,
    openlibrary_base_url: String,
    nyt_base_url: String,
    nyt_api_key: String,
}

impl BookClient {
    pub fn new(config: &Config) -> Self {
        BookClient {
            http: reqwest::Client::new(),
            openlibrary_base_url: config.openlibrary_base_url.clone(),
            nyt_base_url: config.nyt_base_url.clone(),
            nyt_api_key: config.nyt_api_key.clone(),
        }
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> ServiceResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::external_service(format!("Upstream request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::external_service(format!(
                "Upstream returned {}",
                response.status()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ServiceError::external_service(format!("Bad upstream payload: {}", e)))
    }

    /// Full-text book search.
    pub async fn search(&self, query: &str) -> ServiceResult<Value> {
        let request = self
            .http
            .get(format!("{}/search.json", self.openlibrary_base_url))
            .query(&[("q", query)]);
        self.get_json(request).await
    }

    /// A single work by its Open Library id (e.g. `OL45804W`).
    pub async fn work(&self, work_id: &str) -> ServiceResult<Value> {
        self.get_json(self.http.get(self.work_url(work_id))).await
    }

    /// An author by their Open Library id.
    pub async fn author(&self, author_id: &str) -> ServiceResult<Value> {
        self.get_json(self.http.get(self.author_url(author_id))).await
    }

    /// Works under a subject (category pages).
    pub async fn subject(&self, subject: &str) -> ServiceResult<Value> {
        self.get_json(self.http.get(self.subject_url(subject))).await
    }

    /// Current NYT hardcover-fiction bestseller list.
    pub async fn bestsellers(&self) -> ServiceResult<Value> {
        let request = self
            .http
            .get(format!(
                "{}/lists/current/hardcover-fiction.json",
                self.nyt_base_url
            ))
            .query(&[("api-key", self.nyt_api_key.as_str())]);
        self.get_json(request).await
    }

    // Path segments use percent-encoding proper; a `+` in a path is a literal
    // plus, not a space.
    fn work_url(&self, work_id: &str) -> String {
        format!(
            "{}/works/{}.json",
            self.openlibrary_base_url,
            urlencoding::encode(work_id)
        )
    }

    fn author_url(&self, author_id: &str) -> String {
        format!(
            "{}/authors/{}.json",
            self.openlibrary_base_url,
            urlencoding::encode(author_id)
        )
    }

    fn subject_url(&self, subject: &str) -> String {
        format!(
            "{}/subjects/{}.json",
            self.openlibrary_base_url,
            urlencoding::encode(subject)
        )
    }
}
