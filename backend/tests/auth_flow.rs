//! End-to-end tests over the HTTP surface.
//!
//! Each test spawns the real router on a random local port with an in-memory
//! SQLite database and drives it with reqwest.

use backend::config::Config;
use backend::state::AppState;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;

struct TestApp {
    address: String,
    client: reqwest::Client,
}

fn test_config(access_ttl_seconds: u64) -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        access_token_secret: "test-access-secret".into(),
        refresh_token_secret: "test-refresh-secret".into(),
        access_token_ttl_seconds: access_ttl_seconds,
        server_port: 0,
        openlibrary_base_url: "http://127.0.0.1:1".into(),
        nyt_base_url: "http://127.0.0.1:1".into(),
        nyt_api_key: String::new(),
    }
}

async fn spawn_app(access_ttl_seconds: u64) -> TestApp {
    let config = test_config(access_ttl_seconds);

    // A single connection keeps the in-memory database alive and shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate the database");

    let state = AppState::new(pool, &config).expect("Failed to build app state");
    let app = backend::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    async fn register(&self, name: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/register", self.address))
            .json(&json!({ "name": name, "password": password }))
            .send()
            .await
            .expect("register request failed")
    }

    async fn login(&self, name: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/login", self.address))
            .json(&json!({ "name": name, "password": password }))
            .send()
            .await
            .expect("login request failed")
    }

    async fn renew(&self, token: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/token", self.address))
            .json(&json!({ "token": token }))
            .send()
            .await
            .expect("renew request failed")
    }

    async fn logout(&self, token: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/logout", self.address))
            .json(&json!({ "token": token }))
            .send()
            .await
            .expect("logout request failed")
    }

    async fn reading_list(&self, access_token: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/reading-list", self.address))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("reading-list request failed")
    }
}

async fn login_tokens(app: &TestApp, name: &str, password: &str) -> (String, String) {
    let body: Value = app.login(name, password).await.json().await.unwrap();
    (
        body["accesstoken"].as_str().unwrap().to_string(),
        body["refreshtoken"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn register_returns_201_and_never_echoes_the_password() {
    let app = spawn_app(900).await;

    let response = app.register("alice", "pw123").await;
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "alice");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn duplicate_registration_returns_409() {
    let app = spawn_app(900).await;

    assert_eq!(app.register("alice", "pw123").await.status(), 201);
    assert_eq!(app.register("alice", "other").await.status(), 409);
}

#[tokio::test]
async fn login_returns_both_tokens() {
    let app = spawn_app(900).await;
    app.register("alice", "pw123").await;

    let response = app.login("alice", "pw123").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert!(body["accesstoken"].is_string());
    assert!(body["refreshtoken"].is_string());
}

#[tokio::test]
async fn login_rejects_unknown_user_and_bad_password() {
    let app = spawn_app(900).await;
    app.register("alice", "pw123").await;

    assert_eq!(app.login("nobody", "pw123").await.status(), 400);
    assert_eq!(app.login("alice", "wrong").await.status(), 401);
}

#[tokio::test]
async fn protected_route_requires_a_bearer_token() {
    let app = spawn_app(900).await;

    let response = app
        .client
        .get(format!("{}/reading-list", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = app.reading_list("definitely-not-a-jwt").await;
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn expired_access_token_is_rejected_and_renewal_recovers() {
    // Aggressively short access TTL to exercise the renewal path.
    let app = spawn_app(1).await;
    app.register("alice", "pw123").await;
    let (access, refresh) = login_tokens(&app, "alice", "pw123").await;

    assert_eq!(app.reading_list(&access).await.status(), 200);

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
    assert_eq!(app.reading_list(&access).await.status(), 403);

    let response = app.renew(&json!(refresh)).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let new_access = body["accesstoken"].as_str().unwrap();

    assert_eq!(app.reading_list(new_access).await.status(), 200);
}

#[tokio::test]
async fn renewal_requires_a_token() {
    let app = spawn_app(900).await;
    assert_eq!(app.renew(&Value::Null).await.status(), 401);
}

#[tokio::test]
async fn renewal_rejects_an_unknown_token() {
    let app = spawn_app(900).await;
    assert_eq!(app.renew(&json!("made-up-token")).await.status(), 403);
    // The empty string is supplied-but-unknown, not missing.
    assert_eq!(app.renew(&json!("")).await.status(), 403);
}

#[tokio::test]
async fn logout_revokes_the_refresh_token_and_is_idempotent() {
    let app = spawn_app(900).await;
    app.register("alice", "pw123").await;
    let (_, refresh) = login_tokens(&app, "alice", "pw123").await;

    assert_eq!(app.logout(&refresh).await.status(), 204);
    // Signature and expiry would still pass; store membership is gone.
    assert_eq!(app.renew(&json!(refresh.clone())).await.status(), 403);
    // Deleting an absent token is not an error.
    assert_eq!(app.logout(&refresh).await.status(), 204);
}

#[tokio::test]
async fn reading_list_round_trip() {
    let app = spawn_app(900).await;
    app.register("alice", "pw123").await;
    let (access, _) = login_tokens(&app, "alice", "pw123").await;

    let add = |book_id: &str| {
        let app = &app;
        let access = access.clone();
        let book_id = book_id.to_string();
        async move {
            app.client
                .post(format!("{}/add-to-reading-list", app.address))
                .bearer_auth(access)
                .json(&json!({ "book_id": book_id }))
                .send()
                .await
                .unwrap()
        }
    };

    assert_eq!(add("OL45804W").await.status(), 201);
    assert_eq!(add("OL27448W").await.status(), 201);
    // Duplicate save conflicts.
    assert_eq!(add("OL45804W").await.status(), 409);

    let body: Value = app.reading_list(&access).await.json().await.unwrap();
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 2);

    let response = app
        .client
        .delete(format!("{}/reading-list/OL45804W", app.address))
        .bearer_auth(&access)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = app
        .client
        .delete(format!("{}/reading-list/OL45804W", app.address))
        .bearer_auth(&access)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn reading_lists_are_scoped_per_user() {
    let app = spawn_app(900).await;
    app.register("alice", "pw123").await;
    app.register("bob", "pw456").await;
    let (alice_access, _) = login_tokens(&app, "alice", "pw123").await;
    let (bob_access, _) = login_tokens(&app, "bob", "pw456").await;

    let response = app
        .client
        .post(format!("{}/add-to-reading-list", app.address))
        .bearer_auth(&alice_access)
        .json(&json!({ "book_id": "OL45804W" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: Value = app.reading_list(&bob_access).await.json().await.unwrap();
    assert_eq!(body["books"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn cache_admin_routes() {
    let app = spawn_app(900).await;

    let response = app
        .client
        .delete(format!("{}/cache/absent-key", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = app
        .client
        .delete(format!("{}/cache", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}
