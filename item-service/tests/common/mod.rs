#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use item_service::config::ItemConfig;
use item_service::services::{MockItemStore, MongoDb};
use item_service::startup::{build_router, AppState, Application};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Router over an in-memory store; the store handle is returned so tests can
/// inspect what reached storage.
pub fn mock_app() -> (Router, Arc<MockItemStore>) {
    mock_app_with(MockItemStore::new(), REQUEST_TIMEOUT)
}

pub fn mock_app_with(
    store: MockItemStore,
    request_timeout: Duration,
) -> (Router, Arc<MockItemStore>) {
    let store = Arc::new(store);
    let state = AppState::new(store.clone(), request_timeout);
    (build_router(state), store)
}

/// Send one request through the router and decode the JSON body, if any.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

pub async fn create(app: &Router, body: &str) -> String {
    let (status, json) = send(app, Method::POST, "/items", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", json);
    json["inserted_id"]
        .as_str()
        .expect("inserted_id missing")
        .to_string()
}

/// Full application against a live MongoDB on a random port and a throwaway
/// database.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        if std::env::var("MONGODB_URI").is_err() {
            std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        }

        let db_name = format!("item_test_{}", Uuid::new_v4());

        let mut config = ItemConfig::load().expect("Failed to load configuration");
        config.common.host = std::net::Ipv4Addr::LOCALHOST.into();
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
