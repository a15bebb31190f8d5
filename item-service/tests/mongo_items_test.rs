//! End-to-end tests against a live MongoDB (`MONGODB_URI`, default
//! `mongodb://localhost:27017`). Run with `cargo test -- --ignored`.

mod common;

use common::TestApp;
use item_service::config::MongoConfig;
use item_service::services::MongoDb;
use mongodb::bson::doc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::collections::HashSet;

async fn create(client: &Client, app: &TestApp, body: Value) -> String {
    let response = client
        .post(format!("{}/items", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    body["inserted_id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "Requires MongoDB at MONGODB_URI"]
async fn widget_lifecycle_against_mongodb() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create(
        &client,
        &app,
        json!({ "name": "widget", "description": "a test widget" }),
    )
    .await;

    let response = client
        .get(format!("{}/items/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "id": id, "name": "widget", "description": "a test widget" })
    );

    let response = client
        .delete(format!("{}/items/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["deleted_count"], 1);

    let response = client
        .get(format!("{}/items/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at MONGODB_URI"]
async fn partial_update_preserves_other_fields_in_storage() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let id = create(
        &client,
        &app,
        json!({ "name": "widget", "description": "a test widget" }),
    )
    .await;

    let response = client
        .put(format!("{}/items/{}", app.address, id))
        .json(&json!({ "name": "gadget" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "matched_count": 1, "modified_count": 1 }));

    let stored = app
        .db
        .items()
        .find_one(
            doc! { "_id": mongodb::bson::oid::ObjectId::parse_str(&id).unwrap() },
            None,
        )
        .await
        .unwrap()
        .expect("item missing from storage");
    assert_eq!(stored.name.as_deref(), Some("gadget"));
    assert_eq!(stored.description.as_deref(), Some("a test widget"));

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at MONGODB_URI"]
async fn list_returns_all_created_items() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let mut created = HashSet::new();
    for i in 0..4 {
        created.insert(create(&client, &app, json!({ "name": format!("item-{}", i) })).await);
    }

    let body: Value = client
        .get(format!("{}/items", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    let listed: HashSet<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, created);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at MONGODB_URI"]
async fn bad_create_body_leaves_collection_empty() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/items", app.address))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let count = app.db.items().count_documents(None, None).await.unwrap();
    assert_eq!(count, 0);

    app.cleanup().await;
}

#[tokio::test]
async fn connect_fails_fast_when_database_is_unreachable() {
    let config = MongoConfig {
        // Nothing listens on port 1
        uri: "mongodb://127.0.0.1:1/?connectTimeoutMS=200".to_string(),
        database: "unreachable".to_string(),
        collection: "items".to_string(),
        connect_timeout_secs: 1,
    };

    let started = std::time::Instant::now();
    let result = MongoDb::connect(&config).await;

    assert!(result.is_err());
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}

#[tokio::test]
async fn srv_lookup_is_bounded_by_connect_timeout() {
    let config = MongoConfig {
        // SRV resolution happens while parsing the URI; `.invalid` never resolves
        uri: "mongodb+srv://item-service-test.invalid/".to_string(),
        database: "unreachable".to_string(),
        collection: "items".to_string(),
        connect_timeout_secs: 1,
    };

    let started = std::time::Instant::now();
    let err = MongoDb::connect(&config).await.err().expect("connect should fail");

    assert_eq!(
        err.status_code(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}
