mod common;

use axum::http::header;
use axum_test::TestServer;
use serde_json::json;
use tinylink::api::routes::routes;

#[tokio::test]
async fn test_redirect_success() {
    let store = common::memory_store().await;
    common::create_test_mapping(&store, "https://example.com/target", "aB3xY9").await;
    let server = TestServer::new(routes().with_state(common::create_test_state(store))).unwrap();

    let response = server.get("/aB3xY9").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header(header::LOCATION), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let store = common::memory_store().await;
    let server = TestServer::new(routes().with_state(common::create_test_state(store))).unwrap();

    let response = server.get("/ZZZZZZ").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["short_code"], "ZZZZZZ");
}

#[tokio::test]
async fn test_redirect_malformed_code_not_found() {
    let store = common::memory_store().await;
    let server = TestServer::new(routes().with_state(common::create_test_state(store))).unwrap();

    let response = server.get("/not-a-code").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_shorten_then_redirect() {
    let store = common::memory_store().await;
    let server = TestServer::new(routes().with_state(common::create_test_state(store))).unwrap();

    let created = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/docs?page=2" }))
        .await
        .json::<serde_json::Value>();
    let code = created["short_code"].as_str().unwrap();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(
        response.header(header::LOCATION),
        "https://example.com/docs?page=2"
    );
}
