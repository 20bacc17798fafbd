use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orb_core::store::{DocumentStore, RestDocumentStore};

async fn mock_store() -> (MockServer, RestDocumentStore) {
    let server = MockServer::start().await;
    let store = RestDocumentStore::new(server.uri(), None);
    (server, store)
}

#[tokio::test]
async fn test_get_missing_document_is_none() {
    let (server, store) = mock_store().await;

    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let doc = store.get("users", "u1").await.unwrap();
    assert!(doc.is_none());
}

#[tokio::test]
async fn test_get_document() {
    let (server, store) = mock_store().await;

    Mock::given(method("GET"))
        .and(path("/recipes/52771"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "52771",
            "doc": { "likes": ["u1", "u2"] }
        })))
        .mount(&server)
        .await;

    let doc = store.get("recipes", "52771").await.unwrap().unwrap();
    assert_eq!(doc["likes"][1], "u2");
}

#[tokio::test]
async fn test_set_sends_merge_flag_and_body() {
    let (server, store) = mock_store().await;

    Mock::given(method("PUT"))
        .and(path("/users/u1"))
        .and(query_param("merge", "true"))
        .and(body_json(json!({ "planner": {} })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    store
        .set("users", "u1", json!({ "planner": {} }), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_returns_assigned_id() {
    let (server, store) = mock_store().await;

    Mock::given(method("POST"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "c-42" })))
        .mount(&server)
        .await;

    let id = store
        .add("comments", json!({ "comment": "tasty" }))
        .await
        .unwrap();
    assert_eq!(id, "c-42");
}

#[tokio::test]
async fn test_list_collection() {
    let (server, store) = mock_store().await;

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                { "id": "1", "doc": { "likes": ["u1"] } },
                { "id": "2", "doc": { "likes": [] } }
            ]
        })))
        .mount(&server)
        .await;

    let documents = store.list("recipes").await.unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].id, "1");
}

#[tokio::test]
async fn test_api_key_sent_as_bearer_token() {
    let server = MockServer::start().await;
    let store = RestDocumentStore::new(server.uri(), Some("sekrit".to_string()));

    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(header("authorization", "Bearer sekrit"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    store.get("users", "u1").await.unwrap();
}

#[tokio::test]
async fn test_server_error_surfaces_as_store_error() {
    let (server, store) = mock_store().await;

    Mock::given(method("PUT"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let result = store.set("users", "u1", json!({}), false).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("503"));
}
