//! Integration tests for the APQ query strategy.
//!
//! These tests drive the GET attempt and the single POST fallback against a
//! wiremock server, covering the hash-only path, the persisted-document-id
//! path, and every fallback trigger.

use std::collections::HashMap;

use graphql_apq::{
    ClientConfig, EndpointUrl, GraphqlClient, Operation, PersistedQueryExtension,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_POSTS: &str = "query ListPostIds { posts { id } }";

fn create_client(server: &MockServer, config: ClientConfig) -> GraphqlClient {
    let endpoint = EndpointUrl::new(format!("{}/graphql", server.uri())).unwrap();
    GraphqlClient::new(&endpoint, config)
}

/// The JSON-encoded extensions value the GET URL is expected to carry.
fn expected_extensions_param(document: &str) -> String {
    serde_json::to_string(&PersistedQueryExtension::new(document)).unwrap()
}

fn request_body(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

fn query_params(request: &wiremock::Request) -> HashMap<String, String> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Single-GET Success Paths
// ============================================================================

#[tokio::test]
async fn test_query_resolved_by_hash_issues_single_get() {
    let server = MockServer::start().await;
    let data = json!({ "data": { "posts": [{ "id": "1" }] } });

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .and(query_param("op", "ListPostIds"))
        .and(query_param("extensions", expected_extensions_param(LIST_POSTS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(data.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS).build().unwrap();

    let response = client.execute(&operation, None).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.json().unwrap(), data);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.to_string(), "GET");
}

#[tokio::test]
async fn test_query_with_document_id_resolves_by_id_alone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .and(query_param("op", "ListPostIds"))
        .and(query_param("documentId", "posts-v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "posts": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS)
        .document_id("posts-v1")
        .build()
        .unwrap();

    client.execute(&operation, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    // The server resolves by document id; no hash goes on the wire
    let params = query_params(&requests[0]);
    assert!(!params.contains_key("extensions"));
    assert!(!params.contains_key("query"));
}

#[tokio::test]
async fn test_query_with_document_id_carries_hash_when_always_including_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder().always_include_query(true).build();
    let client = create_client(&server, config);
    let operation = Operation::builder(LIST_POSTS)
        .document_id("posts-v1")
        .build()
        .unwrap();

    client.execute(&operation, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let params = query_params(&requests[0]);
    assert_eq!(
        params.get("extensions"),
        Some(&expected_extensions_param(LIST_POSTS))
    );
    assert_eq!(params.get("documentId"), Some(&"posts-v1".to_string()));
}

#[tokio::test]
async fn test_get_url_carries_json_encoded_variables() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .and(query_param("variables", r#"{"first":10}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS)
        .variables(json!({ "first": 10 }))
        .build()
        .unwrap();

    client.execute(&operation, None).await.unwrap();
}

#[tokio::test]
async fn test_get_strips_content_type_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS).build().unwrap();

    // Caller supplies a Content-Type; the bodyless GET must drop it
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    client.execute(&operation, Some(headers)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0]
        .headers
        .keys()
        .any(|name| name.as_str().eq_ignore_ascii_case("content-type")));
}

// ============================================================================
// Fallback Triggers
// ============================================================================

#[tokio::test]
async fn test_not_found_signal_triggers_post_fallback() {
    let server = MockServer::start().await;
    let data = json!({ "data": { "posts": [{ "id": "1" }] } });

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "errors": [{ "message": "PersistedQueryNotFound" }] }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS)
        .variables(json!({ "first": 10 }))
        .build()
        .unwrap();

    let response = client.execute(&operation, None).await.unwrap();
    assert_eq!(response.json().unwrap(), data);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method.to_string(), "GET");
    assert_eq!(requests[1].method.to_string(), "POST");

    // The fallback registers the query under the same hash
    let body = request_body(&requests[1]);
    assert_eq!(body["query"], LIST_POSTS);
    assert_eq!(body["variables"], json!({ "first": 10 }));
    assert_eq!(
        body["extensions"]["persistedQuery"]["sha256Hash"],
        PersistedQueryExtension::new(LIST_POSTS).sha256_hash()
    );
}

#[tokio::test]
async fn test_not_found_code_in_extensions_triggers_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{
                "message": "Persisted query not found",
                "extensions": { "code": "PERSISTED_QUERY_NOT_FOUND" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS).build().unwrap();

    client.execute(&operation, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_non_2xx_get_triggers_fallback_without_surfacing_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS).build().unwrap();

    // The interim 405 never surfaces; the fallback's 200 is the result
    let response = client.execute(&operation, None).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_document_id_get_failure_falls_back_without_extensions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "errors": [{ "message": "PersistedQueryNotFound" }] }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS)
        .document_id("posts-v1")
        .build()
        .unwrap();

    client.execute(&operation, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    // The GET relied on the document id alone, so the fallback POST
    // carries the full query and the id but no persisted-query hash: the
    // server matches by id and takes the query as authoritative.
    let body = request_body(&requests[1]);
    let map = body.as_object().unwrap();
    assert_eq!(map.get("query").unwrap(), LIST_POSTS);
    assert_eq!(map.get("documentId").unwrap(), "posts-v1");
    assert!(!map.contains_key("extensions"));
}

#[tokio::test]
async fn test_fallback_is_attempted_at_most_once() {
    let server = MockServer::start().await;

    // Both attempts answer not-found; the fallback's response is final
    let not_found = json!({ "errors": [{ "message": "PersistedQueryNotFound" }] });

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_found.clone()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_found.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS).build().unwrap();

    let response = client.execute(&operation, None).await.unwrap();
    assert_eq!(response.json().unwrap(), not_found);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_fallback_post_failure_surfaces_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "errors": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS).build().unwrap();

    let error = client.execute(&operation, None).await.unwrap_err();
    assert_eq!(error.status(), Some(403));
}

// ============================================================================
// Non-JSON Success Bodies
// ============================================================================

#[tokio::test]
async fn test_non_json_2xx_get_body_is_final() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, ClientConfig::default());
    let operation = Operation::builder(LIST_POSTS).build().unwrap();

    // No fallback: a non-JSON 2xx body is the caller's to handle
    let response = client.execute(&operation, None).await.unwrap();
    assert_eq!(response.body(), "not json at all");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    // Reading it as JSON reports a distinguishable parse error
    assert!(response.json().is_err());
}
