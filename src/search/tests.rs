//! Tests for the search module

use super::*;
use crate::config::LogglyConfig;
use crate::error::{Error, ErrorKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// "reader:secret" in base64
const AUTH: &str = "Basic cmVhZGVyOnNlY3JldA==";

fn config_for(server: &MockServer) -> LogglyConfig {
    LogglyConfig {
        account: "acme".to_string(),
        username: "reader".to_string(),
        password: "secret".to_string(),
        customer_token: "tok-1".to_string(),
        api_base_url: Some(server.uri()),
        inputs_base_url: Some(server.uri()),
        ..Default::default()
    }
}

fn client_for(server: &MockServer) -> LogglyClient {
    LogglyClient::new(config_for(server)).unwrap()
}

async fn mount_search(server: &MockServer, rsid: &str) {
    Mock::given(method("GET"))
        .and(path("/apiv2/search"))
        .and(header("Authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rsid": {"id": rsid, "status": "SCHEDULED"}
        })))
        .mount(server)
        .await;
}

fn events(range: std::ops::Range<u32>) -> Vec<serde_json::Value> {
    range
        .map(|i| {
            json!({
                "id": format!("e{i}"),
                "logmsg": format!("message {i}"),
                "tags": ["web"],
                "event": {"syslog": {"timestamp": "2024-01-01T00:00:00Z", "host": "web-1"}}
            })
        })
        .collect()
}

// ============================================================================
// SearchQuery
// ============================================================================

#[test]
fn test_search_query_pairs() {
    let query = SearchQuery::new("*")
        .from("-27d")
        .until("now")
        .order(SearchOrder::Asc)
        .size(4);

    assert_eq!(
        query.to_query_pairs(),
        vec![
            ("q".to_string(), "*".to_string()),
            ("from".to_string(), "-27d".to_string()),
            ("until".to_string(), "now".to_string()),
            ("order".to_string(), "asc".to_string()),
            ("size".to_string(), "4".to_string()),
        ]
    );
}

#[test]
fn test_search_query_from_str() {
    let query: SearchQuery = "tag:web".into();
    assert_eq!(query.q, "tag:web");
    assert_eq!(query.to_query_pairs().len(), 1);
}

#[test_case("" ; "empty")]
#[test_case("   " ; "whitespace")]
fn test_search_query_empty(q: &str) {
    assert!(SearchQuery::new(q).is_empty());
}

// ============================================================================
// ResultSetHandle
// ============================================================================

#[test]
fn test_handle_string_id() {
    let body = json!({"rsid": {"id": "ABC123", "status": "SCHEDULED"}});
    let handle = ResultSetHandle::from_search_response(&body).unwrap();
    assert_eq!(handle.id, "ABC123");
    assert_eq!(handle.status.as_deref(), Some("SCHEDULED"));
}

#[test]
fn test_handle_numeric_id() {
    let body = json!({"rsid": {"id": 897_771_232}});
    let handle = ResultSetHandle::from_search_response(&body).unwrap();
    assert_eq!(handle.id, "897771232");
    assert_eq!(handle.status, None);
}

#[test_case(json!({}) ; "no rsid")]
#[test_case(json!({"rsid": {}}) ; "no id")]
#[test_case(json!({"rsid": {"id": ""}}) ; "empty id")]
#[test_case(json!({"rsid": {"id": null}}) ; "null id")]
fn test_handle_missing(body: serde_json::Value) {
    let err = ResultSetHandle::from_search_response(&body).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

// ============================================================================
// EventPayload
// ============================================================================

#[test]
fn test_payload_message_wrapped() {
    let body = EventPayload::from("hello world!").into_body().unwrap();
    assert_eq!(body, json!({"message": "hello world!"}));
}

#[test]
fn test_payload_object_as_is() {
    let body = EventPayload::from(json!({"message": "hi", "from": "test"}))
        .into_body()
        .unwrap();
    assert_eq!(body, json!({"message": "hi", "from": "test"}));
}

#[test_case(json!(42) ; "number")]
#[test_case(json!(true) ; "true")]
#[test_case(json!(-1) ; "negative number")]
fn test_payload_scalar_wrapped(value: serde_json::Value) {
    let body = EventPayload::from(value.clone()).into_body().unwrap();
    assert_eq!(body, json!({ "message": value }));
}

#[test_case(EventPayload::from("") ; "empty string")]
#[test_case(EventPayload::from(json!(null)) ; "null")]
#[test_case(EventPayload::from(json!({})) ; "empty object")]
#[test_case(EventPayload::from(json!([])) ; "empty array")]
#[test_case(EventPayload::from(json!("")) ; "empty json string")]
#[test_case(EventPayload::from(json!(false)) ; "false")]
#[test_case(EventPayload::from(json!(0)) ; "zero")]
#[test_case(EventPayload::from(json!(0.0)) ; "float zero")]
fn test_payload_empty(payload: EventPayload) {
    let err = payload.into_body().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
}

// ============================================================================
// URIs
// ============================================================================

#[test]
fn test_events_uri() {
    let client = LogglyClient::new(LogglyConfig {
        account: "acme".to_string(),
        ..Default::default()
    })
    .unwrap();
    let handle = ResultSetHandle {
        id: "ABC123".to_string(),
        status: None,
    };

    assert_eq!(
        client.events_uri(&handle).unwrap().as_str(),
        "https://acme.loggly.com/apiv2/events?rsid=ABC123"
    );
}

#[test]
fn test_inputs_uri() {
    let client = LogglyClient::new(LogglyConfig {
        customer_token: "tok-1".to_string(),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        client.inputs_uri(&["tagA", "tagB"]).unwrap().as_str(),
        "https://logs-01.loggly.com/inputs/tok-1/tag/tagA,tagB"
    );
    assert_eq!(
        client.inputs_uri(&[]).unwrap().as_str(),
        "https://logs-01.loggly.com/inputs/tok-1/tag/loggly-search"
    );
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_pages_through_results() {
    let server = MockServer::start().await;
    mount_search(&server, "ABC123").await;

    Mock::given(method("GET"))
        .and(path("/apiv2/events"))
        .and(query_param("rsid", "ABC123"))
        .and(query_param_is_missing("page"))
        .and(header("Authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_events": 70, "page": 0, "events": events(0..50)
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/apiv2/events"))
        .and(query_param("rsid", "ABC123"))
        .and(query_param("page", "1"))
        .and(header("Authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_events": 70, "page": 1, "events": events(50..70)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut pager = client_for(&server).search("*").await.unwrap();
    assert_eq!(pager.count(), 70);

    let records = pager.collect_records(None).await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
    let expected: Vec<String> = (0..70).map(|i| format!("e{i}")).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_search_sends_facets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apiv2/search"))
        .and(query_param("q", "*"))
        .and(query_param("from", "-27d"))
        .and(query_param("until", "now"))
        .and(query_param("size", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rsid": {"id": "R1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client_for(&server)
        .submit(&SearchQuery::new("*").from("-27d").until("now").size(4))
        .await
        .unwrap();
    assert_eq!(handle.id, "R1");
}

#[tokio::test]
async fn test_search_empty_query() {
    let server = MockServer::start().await;

    let err = client_for(&server).search("").await.unwrap_err();
    assert!(matches!(err, Error::EmptyInput { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_missing_credentials() {
    let server = MockServer::start().await;
    let config = LogglyConfig {
        username: String::new(),
        ..config_for(&server)
    };

    let err = LogglyClient::new(config).unwrap().search("*").await.unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "username"));
}

#[tokio::test]
async fn test_search_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apiv2/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).search("*").await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_not_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apiv2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).search("*").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_search_missing_rsid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apiv2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let err = client_for(&server).search("*").await.unwrap_err();
    assert!(err.to_string().contains("rsid"));
}

#[tokio::test]
async fn test_search_first_page_failure() {
    let server = MockServer::start().await;
    mount_search(&server, "ABC123").await;

    Mock::given(method("GET"))
        .and(path("/apiv2/events"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).search("*").await.unwrap_err();
    assert!(err.is_invalid_response());
}

// ============================================================================
// Inputs
// ============================================================================

#[tokio::test]
async fn test_send_event_tagged_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/inputs/tok-1/tag/tagA,tagB"))
        .and(body_json(json!({"message": "hello world!", "from": "test"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .send_event(
            json!({"message": "hello world!", "from": "test"}),
            &["tagA", "tagB"],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_event_untagged_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/inputs/tok-1/tag/{DEFAULT_TAG}")))
        .and(body_json(json!({"message": "hello world!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .send_event("hello world!", &[])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_event_empty() {
    let server = MockServer::start().await;

    let err = client_for(&server).send_event("", &[]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_event_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad token"))
        .mount(&server)
        .await;

    let err = client_for(&server).send_event("hi", &[]).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
}
