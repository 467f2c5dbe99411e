//! Search intent API integration tests
//!
//! Drives the MCP server end to end against a mocked search intent API,
//! covering success, transport failures, API-level failures and malformed
//! responses.

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::time::Duration;

use search_intent_mcp::{Config, FetchError, IntentAnalyzer, IntentClient, SearchIntentServer};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/api/search-intent";
const API_KEY: &str = "test-key";

fn intent_data(query: &str) -> Value {
    json!({
        "query": query,
        "intent": "Product research/purchase intent",
        "possibleCategories": ["Electronics", "Smartphones", "Consumer Technology"],
        "reasoning": "The query names a specific, recently released product.",
        "references": [
            {"url": "https://www.apple.com/iphone-15/", "title": "iPhone 15 - Apple"},
            {"url": "https://en.wikipedia.org/wiki/IPhone_15", "title": "iPhone 15 - Wikipedia"}
        ],
        "groundingMetadata": {
            "searchSuggestions": ["iphone 15 price", "iphone 15 vs iphone 14"]
        }
    })
}

fn config_for(mock: &MockServer) -> Config {
    config_with_timeout(mock, 5)
}

fn config_with_timeout(mock: &MockServer, timeout_secs: u64) -> Config {
    Config::new(
        Some(API_KEY.to_string()),
        format!("{}{}", mock.uri(), API_PATH),
        timeout_secs,
    )
    .unwrap()
}

fn tools_call(id: u64, query: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {
            "name": "search_intent_analysis",
            "arguments": {"query": query}
        }
    })
    .to_string()
}

async fn call_tool(server: &SearchIntentServer, query: &str) -> Value {
    let response = server.handle_message(&tools_call(1, query)).await.unwrap();
    let response: Value = serde_json::from_str(&response).unwrap();
    assert!(
        response.get("error").is_none(),
        "lookup failures must not surface as JSON-RPC errors: {}",
        response
    );
    response["result"].clone()
}

fn result_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap()
}

// ==========================================================================
// Success path
// ==========================================================================

#[tokio::test]
async fn test_success_returns_data_losslessly() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"query": "iphone 15"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "success",
            "data": intent_data("iphone 15"),
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let result = call_tool(&server, "iphone 15").await;

    assert_eq!(result["isError"], false);
    assert_eq!(result["content"].as_array().unwrap().len(), 1);
    assert_eq!(result["content"][0]["type"], "text");

    let payload: Value = serde_json::from_str(result_text(&result)).unwrap();
    assert_eq!(payload, intent_data("iphone 15"));

    assert_eq!(result["_meta"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(result["_meta"]["latencyMs"].is_u64());
    assert!(result["_meta"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_same_query_twice_is_structurally_identical() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "success",
            "data": intent_data("python tutorial"),
        })))
        .expect(2)
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let mut first = call_tool(&server, "python tutorial").await;
    let mut second = call_tool(&server, "python tutorial").await;

    // Metadata carries timestamps and latency; everything else must match
    first.as_object_mut().unwrap().remove("_meta");
    second.as_object_mut().unwrap().remove("_meta");
    assert_eq!(first, second);
}

#[rstest]
#[case(json!({"query": "q", "intent": "Info"}))]
#[case(json!({"query": "q", "intent": "Info", "reasoning": null}))]
#[case(json!({"intent": "Info", "possibleCategories": "Shopping", "score": 0.93}))]
#[tokio::test]
async fn test_partial_data_is_relayed_unchanged(#[case] data: Value) {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "success",
            "data": data.clone(),
        })))
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let result = call_tool(&server, "q").await;

    assert_eq!(result["isError"], false);
    let payload: Value = serde_json::from_str(result_text(&result)).unwrap();
    assert_eq!(payload, data);
}

#[tokio::test]
async fn test_client_returns_data_as_received() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "success",
            "data": intent_data("iphone 15"),
        })))
        .mount(&mock)
        .await;

    let client = IntentClient::new(&config_for(&mock)).unwrap();
    let result = client.analyze("iphone 15").await.unwrap();

    assert_eq!(result.intent(), Some("Product research/purchase intent"));
    assert_eq!(result.category_count(), 3);
    assert_eq!(serde_json::to_value(&result).unwrap(), intent_data("iphone 15"));
}

// ==========================================================================
// Transport errors
// ==========================================================================

#[rstest]
#[case(401, "Unauthorized")]
#[case(404, "Not Found")]
#[case(429, "Too Many Requests")]
#[case(500, "Internal Server Error")]
#[case(503, "Service Unavailable")]
#[tokio::test]
async fn test_non_success_status_is_transport_error(#[case] status: u16, #[case] phrase: &str) {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream says no"))
        .expect(1)
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let result = call_tool(&server, "iphone 15").await;

    assert_eq!(result["isError"], true);
    let text = result_text(&result);
    assert!(text.starts_with("Error analyzing search intent: API request failed"));
    assert!(text.contains(phrase), "expected '{}' in '{}'", phrase, text);
    assert_eq!(result["_meta"]["errorType"], "TransportError");
}

#[tokio::test]
async fn test_slow_api_is_timeout_error() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 0, "message": "success", "data": intent_data("q")}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_with_timeout(&mock, 1)).unwrap();
    let result = call_tool(&server, "q").await;

    assert_eq!(result["isError"], true);
    assert!(result_text(&result).starts_with("Error analyzing search intent: "));
    assert_eq!(result["_meta"]["errorType"], "TimeoutError");
}

// ==========================================================================
// API-level errors
// ==========================================================================

#[tokio::test]
async fn test_nonzero_code_is_api_error() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 7,
            "message": "rate limited",
            "data": null,
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let result = call_tool(&server, "iphone 15").await;

    assert_eq!(result["isError"], true);
    assert!(result_text(&result).contains("rate limited"));
    assert_eq!(result["_meta"]["errorType"], "ApiError");
    assert!(result["_meta"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_client_reports_api_code() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 1001,
            "message": "invalid token",
        })))
        .mount(&mock)
        .await;

    let client = IntentClient::new(&config_for(&mock)).unwrap();
    match client.analyze("anything").await {
        Err(FetchError::Api { code, message }) => {
            assert_eq!(code, 1001);
            assert_eq!(message, "invalid token");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

// ==========================================================================
// Malformed responses
// ==========================================================================

#[rstest]
#[case("<html><body>Bad Gateway</body></html>")]
#[case("")]
#[case(r#"{"code": "zero"}"#)]
#[tokio::test]
async fn test_malformed_body_is_error_not_crash(#[case] body: &str) {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let result = call_tool(&server, "iphone 15").await;

    assert_eq!(result["isError"], true);
    assert_eq!(result["_meta"]["errorType"], "DecodeError");

    // The server keeps serving after a bad upstream response
    let ping = server
        .handle_message(r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#)
        .await
        .unwrap();
    assert!(ping.contains("result"));
}

#[rstest]
#[case(json!({"code": 0, "message": "ok"}))]
#[case(json!({"code": 0, "message": "ok", "data": null}))]
#[tokio::test]
async fn test_success_code_without_data_is_error(#[case] body: Value) {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let result = call_tool(&server, "iphone 15").await;

    assert_eq!(result["isError"], true);
    assert!(result_text(&result).contains("did not include data"));
    assert_eq!(result["_meta"]["errorType"], "DecodeError");
}

// ==========================================================================
// Input validation happens before any outbound call
// ==========================================================================

#[rstest]
#[case(json!({}))]
#[case(json!({"query": 15}))]
#[case(json!({"query": ""}))]
#[tokio::test]
async fn test_invalid_query_is_rejected_without_http_call(#[case] arguments: Value) {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let request = json!({
        "jsonrpc": "2.0",
        "id": "bad",
        "method": "tools/call",
        "params": {"name": "search_intent_analysis", "arguments": arguments}
    });
    let response: Value =
        serde_json::from_str(&server.handle_message(&request.to_string()).await.unwrap()).unwrap();

    assert_eq!(response["id"], "bad");
    assert_eq!(response["error"]["code"], -32602);
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn test_api_key_is_never_echoed() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock)
        .await;

    let server = SearchIntentServer::new(&config_for(&mock)).unwrap();
    let result = call_tool(&server, "iphone 15").await;

    assert!(!result.to_string().contains(API_KEY));
}
