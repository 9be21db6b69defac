//! Integration tests for the JSON-RPC request handling of the MCP server.

use std::time::Duration;

use mockito::Matcher;
use serde_json::{Value, json};

use garoon_mcp::core::AppConfig;
use garoon_mcp::garoon::GaroonClient;
use garoon_mcp::mcp::McpServer;
use garoon_mcp::mcp::types::JsonRpcRequest;

fn test_server(base_url: &str) -> McpServer {
    let config = AppConfig {
        base_url: base_url.to_string(),
        username: "bob".to_string(),
        password: "secret".to_string(),
        tz_offset: "+00:00".to_string(),
        timeout: Duration::from_secs(5),
    };
    McpServer::new(GaroonClient::new(&config).unwrap())
}

fn request(value: Value) -> JsonRpcRequest {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn it_answers_initialize() {
    let server = test_server("http://localhost:1");

    let response = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": "2024-11-05", "capabilities": {}},
        })))
        .await
        .unwrap();

    let result = serde_json::to_value(&response).unwrap();
    assert_eq!(result["id"], 1);
    assert_eq!(result["result"]["serverInfo"]["name"], "garoon-mcp");
    assert!(result["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn it_ignores_notifications() {
    let server = test_server("http://localhost:1");

    let response = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
        })))
        .await;

    assert!(response.is_none());
}

#[tokio::test]
async fn it_lists_the_tool_catalog() {
    let server = test_server("http://localhost:1");

    let response = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/list",
        })))
        .await
        .unwrap();

    let result = serde_json::to_value(&response).unwrap();
    let tools = result["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 5);
    assert!(tools.iter().any(|tool| tool["name"] == "get_schedule"));
    assert!(tools.iter().all(|tool| tool["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn it_rejects_unknown_methods() {
    let server = test_server("http://localhost:1");

    let response = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "resources/read",
        })))
        .await
        .unwrap();

    let result = serde_json::to_value(&response).unwrap();
    assert_eq!(result["error"]["code"], -32601);
}

#[tokio::test]
async fn it_rejects_unknown_tools() {
    let server = test_server("http://localhost:1");

    let response = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "reboot_garoon", "arguments": {}},
        })))
        .await
        .unwrap();

    let result = serde_json::to_value(&response).unwrap();
    assert_eq!(result["error"]["code"], -32602);
    assert!(
        result["error"]["message"]
            .as_str()
            .unwrap()
            .contains("reboot_garoon")
    );
}

#[tokio::test]
async fn it_calls_a_tool_end_to_end() {
    let mut garoon = mockito::Server::new_async().await;
    let server = test_server(&garoon.url());

    let mock = garoon
        .mock("GET", "/g/api/v1/base/users")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "tanaka".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"users": [{"id": "7", "name": "tanaka"}]}"#)
        .create_async()
        .await;

    let response = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {"name": "search_users", "arguments": {"query": "tanaka"}},
        })))
        .await
        .unwrap();

    let result = serde_json::to_value(&response).unwrap();
    assert_eq!(result["result"]["isError"], false);
    let text = result["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("tanaka"));
    mock.assert_async().await;
}

#[tokio::test]
async fn it_reports_tool_failures_as_structured_results() {
    let mut garoon = mockito::Server::new_async().await;
    let server = test_server(&garoon.url());

    let _mock = garoon
        .mock("GET", "/g/api/v1/schedule/events")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("bad credentials")
        .create_async()
        .await;

    let response = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "tools/call",
            "params": {
                "name": "get_schedule",
                "arguments": {"start_date": "2026-01-05", "end_date": "2026-01-06"},
            },
        })))
        .await
        .unwrap();

    let result = serde_json::to_value(&response).unwrap();
    // The process stays up and the failure is surfaced to the caller.
    assert!(result["error"].is_null());
    assert_eq!(result["result"]["isError"], true);
    let text = result["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("AuthenticationError"));
    assert!(text.contains("bad credentials"));
}

#[tokio::test]
async fn it_reports_missing_arguments_as_validation_failures() {
    let server = test_server("http://localhost:1");

    let response = server
        .handle_request(request(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "get_schedule", "arguments": {"start_date": "2026-01-05"}},
        })))
        .await
        .unwrap();

    let result = serde_json::to_value(&response).unwrap();
    assert_eq!(result["result"]["isError"], true);
    let text = result["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("ValidationError"));
    assert!(text.contains("end_date"));
}
