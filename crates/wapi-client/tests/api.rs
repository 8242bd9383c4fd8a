//! Integration tests for the WhatsApp MCP client using wiremock.
//!
//! These tests mock the server's HTTP surface to verify request shape, header
//! handling, envelope decoding and error propagation.

use serde_json::{json, Value};
use wapi_client::{
    CheckNumberPayload, ConnectionStatusResource, ConversationsPayload, ErrorBody, MessagesPayload,
    SendMessagePayload, StatusPayload, WapiClient, CONNECTION_STATUS_URI,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "wapi_test_key";

fn client_for(server: &MockServer) -> WapiClient {
    WapiClient::builder()
        .base_url(server.uri())
        .api_key(API_KEY)
        .build()
        .unwrap()
}

/// A tool call envelope wrapping `payload` the way the server does.
fn tool_envelope(payload: Value) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": serde_json::to_string_pretty(&payload).unwrap()
        }]
    })
}

/// Mount a tools/call mock that only matches the exact request body.
async fn expect_tool_call(server: &MockServer, body: Value, payload: Value) {
    Mock::given(method("POST"))
        .and(path("/api/mcp/tools/call"))
        .and(header("x-api-key", API_KEY))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_envelope(payload)))
        .expect(1)
        .mount(server)
        .await;
}

// ─────────────────────────────────────────────────────────────────────────────
// Server endpoints
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_server_info_sends_all_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mcp/info"))
        .and(header("x-api-key", API_KEY))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "WhatsApp SaaS MCP Server",
            "version": "1.0.0",
            "description": "MCP server for WhatsApp automation and messaging",
            "capabilities": {
                "tools": ["whatsapp_send_message"],
                "resources": ["connection_status"]
            },
            "license": "MIT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client_for(&server).server().get_info().await.unwrap();
    assert_eq!(info.name, "WhatsApp SaaS MCP Server");
    assert_eq!(info.version, "1.0.0");
    assert_eq!(info.license.as_deref(), Some("MIT"));
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mcp/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = WapiClient::builder()
        .base_url(format!("{}/", server.uri()))
        .api_key(API_KEY)
        .build()
        .unwrap();
    client.server().get_info().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/mcp/info");
}

#[tokio::test]
async fn test_list_tools() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mcp/tools/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tools": [
                {
                    "name": "whatsapp_send_message",
                    "description": "Send a WhatsApp message to a specific number",
                    "inputSchema": {"type": "object", "required": ["number", "message"]}
                },
                {
                    "name": "whatsapp_get_status",
                    "description": "Get current WhatsApp connection status"
                }
            ]
        })))
        .mount(&server)
        .await;

    let tools = client_for(&server).server().list_tools().await.unwrap();
    assert_eq!(tools.tools.len(), 2);
    assert_eq!(tools.tools[0].name, "whatsapp_send_message");
    assert_eq!(tools.tools[0].input_schema["required"][1], "message");
    assert!(tools.tools[1].input_schema.is_null());
}

#[tokio::test]
async fn test_construction_performs_no_io() {
    let server = MockServer::start().await;

    let _client = client_for(&server);
    let _blank = WapiClient::new(API_KEY).unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool calls
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_send_message_posts_single_tool_call() {
    let server = MockServer::start().await;

    expect_tool_call(
        &server,
        json!({
            "name": "whatsapp_send_message",
            "arguments": {"number": "+1234567890", "message": "Hello from Rust!"}
        }),
        json!({"success": true, "message": "Message sent", "number": "+1234567890"}),
    )
    .await;

    let response = client_for(&server)
        .whatsapp()
        .send_message("+1234567890", "Hello from Rust!")
        .await
        .unwrap();

    let payload: SendMessagePayload = response.decode().unwrap();
    assert!(payload.success);
    assert_eq!(payload.message, "Message sent");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_send_message_does_not_validate_number() {
    let server = MockServer::start().await;

    expect_tool_call(
        &server,
        json!({
            "name": "whatsapp_send_message",
            "arguments": {"number": "abc", "message": ""}
        }),
        json!({"success": false, "message": "Invalid number"}),
    )
    .await;

    let payload: SendMessagePayload = client_for(&server)
        .whatsapp()
        .send_message("abc", "")
        .await
        .unwrap()
        .decode()
        .unwrap();
    assert!(!payload.success);
}

#[tokio::test]
async fn test_check_number() {
    let server = MockServer::start().await;

    expect_tool_call(
        &server,
        json!({"name": "whatsapp_check_number", "arguments": {"number": "+1234567890"}}),
        json!({"number": "+1234567890", "exists": true, "message": "Number is on WhatsApp"}),
    )
    .await;

    let payload: CheckNumberPayload = client_for(&server)
        .whatsapp()
        .check_number("+1234567890")
        .await
        .unwrap()
        .decode()
        .unwrap();
    assert!(payload.exists);
    assert_eq!(payload.number.as_deref(), Some("+1234567890"));
}

#[tokio::test]
async fn test_get_status_decodes_embedded_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mcp/tools/call"))
        .and(body_json(json!({"name": "whatsapp_get_status", "arguments": {}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "type": "text",
                "text": "{\"status\":\"connected\",\"message\":\"ok\"}"
            }]
        })))
        .mount(&server)
        .await;

    let response = client_for(&server).whatsapp().get_status().await.unwrap();
    assert_eq!(
        response.text().unwrap(),
        "{\"status\":\"connected\",\"message\":\"ok\"}"
    );

    let status: StatusPayload = response.decode().unwrap();
    assert_eq!(status.status, "connected");
    assert_eq!(status.message, "ok");
}

#[tokio::test]
async fn test_get_messages_passes_limit_unchanged() {
    let server = MockServer::start().await;

    expect_tool_call(
        &server,
        json!({
            "name": "whatsapp_get_messages",
            "arguments": {"number": "+1234567890", "limit": 500}
        }),
        json!({
            "success": true,
            "count": 1,
            "messages": [{"from": "1234567890", "fromMe": true, "message": "hi"}]
        }),
    )
    .await;

    let payload: MessagesPayload = client_for(&server)
        .whatsapp()
        .get_messages("+1234567890", Some(500))
        .await
        .unwrap()
        .decode()
        .unwrap();
    assert_eq!(payload.count, 1);
    assert!(payload.messages[0].from_me);
}

#[tokio::test]
async fn test_get_messages_defaults_limit() {
    let server = MockServer::start().await;

    expect_tool_call(
        &server,
        json!({
            "name": "whatsapp_get_messages",
            "arguments": {"number": "+1234567890", "limit": 20}
        }),
        json!({"success": true, "count": 0, "messages": []}),
    )
    .await;

    client_for(&server)
        .whatsapp()
        .get_messages("+1234567890", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_conversations_passes_limit_unchanged() {
    let server = MockServer::start().await;

    expect_tool_call(
        &server,
        json!({"name": "whatsapp_get_conversations", "arguments": {"limit": 75}}),
        json!({
            "success": true,
            "count": 2,
            "conversations": [
                {"name": "Alice", "number": "15550001111", "lastMessage": "see you"},
                {"name": "Bob", "number": "15550002222"}
            ]
        }),
    )
    .await;

    let payload: ConversationsPayload = client_for(&server)
        .whatsapp()
        .get_conversations(Some(75))
        .await
        .unwrap()
        .decode()
        .unwrap();
    assert_eq!(payload.count, 2);
    assert_eq!(payload.conversations[0].last_message.as_deref(), Some("see you"));
    assert!(payload.conversations[1].last_message.is_none());
}

#[tokio::test]
async fn test_get_conversations_defaults_limit() {
    let server = MockServer::start().await;

    expect_tool_call(
        &server,
        json!({"name": "whatsapp_get_conversations", "arguments": {"limit": 20}}),
        json!({"success": true, "count": 0, "conversations": []}),
    )
    .await;

    client_for(&server)
        .whatsapp()
        .get_conversations(None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mark_as_read() {
    let server = MockServer::start().await;

    expect_tool_call(
        &server,
        json!({"name": "whatsapp_mark_read", "arguments": {"number": "+1234567890"}}),
        json!({"success": true, "message": "Marked as read"}),
    )
    .await;

    let response = client_for(&server)
        .whatsapp()
        .mark_as_read("+1234567890")
        .await
        .unwrap();
    assert_eq!(response.payload().unwrap()["success"], json!(true));
}

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_and_read_resources() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mcp/resources/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{
                "uri": CONNECTION_STATUS_URI,
                "name": "WhatsApp Connection Status",
                "description": "Current connection status and QR code availability",
                "mimeType": "application/json"
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/mcp/resources/read"))
        .and(body_json(json!({"uri": CONNECTION_STATUS_URI})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": [{
                "uri": CONNECTION_STATUS_URI,
                "mimeType": "application/json",
                "text": "{\"status\":\"qr\",\"has_qr\":true,\"message\":\"Waiting for QR code scan to connect WhatsApp\"}"
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let listing = client.resources().list().await.unwrap();
    assert_eq!(listing.resources[0].mime_type, "application/json");

    let status: ConnectionStatusResource = client
        .resources()
        .read(CONNECTION_STATUS_URI)
        .await
        .unwrap()
        .decode()
        .unwrap();
    assert_eq!(status.status, "qr");
    assert!(status.has_qr);
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_every_operation_surfaces_404_body() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let wa = client.whatsapp();

    let errors = vec![
        client.server().get_info().await.unwrap_err(),
        client.server().list_tools().await.unwrap_err(),
        wa.send_message("+1234567890", "hi").await.unwrap_err(),
        wa.check_number("+1234567890").await.unwrap_err(),
        wa.get_status().await.unwrap_err(),
        wa.get_messages("+1234567890", None).await.unwrap_err(),
        wa.get_conversations(None).await.unwrap_err(),
        wa.mark_as_read("+1234567890").await.unwrap_err(),
        client.resources().list().await.unwrap_err(),
        client.resources().read("whatsapp://nope").await.unwrap_err(),
    ];

    for err in errors {
        assert!(err.is_not_found(), "expected 404, got {:?}", err);
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.body(),
            Some(&ErrorBody::Json(json!({"error": "not found"})))
        );
        assert_eq!(err.body().unwrap().error(), Some("not found"));
    }
}

#[tokio::test]
async fn test_unparseable_error_body_is_kept_as_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mcp/tools/call"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .whatsapp()
        .get_status()
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    assert_eq!(err.body(), Some(&ErrorBody::Text("Bad Gateway".to_string())));
}

#[tokio::test]
async fn test_invalid_api_key_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mcp/info"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid API key",
            "message": "The provided API key is not valid"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).server().get_info().await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(
        err.body().unwrap().message(),
        Some("The provided API key is not valid")
    );
}

#[tokio::test]
async fn test_success_with_non_json_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mcp/info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).server().get_info().await.unwrap_err();
    assert!(matches!(err, wapi_client::Error::Json(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener so the port is closed.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = WapiClient::builder()
        .base_url(uri)
        .api_key(API_KEY)
        .build()
        .unwrap();

    let err = client.server().get_info().await.unwrap_err();
    assert!(matches!(err, wapi_client::Error::Http(_)));
    assert!(err.status().is_none());
}
