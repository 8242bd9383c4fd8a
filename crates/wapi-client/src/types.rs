//! Request and response types for the WhatsApp MCP API.
//!
//! These types mirror the server's API contract. Every response field has a
//! default, and an explicit `null` reads as that default, so that the client
//! never rejects a body the server considers valid; fields the types do not
//! name are kept in `extra`.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, ParseToolNameError, Result};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────────────────────────────────────

/// Server metadata from `GET /api/mcp/info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInfo {
    /// Server display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Server version.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Short description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Public URL the server believes it is reachable at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// URL of the engine that holds the WhatsApp session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_engine_url: Option<String>,
    /// Advertised tools and resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Any other fields returned by the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Capability names advertised in [`ServerInfo`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    #[serde(deserialize_with = "null_as_default")]
    pub tools: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
}

/// Response for `GET /api/mcp/tools/list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListToolsResponse {
    /// Tools the server exposes.
    #[serde(deserialize_with = "null_as_default")]
    pub tools: Vec<ToolInfo>,
}

/// A tool definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolInfo {
    /// Tool name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Tool description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// JSON Schema of the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool calls
// ─────────────────────────────────────────────────────────────────────────────

/// Remote tools reachable through `POST /api/mcp/tools/call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolName {
    #[serde(rename = "whatsapp_send_message")]
    SendMessage,
    #[serde(rename = "whatsapp_check_number")]
    CheckNumber,
    #[serde(rename = "whatsapp_get_status")]
    GetStatus,
    #[serde(rename = "whatsapp_get_messages")]
    GetMessages,
    #[serde(rename = "whatsapp_get_conversations")]
    GetConversations,
    #[serde(rename = "whatsapp_mark_read")]
    MarkRead,
}

impl ToolName {
    /// All tools, in the order the server lists them.
    pub const ALL: [ToolName; 6] = [
        ToolName::SendMessage,
        ToolName::CheckNumber,
        ToolName::GetStatus,
        ToolName::GetMessages,
        ToolName::GetConversations,
        ToolName::MarkRead,
    ];

    /// Wire identifier of the tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::SendMessage => "whatsapp_send_message",
            ToolName::CheckNumber => "whatsapp_check_number",
            ToolName::GetStatus => "whatsapp_get_status",
            ToolName::GetMessages => "whatsapp_get_messages",
            ToolName::GetConversations => "whatsapp_get_conversations",
            ToolName::MarkRead => "whatsapp_mark_read",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ParseToolNameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| ParseToolNameError(s.to_string()))
    }
}

/// Body of `POST /api/mcp/tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Tool to invoke.
    pub name: ToolName,
    /// Tool arguments; sent as `{}` when empty.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// Envelope returned by a tool call.
///
/// The tool's result is itself a JSON document, encoded as a string in
/// `content[0].text`. Use [`decode`](Self::decode) to parse it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCallResponse {
    /// Content blocks; the first one carries the result.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentBlock>,
    /// Any other fields returned by the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One content block of a tool call envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBlock {
    /// Content type, `text` in practice.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// JSON-encoded payload.
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

impl ToolCallResponse {
    /// Raw text of the first content block.
    pub fn text(&self) -> Result<&str> {
        self.content
            .first()
            .map(|block| block.text.as_str())
            .ok_or(Error::MissingContent)
    }

    /// Parse the embedded payload into an untyped JSON value.
    pub fn payload(&self) -> Result<Value> {
        self.decode()
    }

    /// Parse the embedded payload into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(self.text()?)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Payload of `whatsapp_get_status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPayload {
    /// `connected`, `qr`, `disconnected`, `error` or `unknown`.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Human-readable status line.
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Whether a QR code is waiting to be scanned.
    #[serde(deserialize_with = "null_as_default")]
    pub has_qr: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl StatusPayload {
    /// True when the WhatsApp session is ready to send.
    pub fn is_connected(&self) -> bool {
        self.status == "connected"
    }
}

/// Payload of `whatsapp_check_number`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckNumberPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub exists: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Payload of `whatsapp_send_message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendMessagePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Payload of `whatsapp_mark_read`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkReadPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Payload of `whatsapp_get_messages`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub count: usize,
    /// Messages, oldest first.
    #[serde(deserialize_with = "null_as_default")]
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A message in a chat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatMessage {
    /// Sender number.
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    /// True if the account owner sent it.
    #[serde(rename = "fromMe", deserialize_with = "null_as_default")]
    pub from_me: bool,
    /// Message text (`[Media/Other]` for non-text messages).
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Any other fields (id, timestamp).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `whatsapp_get_conversations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationsPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub count: usize,
    #[serde(deserialize_with = "null_as_default")]
    pub conversations: Vec<Conversation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A conversation summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Conversation {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
    /// Text of the latest message.
    #[serde(rename = "lastMessage", skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    /// Any other fields (id, unreadCount, lastMessageTime, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

/// URI of the connection status resource.
pub const CONNECTION_STATUS_URI: &str = "whatsapp://connection-status";

/// URI of the capabilities resource.
pub const CAPABILITIES_URI: &str = "whatsapp://capabilities";

/// Response for `GET /api/mcp/resources/list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListResourcesResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<ResourceInfo>,
}

/// A resource definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "mimeType", deserialize_with = "null_as_default")]
    pub mime_type: String,
}

/// Request body for `POST /api/mcp/resources/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceRequest {
    pub uri: String,
}

/// Envelope returned by a resource read; `contents[0].text` holds JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadResourceResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub contents: Vec<ResourceContents>,
}

/// One entry of a resource read envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceContents {
    #[serde(deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(rename = "mimeType", deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

impl ReadResourceResponse {
    /// Raw text of the first entry.
    pub fn text(&self) -> Result<&str> {
        self.contents
            .first()
            .map(|entry| entry.text.as_str())
            .ok_or(Error::MissingContent)
    }

    /// Parse the embedded document into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(self.text()?)?)
    }
}

/// Document behind [`CONNECTION_STATUS_URI`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionStatusResource {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_qr: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Document behind [`CAPABILITIES_URI`]: capability name to availability.
pub type CapabilitiesResource = std::collections::BTreeMap<String, bool>;
