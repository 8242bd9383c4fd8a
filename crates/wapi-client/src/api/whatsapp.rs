//! WhatsApp tools API.
//!
//! Every operation is a call to `POST /api/mcp/tools/call` with a fixed tool
//! name. The returned [`ToolCallResponse`] carries the tool's result as a JSON
//! string; decode it with the matching payload type, e.g.
//! `response.decode::<StatusPayload>()`.
//!
//! [`StatusPayload`]: crate::types::StatusPayload

use serde_json::{Map, Value};

use crate::client::WapiClient;
use crate::error::Result;
use crate::types::{ToolCallRequest, ToolCallResponse, ToolName};

/// Limit sent when the caller does not choose one.
///
/// The server caps both message and conversation listings at 50; the client
/// forwards whatever it is given.
pub const DEFAULT_LIMIT: u32 = 20;

/// WhatsApp tools API client.
pub struct WhatsAppApi {
    client: WapiClient,
}

impl WhatsAppApi {
    pub(crate) fn new(client: WapiClient) -> Self {
        Self { client }
    }

    /// Send a text message to a number in international format.
    pub async fn send_message(&self, number: &str, message: &str) -> Result<ToolCallResponse> {
        self.call_tool(
            ToolName::SendMessage,
            arguments([("number", number.into()), ("message", message.into())]),
        )
        .await
    }

    /// Check whether a number is registered on WhatsApp.
    pub async fn check_number(&self, number: &str) -> Result<ToolCallResponse> {
        self.call_tool(ToolName::CheckNumber, arguments([("number", number.into())]))
            .await
    }

    /// Get the connection status of the WhatsApp session.
    pub async fn get_status(&self) -> Result<ToolCallResponse> {
        self.call_tool(ToolName::GetStatus, Map::new()).await
    }

    /// Get recent messages exchanged with a number.
    pub async fn get_messages(&self, number: &str, limit: Option<u32>) -> Result<ToolCallResponse> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        self.call_tool(
            ToolName::GetMessages,
            arguments([("number", number.into()), ("limit", limit.into())]),
        )
        .await
    }

    /// List recent conversations.
    pub async fn get_conversations(&self, limit: Option<u32>) -> Result<ToolCallResponse> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        self.call_tool(ToolName::GetConversations, arguments([("limit", limit.into())]))
            .await
    }

    /// Mark the messages from a number as read.
    pub async fn mark_as_read(&self, number: &str) -> Result<ToolCallResponse> {
        self.call_tool(ToolName::MarkRead, arguments([("number", number.into())]))
            .await
    }

    async fn call_tool(
        &self,
        name: ToolName,
        arguments: Map<String, Value>,
    ) -> Result<ToolCallResponse> {
        tracing::debug!(tool = %name, "calling tool");
        self.client
            .post("tools/call", &ToolCallRequest { name, arguments })
            .await
    }
}

fn arguments<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
