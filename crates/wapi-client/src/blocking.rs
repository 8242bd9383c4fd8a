//! Synchronous client.
//!
//! Wraps the async [`WapiClient`](crate::WapiClient) and drives each call to
//! completion on a private single-threaded runtime. Every method blocks the
//! calling thread until the response arrives or the request fails.
//!
//! Do not use this client from inside an async runtime; block_on panics there.

use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::client::ClientBuilder;
use crate::error::{Error, Result};
use crate::types::{
    ListResourcesResponse, ListToolsResponse, ReadResourceResponse, ServerInfo, ToolCallResponse,
};

/// Blocking WhatsApp MCP API client.
#[derive(Clone)]
pub struct WapiClient {
    inner: crate::WapiClient,
    runtime: Arc<Runtime>,
}

impl std::fmt::Debug for WapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WapiClient")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl WapiClient {
    /// Create a client for the default local server.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_builder(ClientBuilder::new().api_key(api_key))
    }

    /// Build a blocking client from a configured builder.
    pub fn from_builder(builder: ClientBuilder) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("failed to start runtime: {}", e)))?;

        Ok(Self {
            inner: builder.build()?,
            runtime: Arc::new(runtime),
        })
    }

    /// The wrapped async client.
    pub fn as_async(&self) -> &crate::WapiClient {
        &self.inner
    }

    /// Get server name, version and advertised capabilities.
    pub fn get_server_info(&self) -> Result<ServerInfo> {
        self.runtime.block_on(self.inner.server().get_info())
    }

    /// List the tools the server exposes.
    pub fn list_tools(&self) -> Result<ListToolsResponse> {
        self.runtime.block_on(self.inner.server().list_tools())
    }

    /// Send a text message to a number in international format.
    pub fn send_message(&self, number: &str, message: &str) -> Result<ToolCallResponse> {
        self.runtime
            .block_on(self.inner.whatsapp().send_message(number, message))
    }

    /// Check whether a number is registered on WhatsApp.
    pub fn check_number(&self, number: &str) -> Result<ToolCallResponse> {
        self.runtime.block_on(self.inner.whatsapp().check_number(number))
    }

    /// Get the connection status of the WhatsApp session.
    pub fn get_status(&self) -> Result<ToolCallResponse> {
        self.runtime.block_on(self.inner.whatsapp().get_status())
    }

    /// Get recent messages exchanged with a number.
    pub fn get_messages(&self, number: &str, limit: Option<u32>) -> Result<ToolCallResponse> {
        self.runtime
            .block_on(self.inner.whatsapp().get_messages(number, limit))
    }

    /// List recent conversations.
    pub fn get_conversations(&self, limit: Option<u32>) -> Result<ToolCallResponse> {
        self.runtime
            .block_on(self.inner.whatsapp().get_conversations(limit))
    }

    /// Mark the messages from a number as read.
    pub fn mark_as_read(&self, number: &str) -> Result<ToolCallResponse> {
        self.runtime.block_on(self.inner.whatsapp().mark_as_read(number))
    }

    /// List available resources.
    pub fn list_resources(&self) -> Result<ListResourcesResponse> {
        self.runtime.block_on(self.inner.resources().list())
    }

    /// Read a resource by URI.
    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResponse> {
        self.runtime.block_on(self.inner.resources().read(uri))
    }
}
