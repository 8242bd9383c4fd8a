//! Server metadata and tool discovery.

use crate::client::WapiClient;
use crate::error::Result;
use crate::types::{ListToolsResponse, ServerInfo};

/// Server API client.
pub struct ServerApi {
    client: WapiClient,
}

impl ServerApi {
    pub(crate) fn new(client: WapiClient) -> Self {
        Self { client }
    }

    /// Get server name, version and advertised capabilities.
    pub async fn get_info(&self) -> Result<ServerInfo> {
        self.client.get("info").await
    }

    /// List the tools the server exposes.
    pub async fn list_tools(&self) -> Result<ListToolsResponse> {
        self.client.get("tools/list").await
    }
}
