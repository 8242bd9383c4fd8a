//! Resources API.

use crate::client::WapiClient;
use crate::error::Result;
use crate::types::{ListResourcesResponse, ReadResourceRequest, ReadResourceResponse};

/// Resources API client.
///
/// Resources are read-only documents such as the connection status. Like tool
/// results, their content is a JSON document embedded as a string.
pub struct ResourcesApi {
    client: WapiClient,
}

impl ResourcesApi {
    pub(crate) fn new(client: WapiClient) -> Self {
        Self { client }
    }

    /// List available resources.
    pub async fn list(&self) -> Result<ListResourcesResponse> {
        self.client.get("resources/list").await
    }

    /// Read a resource by URI.
    pub async fn read(&self, uri: &str) -> Result<ReadResourceResponse> {
        self.client
            .post(
                "resources/read",
                &ReadResourceRequest {
                    uri: uri.to_string(),
                },
            )
            .await
    }
}
