//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::api::{ResourcesApi, ServerApi, WhatsAppApi};
use crate::error::{Error, ErrorBody, Result};

/// Default server address used when no base URL is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Prefix shared by all MCP endpoints.
const API_PREFIX: &str = "api/mcp";

/// WhatsApp MCP API client.
///
/// Cheap to clone; clones share one connection pool and configuration.
///
/// # Example
///
/// ```no_run
/// use wapi_client::WapiClient;
///
/// # async fn example() -> wapi_client::Result<()> {
/// let client = WapiClient::builder()
///     .base_url("http://localhost:8000")
///     .api_key("wapi_secret")
///     .build()?;
///
/// let info = client.server().get_info().await?;
/// println!("{} v{}", info.name, info.version);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WapiClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client carrying the default headers.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests, always ending in `/`.
    pub(crate) base_url: Url,
    /// Per-request timeout, if configured.
    pub(crate) timeout: Option<Duration>,
}

impl std::fmt::Debug for WapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WapiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl WapiClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the default local server.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access server metadata and tool discovery.
    pub fn server(&self) -> ServerApi {
        ServerApi::new(self.clone())
    }

    /// Access the WhatsApp messaging tools.
    pub fn whatsapp(&self) -> WhatsAppApi {
        WhatsAppApi::new(self.clone())
    }

    /// Access the resources API.
    pub fn resources(&self) -> ResourcesApi {
        ResourcesApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("{}/{}", API_PREFIX, path))
            .map_err(Error::from)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!(method = "GET", %url, "sending request");
        let mut request = self.inner.http.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(method = "POST", %url, "sending request");
        let mut request = self.inner.http.post(url).json(body);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status().is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();

        match response.text().await {
            Ok(text) => {
                tracing::debug!(status, "request failed");
                Error::Api {
                    status,
                    body: ErrorBody::from_text(text),
                }
            }
            Err(e) => e.into(),
        }
    }
}

/// Builder for creating a WapiClient.
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the base URL for the server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key sent in the `X-API-Key` header.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a per-request timeout. Requests have no timeout unless this is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<WapiClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("api_key is required".to_string()))?;

        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut key_value = HeaderValue::from_str(&api_key)
            .map_err(|_| Error::Config("Invalid API key".to_string()))?;
        key_value.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key_value);

        // Build HTTP client
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("wapi-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(WapiClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a base URL and give it exactly one trailing slash.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    let path = format!("{}/", url.path().trim_end_matches('/'));
    url.set_path(&path);
    Ok(url)
}
