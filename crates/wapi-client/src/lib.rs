//! HTTP client SDK for the WhatsApp MCP API.
//!
//! This crate provides a typed client for the `/api/mcp` surface of a WhatsApp
//! SaaS server: server info, tool discovery, the messaging tools and the
//! read-only resources.
//!
//! # Example
//!
//! ```no_run
//! use wapi_client::{StatusPayload, WapiClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = WapiClient::builder()
//!     .base_url("http://localhost:8000")
//!     .api_key("wapi_secret")
//!     .build()?;
//!
//! let tools = client.server().list_tools().await?;
//! for tool in &tools.tools {
//!     println!("- {}: {}", tool.name, tool.description);
//! }
//!
//! // Tool results arrive as a JSON string inside the envelope.
//! let status: StatusPayload = client.whatsapp().get_status().await?.decode()?;
//! println!("Status: {}", status.status);
//!
//! client
//!     .whatsapp()
//!     .send_message("+1234567890", "Hello from Rust!")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Server**: `GET /api/mcp/info`, `GET /api/mcp/tools/list`
//! - **WhatsApp**: send, check number, status, messages, conversations, mark read
//! - **Resources**: list and read
//!
//! Enable the `blocking` feature for a synchronous client in [`blocking`].

pub mod api;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod error;
pub mod types;

pub use api::{ResourcesApi, ServerApi, WhatsAppApi, DEFAULT_LIMIT};
pub use client::{ClientBuilder, WapiClient, API_KEY_HEADER, DEFAULT_BASE_URL};
pub use error::{Error, ErrorBody, ParseToolNameError, Result};
pub use types::*;
