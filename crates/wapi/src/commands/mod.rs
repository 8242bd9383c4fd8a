//! CLI command handlers.

use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use console::Style;
use serde::Serialize;
use wapi_client::{DEFAULT_BASE_URL, WapiClient};

pub mod check;
pub mod config;
pub mod conversations;
pub mod demo;
pub mod info;
pub mod messages;
pub mod read;
pub mod resources;
pub mod send;
pub mod status;
pub mod tools;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Server URL to connect to.
    pub server_url: String,
    /// API key, if one was found.
    pub api_key: Option<String>,
    /// Request timeout from the selected context.
    pub timeout: Option<Duration>,
    /// Name of the config context in use, if any.
    pub context_name: Option<String>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Merge command-line flags with the client config.
    ///
    /// Flags (and their environment variables) win over the selected context,
    /// which wins over the built-in default server.
    pub fn resolve(
        server: Option<String>,
        api_key: Option<String>,
        context_name: Option<&str>,
        json_output: bool,
        verbose: bool,
    ) -> Result<Self> {
        let config = wapi_config::load_client_config().context("failed to load client config")?;

        let selected = match context_name {
            Some(name) => Some(
                config
                    .get_context(name)
                    .ok_or_else(|| anyhow!("context \"{}\" not found", name))?,
            ),
            None => config.current(),
        };

        let api_key = match api_key.filter(|k| !k.is_empty()) {
            Some(key) => Some(key),
            None => match selected {
                Some(ctx) => ctx.api_key()?,
                None => None,
            },
        };

        let server_url = server
            .or_else(|| selected.map(|c| c.server.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            server_url,
            api_key,
            timeout: selected
                .and_then(|c| config.timeout_for(c))
                .map(Duration::from_secs),
            context_name: selected.map(|c| c.name.clone()),
            json_output,
            verbose,
        })
    }

    /// Build an API client for the resolved server.
    pub fn client(&self) -> Result<WapiClient> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            anyhow!(
                "no API key configured. Pass --api-key, set WAPI_API_KEY, \
                 or add auth to a context with 'wapi config set-context'"
            )
        })?;

        let mut builder = WapiClient::builder()
            .base_url(&self.server_url)
            .api_key(api_key);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a section heading with a rule underneath.
pub fn print_heading(title: &str) {
    let dim = Style::new().dim();
    println!();
    println!("{}", console::style(title).bold());
    println!("{}", dim.apply_to("─".repeat(40)));
}

/// Print an aligned `label: value` line.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    let dim = Style::new().dim();
    println!("  {} {}", dim.apply_to(format!("{}:", label)), value);
}

/// Green check or red cross for a boolean outcome.
pub fn mark(ok: bool) -> console::StyledObject<&'static str> {
    if ok {
        Style::new().green().apply_to("✓")
    } else {
        Style::new().red().apply_to("✗")
    }
}
