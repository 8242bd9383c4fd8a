//! wapi - command-line client for the WhatsApp MCP API
//!
//! Main entry point for the wapi CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{
    check, config, conversations, demo, info, messages, read, resources, send, status, tools,
};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// wapi - command-line client for the WhatsApp MCP API
#[derive(Parser)]
#[command(name = "wapi")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    // Top-level only: `config set-context` defines its own --server and --api-key.
    /// Server URL (default: http://localhost:8000)
    #[arg(long, env = "WAPI_SERVER_URL")]
    pub server: Option<String>,

    /// API key sent as X-API-Key
    #[arg(long, env = "WAPI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Use a named context from the client config instead of the current one
    #[arg(long, global = true)]
    pub context: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server name, version and capabilities
    Info(info::InfoArgs),

    /// List the tools the server exposes
    Tools(tools::ToolsArgs),

    /// Show the WhatsApp connection status
    Status(status::StatusArgs),

    /// Check whether a number is on WhatsApp
    Check(check::CheckArgs),

    /// Send a text message
    Send(send::SendArgs),

    /// Show recent messages with a number
    Messages(messages::MessagesArgs),

    /// List recent conversations
    Conversations(conversations::ConversationsArgs),

    /// Mark messages from a number as read
    Read(read::ReadArgs),

    /// List or read server resources
    Resources(resources::ResourcesArgs),

    /// Walk through the API: info, tools, status, a number check and conversations
    Demo(demo::DemoArgs),

    /// Manage connection contexts
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: console (human-readable, stderr) + rotating JSON file
    let filter = if cli.verbose {
        "wapi=debug,wapi_client=debug,wapi_config=debug,info"
    } else {
        "wapi=info,wapi_client=info,warn"
    };

    let file_appender = wapi_config::xdg_config_dir().and_then(|dir| {
        tracing_appender::rolling::RollingFileAppender::builder()
            .rotation(tracing_appender::rolling::Rotation::DAILY)
            .filename_prefix("wapi.log")
            .build(dir.join("logs"))
            .ok()
    });
    let (file_writer, _guard) = match file_appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
                ),
        )
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "wapi=trace,wapi_client=trace,wapi_config=trace,info",
                ))
        }))
        .init();

    // Config commands manage contexts and never talk to the server
    if let Commands::Config(args) = cli.command {
        return config::run(args).await;
    }

    let ctx = commands::Context::resolve(
        cli.server,
        cli.api_key,
        cli.context.as_deref(),
        cli.json,
        cli.verbose,
    )?;
    tracing::debug!(server = %ctx.server_url, context = ?ctx.context_name, "resolved connection");

    // Dispatch to command handlers
    match cli.command {
        Commands::Info(args) => info::run(args, &ctx).await,
        Commands::Tools(args) => tools::run(args, &ctx).await,
        Commands::Status(args) => status::run(args, &ctx).await,
        Commands::Check(args) => check::run(args, &ctx).await,
        Commands::Send(args) => send::run(args, &ctx).await,
        Commands::Messages(args) => messages::run(args, &ctx).await,
        Commands::Conversations(args) => conversations::run(args, &ctx).await,
        Commands::Read(args) => read::run(args, &ctx).await,
        Commands::Resources(args) => resources::run(args, &ctx).await,
        Commands::Demo(args) => demo::run(args, &ctx).await,
        Commands::Config(_) => unreachable!("handled above"),
    }
}
