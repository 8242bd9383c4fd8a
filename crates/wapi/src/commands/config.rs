//! Config command - connection context management.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};

use wapi_config::{AuthConfig, Context as ClientContext};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show configuration file path
    Path,

    /// Show the current context name
    CurrentContext,

    /// List available contexts
    GetContexts,

    /// Switch to a different context
    UseContext {
        /// Context name to switch to
        name: String,
    },

    /// Create or update a context
    SetContext {
        /// Context name
        name: String,

        /// Server URL (e.g., http://localhost:8000)
        #[arg(long)]
        server: Option<String>,

        /// Store the API key in the config file
        #[arg(long, conflicts_with_all = ["key_file", "key_env"])]
        api_key: Option<String>,

        /// Read the API key from this file
        #[arg(long, conflicts_with = "key_env")]
        key_file: Option<PathBuf>,

        /// Read the API key from this environment variable
        #[arg(long)]
        key_env: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete a context
    DeleteContext {
        /// Context name to delete
        name: String,
    },
}

/// Run the config command.
pub async fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Path => cmd_path().await,
        ConfigCommand::CurrentContext => cmd_current_context().await,
        ConfigCommand::GetContexts => cmd_get_contexts().await,
        ConfigCommand::UseContext { name } => cmd_use_context(&name).await,
        ConfigCommand::SetContext {
            name,
            server,
            api_key,
            key_file,
            key_env,
            timeout,
        } => {
            let auth = match (api_key, key_file, key_env) {
                (Some(key), _, _) => Some(AuthConfig::api_key(key)),
                (None, Some(path), _) => Some(AuthConfig::api_key_file(path)),
                (None, None, Some(var)) => Some(AuthConfig::api_key_env(var)),
                (None, None, None) => None,
            };
            cmd_set_context(&name, server, auth, timeout).await
        }
        ConfigCommand::DeleteContext { name } => cmd_delete_context(&name).await,
    }
}

async fn cmd_path() -> Result<()> {
    match wapi_config::client_config_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("Could not determine config directory."),
    }
    Ok(())
}

async fn cmd_current_context() -> Result<()> {
    let config = wapi_config::load_client_config()?;

    match &config.current_context {
        Some(name) => {
            println!("{}", name);
        }
        None => {
            println!("No current context set. Use 'wapi config use-context <name>' to set one.");
        }
    }

    Ok(())
}

async fn cmd_get_contexts() -> Result<()> {
    let config = wapi_config::load_client_config()?;

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!();
        println!("Create one with:");
        println!("  wapi config set-context local --server=http://localhost:8000 --key-env=WAPI_API_KEY");
        return Ok(());
    }

    let current = config.current_context.as_deref();

    println!("CURRENT   NAME            AUTH       SERVER");
    for ctx in &config.contexts {
        let marker = if current == Some(ctx.name.as_str()) {
            "*"
        } else {
            " "
        };
        let auth = match &ctx.auth {
            Some(AuthConfig::ApiKey { key: Some(_), .. }) => "inline",
            Some(AuthConfig::ApiKey { key_file: Some(_), .. }) => "file",
            Some(AuthConfig::ApiKey { key_env: Some(_), .. }) => "env",
            _ => "none",
        };
        println!("{}         {:<15} {:<10} {}", marker, ctx.name, auth, ctx.server);
    }

    Ok(())
}

async fn cmd_use_context(name: &str) -> Result<()> {
    let mut config = wapi_config::load_client_config()?;

    config.use_context(name)?;
    wapi_config::save_client_config(&config)?;

    println!("Switched to context \"{}\".", name);

    Ok(())
}

async fn cmd_set_context(
    name: &str,
    server: Option<String>,
    auth: Option<AuthConfig>,
    timeout: Option<u64>,
) -> Result<()> {
    let mut config = wapi_config::load_client_config()?;

    match config.get_context_mut(name) {
        Some(ctx) => {
            if let Some(url) = server {
                ctx.server = url;
            }
            if let Some(auth) = auth {
                ctx.auth = Some(auth);
            }
            if let Some(t) = timeout {
                ctx.timeout = Some(t);
            }

            println!("Context \"{}\" modified.", name);
        }
        None => {
            // Server is required for a new context
            let server_url = server
                .ok_or_else(|| anyhow!("--server is required when creating a new context"))?;

            let mut ctx = ClientContext::new(name, server_url);
            if let Some(auth) = auth {
                ctx = ctx.with_auth(auth);
            }
            if let Some(t) = timeout {
                ctx = ctx.with_timeout(t);
            }

            config.set_context(ctx);
            println!("Context \"{}\" created.", name);
        }
    }

    // If this is the first context, make it current
    if config.current_context.is_none() && config.contexts.len() == 1 {
        config.current_context = Some(name.to_string());
        println!("Context \"{}\" set as current context.", name);
    }

    wapi_config::save_client_config(&config)?;
    tracing::debug!(context = name, "saved client config");

    Ok(())
}

async fn cmd_delete_context(name: &str) -> Result<()> {
    let mut config = wapi_config::load_client_config()?;

    match config.remove_context(name) {
        Some(_) => {
            wapi_config::save_client_config(&config)?;
            println!("Context \"{}\" deleted.", name);
            if config.current_context.is_none() {
                println!(
                    "Note: No current context. Use 'wapi config use-context <name>' to set one."
                );
            }
        }
        None => {
            println!("Context \"{}\" not found.", name);
        }
    }

    Ok(())
}
