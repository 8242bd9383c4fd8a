//! Client configuration for the wapi CLI.
//!
//! Kubeconfig-style YAML with named contexts, each bundling:
//! - the server base URL
//! - where to find the API key (inline, file or environment variable)
//! - an optional request timeout
//!
//! `current-context` selects the default. The file lives in the user config
//! directory (`$WAPI_CONFIG_DIR` or the platform default).

pub mod client;
pub mod discovery;
pub mod error;

pub use client::{
    client_config_path, load_client_config, load_client_config_from, save_client_config,
    save_client_config_to, AuthConfig, ClientConfig, ClientDefaults, Context,
};
pub use discovery::xdg_config_dir;
pub use error::{ConfigError, Result};
