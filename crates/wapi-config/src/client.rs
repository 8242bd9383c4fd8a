//! Client configuration for connecting to WhatsApp MCP servers.
//!
//! Implements a kubeconfig-style configuration with named contexts:
//!
//! ```yaml
//! api-version: v1
//! kind: ClientConfig
//!
//! current-context: local
//!
//! contexts:
//!   - name: local
//!     server: http://localhost:8000
//!     auth:
//!       type: api-key
//!       key-env: WAPI_API_KEY
//!   - name: prod
//!     server: https://wa.example.com
//!     auth:
//!       type: api-key
//!       key-file: ~/.config/wapi/keys/prod.key
//!     timeout: 30
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Client Config
// ─────────────────────────────────────────────────────────────────────────────

/// API version for the client config file format.
pub const API_VERSION: &str = "v1";

/// Kind identifier for client config files.
pub const KIND: &str = "ClientConfig";

/// Default config filename.
const CLIENT_CONFIG_FILE: &str = "client.yaml";

/// Root client configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientConfig {
    /// API version (always "v1" currently).
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Config kind (always "ClientConfig").
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Name of the current/default context.
    #[serde(default)]
    pub current_context: Option<String>,

    /// Named connection contexts.
    #[serde(default)]
    pub contexts: Vec<Context>,

    /// Default settings applied to all contexts.
    #[serde(default)]
    pub defaults: ClientDefaults,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

impl ClientConfig {
    /// Create an empty client config.
    pub fn new() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            ..Default::default()
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_str).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Get the current context, if set and valid.
    pub fn current(&self) -> Option<&Context> {
        self.current_context
            .as_ref()
            .and_then(|name| self.get_context(name))
    }

    /// Get a context by name.
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Get a mutable context by name.
    pub fn get_context_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn set_context(&mut self, context: Context) {
        if let Some(existing) = self.get_context_mut(&context.name) {
            *existing = context;
        } else {
            self.contexts.push(context);
        }
    }

    /// Remove a context by name.
    pub fn remove_context(&mut self, name: &str) -> Option<Context> {
        let pos = self.contexts.iter().position(|c| c.name == name)?;
        if self.current_context.as_deref() == Some(name) {
            self.current_context = None;
        }
        Some(self.contexts.remove(pos))
    }

    /// Set the current context by name.
    ///
    /// Returns an error if the context doesn't exist.
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        if self.get_context(name).is_some() {
            self.current_context = Some(name.to_string());
            Ok(())
        } else {
            Err(ConfigError::ContextNotFound(name.to_string()))
        }
    }

    /// List all context names.
    pub fn context_names(&self) -> Vec<&str> {
        self.contexts.iter().map(|c| c.name.as_str()).collect()
    }

    /// Effective timeout in seconds for a context, falling back to defaults.
    pub fn timeout_for(&self, context: &Context) -> Option<u64> {
        context.timeout.or(self.defaults.timeout)
    }

    /// Whether any context stores its API key in the file itself.
    pub fn has_inline_keys(&self) -> bool {
        self.contexts.iter().any(|c| {
            matches!(
                &c.auth,
                Some(AuthConfig::ApiKey { key: Some(key), .. }) if !key.is_empty()
            )
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// A named connection context (server + auth bundle).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Context {
    /// Unique name for this context.
    pub name: String,

    /// Server base URL (e.g., "http://localhost:8000").
    pub server: String,

    /// Where the API key comes from.
    #[serde(default)]
    pub auth: Option<AuthConfig>,

    /// Request timeout override (seconds).
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Context {
    /// Create a new context with just a name and server URL.
    pub fn new(name: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            auth: None,
            timeout: None,
        }
    }

    /// Set the auth configuration.
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve this context's API key, if it has one.
    pub fn api_key(&self) -> Result<Option<String>> {
        match &self.auth {
            Some(auth) => auth.resolve(),
            None => Ok(None),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authentication
// ─────────────────────────────────────────────────────────────────────────────

/// Authentication configuration for a context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AuthConfig {
    /// No authentication.
    None,

    /// API key sent as `X-API-Key`.
    #[serde(rename_all = "kebab-case")]
    ApiKey {
        /// The key itself, stored in plain text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// Path to file containing the API key.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_file: Option<PathBuf>,
        /// Environment variable containing the API key.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_env: Option<String>,
    },
}

impl AuthConfig {
    /// Create API key auth with the key stored inline.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey {
            key: Some(key.into()),
            key_file: None,
            key_env: None,
        }
    }

    /// Create API key auth referencing a file.
    pub fn api_key_file(path: impl Into<PathBuf>) -> Self {
        Self::ApiKey {
            key: None,
            key_file: Some(path.into()),
            key_env: None,
        }
    }

    /// Create API key auth referencing an environment variable.
    pub fn api_key_env(var: impl Into<String>) -> Self {
        Self::ApiKey {
            key: None,
            key_file: None,
            key_env: Some(var.into()),
        }
    }

    /// Resolve the actual credential value.
    ///
    /// Tries the inline key, then the key file, then the environment variable.
    /// A configured key file that does not exist is skipped.
    pub fn resolve(&self) -> Result<Option<String>> {
        match self {
            AuthConfig::None => Ok(None),

            AuthConfig::ApiKey {
                key,
                key_file,
                key_env,
            } => {
                if let Some(key) = key.as_deref().filter(|k| !k.is_empty()) {
                    return Ok(Some(key.to_string()));
                }
                if let Some(path) = key_file {
                    let expanded = expand_path(path);
                    if expanded.exists() {
                        let key = std::fs::read_to_string(&expanded)
                            .map_err(|e| ConfigError::ReadFile {
                                path: expanded.display().to_string(),
                                source: e,
                            })?
                            .trim()
                            .to_string();
                        return Ok(Some(key));
                    }
                }
                if let Some(var) = key_env
                    && let Ok(key) = std::env::var(var)
                    && !key.is_empty()
                {
                    return Ok(Some(key));
                }
                Ok(None)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default settings applied to all contexts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientDefaults {
    /// Default request timeout in seconds; unset means no timeout.
    pub timeout: Option<u64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading / Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Get the path to the client config file.
pub fn client_config_path() -> Option<PathBuf> {
    crate::xdg_config_dir().map(|d| d.join(CLIENT_CONFIG_FILE))
}

/// Load the client configuration.
///
/// Returns a default config if the file doesn't exist.
pub fn load_client_config() -> Result<ClientConfig> {
    load_client_config_from(client_config_path().as_deref())
}

/// Load client config from a specific path.
pub fn load_client_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::new());
    };

    if !path.exists() {
        return Ok(ClientConfig::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    ClientConfig::from_yaml(&contents)
}

/// Save the client configuration.
pub fn save_client_config(config: &ClientConfig) -> Result<()> {
    let path = client_config_path()
        .ok_or_else(|| ConfigError::Other("Could not determine config directory".to_string()))?;
    save_client_config_to(config, &path)
}

/// Save client config to a specific path.
///
/// On Unix the file is restricted to its owner (0600) when it carries an
/// inline API key.
pub fn save_client_config_to(config: &ClientConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = config.to_yaml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if config.has_inline_keys() {
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms).map_err(|e| ConfigError::WriteFile {
                path: path.display().to_string(),
                source: e,
            })?;
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Expand ~ to home directory in paths.
fn expand_path(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/"))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config() {
        let config = ClientConfig::new();
        assert_eq!(config.api_version, API_VERSION);
        assert_eq!(config.kind, KIND);
        assert!(config.current_context.is_none());
        assert!(config.contexts.is_empty());
        assert!(config.defaults.timeout.is_none());
    }

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
api-version: v1
kind: ClientConfig
current-context: local
contexts:
  - name: local
    server: http://localhost:8000
"#;
        let config = ClientConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.current_context.as_deref(), Some("local"));
        assert_eq!(config.contexts.len(), 1);
        assert_eq!(config.contexts[0].server, "http://localhost:8000");
        assert!(config.contexts[0].api_key().unwrap().is_none());
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
api-version: v1
kind: ClientConfig
current-context: prod

contexts:
  - name: local
    server: http://localhost:8000
    auth:
      type: api-key
      key: wapi_local

  - name: prod
    server: https://wa.example.com
    auth:
      type: api-key
      key-file: ~/.config/wapi/keys/prod.key
    timeout: 60

  - name: open
    server: http://10.0.0.5:8000
    auth:
      type: none

defaults:
  timeout: 30
"#;
        let config = ClientConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.current().unwrap().name, "prod");
        assert_eq!(config.contexts.len(), 3);

        let local = config.get_context("local").unwrap();
        assert_eq!(local.api_key().unwrap().as_deref(), Some("wapi_local"));
        assert_eq!(config.timeout_for(local), Some(30));

        let prod = config.get_context("prod").unwrap();
        assert_eq!(config.timeout_for(prod), Some(60));
        match &prod.auth {
            Some(AuthConfig::ApiKey { key_file, .. }) => {
                assert_eq!(
                    key_file.as_ref().unwrap().to_str().unwrap(),
                    "~/.config/wapi/keys/prod.key"
                );
            }
            _ => panic!("Expected ApiKey auth"),
        }

        let open = config.get_context("open").unwrap();
        assert!(matches!(open.auth, Some(AuthConfig::None)));
        assert!(open.api_key().unwrap().is_none());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ClientConfig::from_yaml("contexts: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::ParseYaml(_)));
    }

    #[test]
    fn test_set_context() {
        let mut config = ClientConfig::new();

        config.set_context(Context::new("local", "http://localhost:8000"));
        assert_eq!(config.contexts.len(), 1);

        config.set_context(Context::new("local", "http://localhost:9000"));
        assert_eq!(config.contexts.len(), 1);
        assert_eq!(config.contexts[0].server, "http://localhost:9000");
    }

    #[test]
    fn test_remove_context() {
        let mut config = ClientConfig::new();
        config.set_context(Context::new("local", "http://localhost:8000"));
        config.set_context(Context::new("remote", "https://wa.example.com"));
        config.current_context = Some("local".to_string());

        let removed = config.remove_context("remote").unwrap();
        assert_eq!(removed.name, "remote");
        assert_eq!(config.contexts.len(), 1);
        assert_eq!(config.current_context.as_deref(), Some("local"));

        // Removing the current context clears the selection
        config.remove_context("local");
        assert!(config.current_context.is_none());

        assert!(config.remove_context("missing").is_none());
    }

    #[test]
    fn test_use_context() {
        let mut config = ClientConfig::new();
        config.set_context(Context::new("local", "http://localhost:8000"));

        config.use_context("local").unwrap();
        assert_eq!(config.current_context.as_deref(), Some("local"));

        let err = config.use_context("nonexistent").unwrap_err();
        assert!(matches!(err, ConfigError::ContextNotFound(_)));
    }

    #[test]
    fn test_context_names() {
        let mut config = ClientConfig::new();
        config.set_context(Context::new("local", "http://localhost:8000"));
        config.set_context(Context::new("remote", "https://wa.example.com"));

        assert_eq!(config.context_names(), vec!["local", "remote"]);
    }

    #[test]
    fn test_auth_resolution_order() {
        let dir = TempDir::new().unwrap();
        let key_path = dir.path().join("prod.key");
        std::fs::write(&key_path, "wapi_from_file\n").unwrap();

        let inline_wins = AuthConfig::ApiKey {
            key: Some("wapi_inline".to_string()),
            key_file: Some(key_path.clone()),
            key_env: None,
        };
        assert_eq!(inline_wins.resolve().unwrap().as_deref(), Some("wapi_inline"));

        let file = AuthConfig::api_key_file(&key_path);
        assert_eq!(file.resolve().unwrap().as_deref(), Some("wapi_from_file"));

        let missing_file = AuthConfig::api_key_file(dir.path().join("absent.key"));
        assert!(missing_file.resolve().unwrap().is_none());

        let unset_env = AuthConfig::api_key_env("WAPI_TEST_KEY_THAT_IS_NEVER_SET");
        assert!(unset_env.resolve().unwrap().is_none());
    }

    #[test]
    fn test_roundtrip_yaml() {
        let mut config = ClientConfig::new();
        config.set_context(Context::new("local", "http://localhost:8000").with_timeout(30));
        config.set_context(
            Context::new("remote", "https://wa.example.com")
                .with_auth(AuthConfig::api_key_env("WAPI_REMOTE_KEY")),
        );
        config.current_context = Some("local".to_string());

        let yaml = config.to_yaml().unwrap();
        let reparsed = ClientConfig::from_yaml(&yaml).unwrap();

        assert_eq!(reparsed.current_context, config.current_context);
        assert_eq!(reparsed.context_names(), config.context_names());
        assert_eq!(reparsed.get_context("local").unwrap().timeout, Some(30));
        match &reparsed.get_context("remote").unwrap().auth {
            Some(AuthConfig::ApiKey { key_env, key, .. }) => {
                assert_eq!(key_env.as_deref(), Some("WAPI_REMOTE_KEY"));
                assert!(key.is_none());
            }
            _ => panic!("Expected ApiKey auth"),
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("client.yaml");

        let mut config = ClientConfig::new();
        config.set_context(Context::new("local", "http://localhost:8000"));
        config.use_context("local").unwrap();
        save_client_config_to(&config, &path).unwrap();

        let loaded = load_client_config_from(Some(&path)).unwrap();
        assert_eq!(loaded.current().unwrap().server, "http://localhost:8000");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = load_client_config_from(Some(&dir.path().join("client.yaml"))).unwrap();
        assert!(loaded.contexts.is_empty());

        let loaded = load_client_config_from(None).unwrap();
        assert!(loaded.contexts.is_empty());
    }

    #[test]
    fn test_has_inline_keys() {
        let mut config = ClientConfig::new();
        config.set_context(
            Context::new("env", "http://localhost:8000")
                .with_auth(AuthConfig::api_key_env("WAPI_API_KEY")),
        );
        assert!(!config.has_inline_keys());

        config.set_context(
            Context::new("inline", "http://localhost:8000")
                .with_auth(AuthConfig::api_key("wapi_inline")),
        );
        assert!(config.has_inline_keys());
    }

    #[cfg(unix)]
    #[test]
    fn test_inline_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.yaml");

        let mut config = ClientConfig::new();
        config.set_context(
            Context::new("local", "http://localhost:8000")
                .with_auth(AuthConfig::api_key("wapi_inline")),
        );
        save_client_config_to(&config, &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
