//! Config directory discovery.

use std::path::PathBuf;

/// Application name for XDG directory resolution.
const APP_NAME: &str = "wapi";

/// Environment variable that overrides the config directory.
///
/// When set, this takes precedence over the platform default (XDG/Application Support).
/// Useful for testing and for keeping several independent setups.
pub const CONFIG_DIR_ENV: &str = "WAPI_CONFIG_DIR";

/// Get the XDG config directory for wapi.
///
/// Checks `WAPI_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/wapi` on Linux, `~/Library/Application Support/wapi` on macOS).
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
