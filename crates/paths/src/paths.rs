//! Centralized path management for glyphvim.
//!
//! The config directory is resolved once and cached. `GLYPHVIM_CONFIG_DIR`
//! overrides it.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable that relocates the config directory.
pub const CONFIG_DIR_ENV: &str = "GLYPHVIM_CONFIG_DIR";

const APP_DIR: &str = "glyphvim";

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// ~/.config/glyphvim (or platform equivalent)
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| resolve_config_dir(std::env::var_os(CONFIG_DIR_ENV)))
}

fn resolve_config_dir(overridden: Option<OsString>) -> PathBuf {
    match overridden.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR),
    }
}

/// Config file path: config_dir()/config.toml
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
