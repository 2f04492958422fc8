//! TOML config file support.
//!
//! Config location: `~/.config/glyphvim/config.toml`

use crate::constants;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User-facing config parsed from TOML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Font face used until the host sets `guifont`.
    pub font_family: String,
    /// Font size in pixels used until `guifont` carries a height.
    pub font_size: u32,
    /// Line spacing used until the host sets `linespace`.
    pub line_space: i64,
    /// Number of messages kept in the message log.
    pub message_history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_family: constants::font::FAMILY.to_string(),
            font_size: constants::font::DEFAULT_SIZE,
            line_space: constants::font::DEFAULT_LINE_SPACE,
            message_history: constants::messages::DEFAULT_HISTORY,
        }
    }
}

impl Config {
    /// Clamp values into their accepted ranges.
    pub fn sanitized(mut self) -> Self {
        let family = self.font_family.trim();
        if family.is_empty() || family.len() > constants::settings::MAX_STRING_LENGTH {
            tracing::warn!("Ignoring font-family {:?}", self.font_family);
            self.font_family = constants::font::FAMILY.to_string();
        } else if family.len() != self.font_family.len() {
            self.font_family = family.to_string();
        }

        self.font_size = self
            .font_size
            .clamp(constants::font::MIN_SIZE, constants::font::MAX_SIZE);
        self.message_history = self
            .message_history
            .min(constants::messages::MAX_HISTORY);
        self
    }
}

/// Default config file content with comments (generated on first launch).
const DEFAULT_CONFIG: &str = r#"# glyphvim configuration

# Font used until the editor sets 'guifont'
font-family = "FONT_PLACEHOLDER"

# Font size in pixels used until 'guifont' carries a height (:h14)
font-size = 14

# Extra pixels between lines until the editor sets 'linespace'
line-space = 0

# Messages kept in the message log
message-history = 100
"#;

/// Return the config file path.
pub fn config_path() -> PathBuf {
    glyphvim_paths::config_file()
}

/// Ensure the config file exists, creating a default if missing.
/// Returns the path to the config file.
pub fn ensure_config_file() -> Option<PathBuf> {
    let path = config_path();
    if !path.exists() {
        let parent = path.parent()?;
        std::fs::create_dir_all(parent).ok()?;

        let content = DEFAULT_CONFIG.replace("FONT_PLACEHOLDER", constants::font::FAMILY);
        std::fs::write(&path, content).ok()?;
        tracing::info!("Created default config at {:?}", path);
    }
    Some(path)
}

/// Load and parse the config file. Returns default on any error.
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

/// Load and parse a specific config file. Returns default on any error.
pub fn load_config_from(path: &Path) -> Config {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read config: {}", e);
            }
            return Config::default();
        }
    };

    // Size guard
    if content.len() > constants::settings::MAX_FILE_SIZE as usize {
        tracing::warn!(
            "Config file too large ({} bytes), using defaults",
            content.len()
        );
        return Config::default();
    }

    match toml::from_str::<Config>(&content) {
        Ok(cfg) => cfg.sanitized(),
        Err(e) => {
            tracing::warn!("Failed to parse config.toml: {}", e);
            Config::default()
        }
    }
}
