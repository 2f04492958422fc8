//! Centralized configuration constants for glyphvim.
//!
//! Organized by component. Values that users may override live in
//! [`crate::Config`]; these are the defaults and hard limits.

/// Editor font defaults, used until the host sets `guifont`/`linespace`.
pub mod font {
    /// Default font size in pixels.
    pub const DEFAULT_SIZE: u32 = 14;
    /// Minimum accepted font size.
    pub const MIN_SIZE: u32 = 6;
    /// Maximum accepted font size.
    pub const MAX_SIZE: u32 = 72;
    /// Extra pixels between lines.
    pub const DEFAULT_LINE_SPACE: i64 = 0;

    /// Default monospace font family (macOS).
    #[cfg(target_os = "macos")]
    pub const FAMILY: &str = "Menlo";

    /// Default monospace font family (Windows).
    #[cfg(target_os = "windows")]
    pub const FAMILY: &str = "Consolas";

    /// Default monospace font family (Linux and others).
    /// "monospace" is the generic family that always resolves to something.
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    pub const FAMILY: &str = "monospace";
}

/// Buffer switcher panel.
pub mod buffer_switcher {
    /// Rows shown at once; navigation wraps inside this window.
    pub const VISIBLE_ITEMS: usize = 10;
    /// Shown when the host reports no other buffers.
    pub const EMPTY_MESSAGE: &str = "no other buffers :(";
}

/// Message log.
pub mod messages {
    /// Messages kept by default.
    pub const DEFAULT_HISTORY: usize = 100;
    /// Upper bound for the configurable history.
    pub const MAX_HISTORY: usize = 10_000;
}

/// Settings file validation limits.
pub mod settings {
    /// Maximum settings file size in bytes (64 KB).
    pub const MAX_FILE_SIZE: u64 = 64 * 1024;

    /// Maximum length for string fields (font family).
    pub const MAX_STRING_LENGTH: usize = 256;
}
