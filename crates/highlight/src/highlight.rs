//! Highlight attribute table.
//!
//! The host defines highlight groups by numeric id (`hl_attr_define`) and
//! announces session-wide defaults (`default_colors_set`). Everything that
//! needs a color for an id (cursor coloring, popup styling) resolves it here.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 24-bit RGB color as sent by the host (`0xRRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "u32")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Host encoding of an optional color: negative means "not set".
    pub fn from_host(value: i64) -> Option<Self> {
        u32::try_from(value).ok().map(Self::from_u32)
    }
}

impl From<u32> for Rgb {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Attributes of one highlight id, in the host's RGB attribute form.
///
/// Unknown keys (`blend`, `nocombine`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
    pub special: Option<Rgb>,
    pub reverse: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub undercurl: bool,
    pub strikethrough: bool,
}

/// Session default colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultColors {
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
    pub special: Option<Rgb>,
}

/// Effective colors of a highlight id after defaults and `reverse`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColors {
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
    pub special: Option<Rgb>,
}

#[derive(Debug, Default)]
pub struct HighlightTable {
    entries: FxHashMap<u64, Highlight>,
    defaults: DefaultColors,
}

impl HighlightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, id: u64, highlight: Highlight) {
        self.entries.insert(id, highlight);
    }

    pub fn set_defaults(&mut self, defaults: DefaultColors) {
        tracing::debug!(
            foreground = ?defaults.foreground,
            background = ?defaults.background,
            "default colors set"
        );
        self.defaults = defaults;
    }

    pub fn defaults(&self) -> DefaultColors {
        self.defaults
    }

    pub fn get(&self, id: u64) -> Option<&Highlight> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the colors drawn for `id`.
    ///
    /// Id 0 and unknown ids resolve to the defaults.
    pub fn resolve(&self, id: u64) -> ResolvedColors {
        let Some(highlight) = self.entries.get(&id) else {
            return ResolvedColors {
                foreground: self.defaults.foreground,
                background: self.defaults.background,
                special: self.defaults.special,
            };
        };

        let foreground = highlight.foreground.or(self.defaults.foreground);
        let background = highlight.background.or(self.defaults.background);
        let special = highlight.special.or(self.defaults.special);

        if highlight.reverse {
            ResolvedColors {
                foreground: background,
                background: foreground,
                special,
            }
        } else {
            ResolvedColors {
                foreground,
                background,
                special,
            }
        }
    }

    /// Background color for a defined id, `None` for unknown ids.
    pub fn background(&self, id: u64) -> Option<Rgb> {
        if !self.entries.contains_key(&id) {
            return None;
        }
        self.resolve(id).background
    }
}
