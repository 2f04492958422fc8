//! Editor font derived from the host's `guifont` and `linespace` options.

use crate::value;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// One comma-separated font spec; `\,` does not split.
static FONT_SPEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\\,|[^,])+").expect("valid font spec pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FontDescriptor {
    pub face: String,
    /// Pixel height.
    pub size: u32,
    pub line_space: i64,
}

/// The parts of a `guifont` value the renderer uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuiFont {
    pub face: String,
    pub size: Option<u32>,
}

/// Parse `guifont`: only the first font spec counts, `face:attr:attr`, with
/// the height given by the first `h<number>` attribute.
///
/// ```text
/// "Menlo:h14"               -> Menlo, 14
/// "Fira\,Code:b:h12.6,Menlo" -> Fira,Code, 13
/// ```
pub fn parse_guifont(guifont: &str) -> GuiFont {
    let Some(spec) = FONT_SPEC.find(guifont) else {
        return GuiFont::default();
    };

    let mut parts = spec.as_str().trim().split(':');
    let face = parts.next().unwrap_or_default().replace("\\,", ",");
    let size = parts
        .find_map(|attr| attr.strip_prefix('h'))
        .and_then(|height| height.trim().parse::<f64>().ok())
        .map(f64::round)
        .filter(|height| height.is_finite() && *height >= 1.0 && *height <= u32::MAX as f64)
        .map(|height| height as u32);

    GuiFont { face, size }
}

/// Compute the font descriptor from the accumulated option table, falling
/// back to `defaults` for anything the host has not set.
pub fn derive_font(options: &IndexMap<String, Value>, defaults: &FontDescriptor) -> FontDescriptor {
    let guifont = options
        .get("guifont")
        .and_then(value::text)
        .map(|font| parse_guifont(&font))
        .unwrap_or_default();

    let line_space = options
        .get("linespace")
        .and_then(Value::as_i64)
        .unwrap_or(defaults.line_space);

    FontDescriptor {
        face: if guifont.face.is_empty() {
            defaults.face.clone()
        } else {
            guifont.face
        },
        size: guifont.size.unwrap_or(defaults.size),
        line_space,
    }
}
