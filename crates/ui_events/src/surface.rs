//! Seam to the rendering/window layer.

use crate::font::FontDescriptor;
use highlight::Rgb;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorShape {
    #[default]
    Block,
    Underline,
    Line,
}

impl CursorShape {
    /// Map the host's `cursor_shape` tag. Unknown or missing tags draw a block.
    pub fn from_host(tag: Option<&str>) -> Self {
        match tag {
            Some("horizontal") => Self::Underline,
            Some("vertical") => Self::Line,
            _ => Self::Block,
        }
    }
}

/// Mutators the translator drives on the renderer.
///
/// `regenerate_font_atlas` is expensive; it is only called when the derived
/// font descriptor actually changed.
#[cfg_attr(test, mockall::automock)]
pub trait RenderSurface {
    fn set_cursor_shape(&mut self, shape: CursorShape, cell_percentage: Option<u32>);

    fn set_cursor_color(&mut self, color: Rgb);

    fn regenerate_font_atlas(&mut self, font: &FontDescriptor);

    fn update_cell_size(&mut self);

    fn resize(&mut self);
}
