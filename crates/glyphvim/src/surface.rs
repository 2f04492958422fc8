use highlight::Rgb;
use ui_events::{CursorShape, FontDescriptor, RenderSurface};

/// Render surface for headless runs: every call becomes a log line.
#[derive(Debug, Default)]
pub struct TracingSurface;

impl RenderSurface for TracingSurface {
    fn set_cursor_shape(&mut self, shape: CursorShape, cell_percentage: Option<u32>) {
        tracing::info!(?shape, ?cell_percentage, "cursor shape");
    }

    fn set_cursor_color(&mut self, color: Rgb) {
        tracing::info!(%color, "cursor color");
    }

    fn regenerate_font_atlas(&mut self, font: &FontDescriptor) {
        tracing::info!(
            face = %font.face,
            size = font.size,
            line_space = font.line_space,
            "font atlas"
        );
    }

    fn update_cell_size(&mut self) {
        tracing::debug!("cell size");
    }

    fn resize(&mut self) {
        tracing::debug!("resize");
    }
}
