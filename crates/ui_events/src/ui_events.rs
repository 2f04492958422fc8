//! Event translator for the host editor's external UI protocol.
//!
//! Decoded `redraw` notifications come in as `serde_json::Value` trees and
//! leave as [`RenderSurface`] calls, [`HighlightTable`](highlight::HighlightTable)
//! updates and publications on [`Dispatch`](dispatch::Dispatch) channels.
//! All mutable session data lives in [`SessionState`].

pub mod event;
pub mod font;
pub mod session;
pub mod surface;
pub mod translate;
pub mod value;

pub use event::{decode_entry, CmdlineShow, MessageChunk, ModeInfo, RedrawEvent};
pub use font::{derive_font, parse_guifont, FontDescriptor, GuiFont};
pub use session::{CommandLineCache, CursorMode, SessionState};
pub use surface::{CursorShape, RenderSurface};
pub use translate::{
    command_kind, handle_event, handle_notification, handle_redraw, message_kind, translate,
    UiContext,
};
