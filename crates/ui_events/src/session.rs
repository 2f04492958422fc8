//! Per-session state the translator reads and updates.

use crate::event::{ModeInfo, RedrawEvent};
use crate::font::FontDescriptor;
use crate::surface::CursorShape;
use dispatch::CommandKind;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde_json::Value;

/// Cursor appearance for one editor mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorMode {
    pub shape: CursorShape,
    /// `None` when the host gave no highlight or highlight 0.
    pub hl_id: Option<u64>,
    pub cell_percentage: Option<u32>,
}

impl From<&ModeInfo> for CursorMode {
    fn from(info: &ModeInfo) -> Self {
        Self {
            shape: CursorShape::from_host(info.cursor_shape.as_ref().map(|s| s.0.as_str())),
            hl_id: info.attr_id.filter(|id| *id != 0),
            cell_percentage: info.cell_percentage,
        }
    }
}

/// Last command line seen, used to drop repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLineCache {
    pub active: bool,
    pub position: Option<u64>,
    pub text: Option<String>,
}

impl CommandLineCache {
    /// Back to the inactive state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub modes: FxHashMap<String, CursorMode>,
    pub options: IndexMap<String, Value>,
    pub command_line: CommandLineCache,
    pub last_command_kind: Option<CommandKind>,
    pub font: FontDescriptor,
    font_defaults: FontDescriptor,
}

impl SessionState {
    /// Start a session whose font is `font_defaults` until the host says
    /// otherwise.
    pub fn new(font_defaults: FontDescriptor) -> Self {
        Self {
            modes: FxHashMap::default(),
            options: IndexMap::new(),
            command_line: CommandLineCache::default(),
            last_command_kind: None,
            font: font_defaults.clone(),
            font_defaults,
        }
    }

    pub fn font_defaults(&self) -> &FontDescriptor {
        &self.font_defaults
    }

    /// Merge mode descriptors into the mode table, replacing same-named
    /// entries.
    pub fn set_modes(&mut self, modes: &[ModeInfo]) {
        for info in modes {
            self.modes.insert(info.name.0.clone(), CursorMode::from(info));
        }
    }

    /// A command line show that repeats the cached cursor position while
    /// the command line is still open carries nothing new.
    pub fn is_redundant(&self, event: &RedrawEvent) -> bool {
        match event {
            RedrawEvent::CmdlineShow(show) => {
                self.command_line.active && self.command_line.position == Some(show.position)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CmdlineShow;
    use crate::value::Text;

    fn session() -> SessionState {
        SessionState::new(FontDescriptor {
            face: "monospace".into(),
            size: 14,
            line_space: 0,
        })
    }

    fn show(position: u64) -> RedrawEvent {
        RedrawEvent::CmdlineShow(CmdlineShow {
            content: vec!["w".into()],
            position,
            first_char: ":".into(),
            ..CmdlineShow::default()
        })
    }

    #[test]
    fn inactive_cache_is_never_redundant() {
        let state = session();
        assert!(!state.is_redundant(&show(0)));
    }

    #[test]
    fn same_position_while_active_is_redundant() {
        let mut state = session();
        state.command_line.active = true;
        state.command_line.position = Some(1);

        assert!(state.is_redundant(&show(1)));
        assert!(!state.is_redundant(&show(2)));
        assert!(!state.is_redundant(&RedrawEvent::CmdlineHide));
    }

    #[test]
    fn reset_returns_to_inactive_state() {
        let mut cache = CommandLineCache {
            active: true,
            position: Some(4),
            text: Some("wq".into()),
        };
        cache.reset();
        assert_eq!(cache, CommandLineCache::default());
    }

    #[test]
    fn mode_info_with_zero_highlight_has_no_color() {
        let info = ModeInfo {
            name: Text("insert".into()),
            cursor_shape: Some(Text("vertical".into())),
            cell_percentage: Some(25),
            attr_id: Some(0),
            ..ModeInfo::default()
        };
        assert_eq!(
            CursorMode::from(&info),
            CursorMode {
                shape: CursorShape::Line,
                hl_id: None,
                cell_percentage: Some(25),
            }
        );
    }

    #[test]
    fn set_modes_overwrites_by_name() {
        let mut state = session();
        let normal = |shape: &str| ModeInfo {
            name: Text("normal".into()),
            cursor_shape: Some(Text(shape.into())),
            ..ModeInfo::default()
        };

        state.set_modes(&[normal("block")]);
        state.set_modes(&[normal("horizontal")]);

        assert_eq!(state.modes.len(), 1);
        assert_eq!(state.modes["normal"].shape, CursorShape::Underline);
    }
}
