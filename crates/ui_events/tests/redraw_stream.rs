//! End-to-end runs of recorded redraw notifications through the translator.

use dispatch::{
    CommandKind, CommandLineEvent, CommandUpdate, Dispatch, Message, MessageKind, VimMode,
};
use highlight::{HighlightTable, Rgb};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use ui_events::{
    handle_notification, CursorShape, FontDescriptor, RenderSurface, SessionState, UiContext,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Shape(CursorShape, Option<u32>),
    Color(Rgb),
    Atlas(FontDescriptor),
    CellSize,
    Resize,
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Call>,
}

impl RenderSurface for RecordingSurface {
    fn set_cursor_shape(&mut self, shape: CursorShape, cell_percentage: Option<u32>) {
        self.calls.push(Call::Shape(shape, cell_percentage));
    }

    fn set_cursor_color(&mut self, color: Rgb) {
        self.calls.push(Call::Color(color));
    }

    fn regenerate_font_atlas(&mut self, font: &FontDescriptor) {
        self.calls.push(Call::Atlas(font.clone()));
    }

    fn update_cell_size(&mut self) {
        self.calls.push(Call::CellSize);
    }

    fn resize(&mut self) {
        self.calls.push(Call::Resize);
    }
}

struct Session {
    state: SessionState,
    highlights: HighlightTable,
    dispatch: Dispatch,
    surface: RecordingSurface,
}

impl Session {
    fn new() -> Self {
        Self {
            state: SessionState::new(FontDescriptor {
                face: "monospace".into(),
                size: 14,
                line_space: 0,
            }),
            highlights: HighlightTable::new(),
            dispatch: Dispatch::new(),
            surface: RecordingSurface::default(),
        }
    }

    fn notify(&mut self, method: &str, params: Value) {
        let mut ctx = UiContext {
            surface: &mut self.surface,
            highlights: &mut self.highlights,
            dispatch: &self.dispatch,
        };
        handle_notification(method, &params, &mut self.state, &mut ctx);
    }
}

fn record<T: Clone + Send + 'static>(channel: &mut dispatch::Channel<T>) -> Arc<Mutex<Vec<T>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    channel.subscribe(move |payload: &T| sink.lock().push(payload.clone()));
    seen
}

#[test]
fn startup_batch_sets_font_modes_and_colors() {
    let mut session = Session::new();
    let modes = record(&mut session.dispatch.mode);

    session.notify(
        "redraw",
        json!([
            ["option_set", ["guifont", "JetBrains Mono:h13"], ["linespace", 1], ["ruler", true]],
            ["default_colors_set", [0xd0d0d0, 0x1c1c1c, -1, 252, 234]],
            ["hl_attr_define", [12, { "background": 0x88c0d0 }, {}, []]],
            ["mode_info_set", [true, [
                { "name": "normal", "short_name": 110, "cursor_shape": "block", "attr_id": 12 },
                {
                    "name": "insert",
                    "short_name": 105,
                    "cursor_shape": "vertical",
                    "cell_percentage": 25,
                    "attr_id": 12
                },
                {
                    "name": "replace",
                    "short_name": 114,
                    "cursor_shape": "horizontal",
                    "cell_percentage": 20
                }
            ]]],
            ["mode_change", ["normal", 0]],
            ["mode_change", ["insert", 1]],
            ["mode_change", ["replace", 2]],
        ]),
    );

    let cursor = Rgb::new(0x88, 0xc0, 0xd0);
    assert_eq!(
        session.surface.calls,
        vec![
            Call::Atlas(FontDescriptor {
                face: "JetBrains Mono".into(),
                size: 13,
                line_space: 1,
            }),
            Call::CellSize,
            Call::Resize,
            Call::Color(cursor),
            Call::Shape(CursorShape::Block, None),
            Call::Color(cursor),
            Call::Shape(CursorShape::Line, Some(25)),
            Call::Shape(CursorShape::Underline, Some(20)),
        ]
    );
    assert_eq!(
        *modes.lock(),
        vec![VimMode::Normal, VimMode::Insert, VimMode::Replace]
    );
}

#[test]
fn typing_a_command_publishes_each_new_text_once() {
    let mut session = Session::new();
    let commands = record(&mut session.dispatch.command);

    // Host re-sends the line on every keystroke; cursor moves with it.
    session.notify("redraw", json!([["cmdline_show", [[], 0, ":", "", 0, 1]]]));
    session.notify("redraw", json!([["cmdline_show", [[[0, 119]], 1, ":", "", 0, 1]]]));
    session.notify("redraw", json!([["cmdline_show", [[[0, 119]], 1, ":", "", 0, 1]]]));
    session.notify("redraw", json!([["cmdline_show", [[[0, "wq"]], 2, ":", "", 0, 1]]]));
    session.notify("redraw", json!([["cmdline_pos", [1, 1]]]));
    session.notify("redraw", json!([["cmdline_hide", [1]]]));

    let update = |text: &str, position| {
        CommandLineEvent::Update(CommandUpdate {
            text: text.into(),
            kind: CommandKind::Ex,
            position,
        })
    };
    assert_eq!(
        *commands.lock(),
        vec![
            update("", 0),
            update("w", 1),
            update("wq", 2),
            CommandLineEvent::Position { position: 1 },
            CommandLineEvent::Hide,
        ]
    );
}

#[test]
fn messages_and_status_are_split_by_kind() {
    let mut session = Session::new();
    let messages = record(&mut session.dispatch.message);
    let status = record(&mut session.dispatch.status);

    session.notify(
        "redraw",
        json!([
            ["msg_show",
                ["echomsg", [[0, "hello"]], false],
                ["emsg", [[9, "E492: Not an editor command: qq"]], false],
                ["", [[0, "written"]], true]],
            ["msg_ruler", [[[0, "1,1"]]]],
        ]),
    );

    assert_eq!(
        *messages.lock(),
        vec![
            Message {
                kind: MessageKind::Info,
                text: "hello".into()
            },
            Message {
                kind: MessageKind::Error,
                text: "E492: Not an editor command: qq".into()
            },
        ]
    );
    assert_eq!(*status.lock(), vec!["written".to_string()]);
}

#[test]
fn non_redraw_notifications_change_nothing() {
    let mut session = Session::new();
    let status = record(&mut session.dispatch.status);

    session.notify("nvim_error_event", json!([0, "boom"]));

    assert!(status.lock().is_empty());
    assert!(session.surface.calls.is_empty());
}
