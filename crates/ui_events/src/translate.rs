//! Turns decoded host events into renderer calls and channel publications.
//!
//! Nothing here returns an error to the caller: malformed input is logged
//! and skipped so one bad event never stalls the redraw stream.

use crate::event::{decode_entry, CmdlineShow, MessageChunk, RedrawEvent};
use crate::font::derive_font;
use crate::session::SessionState;
use crate::surface::{CursorShape, RenderSurface};
use crate::value;
use dispatch::{
    CommandKind, CommandLineEvent, CommandUpdate, Dispatch, Message, MessageKind, PopupMenuEvent,
    VimMode, WildmenuEvent,
};
use highlight::HighlightTable;
use serde_json::Value;

/// Collaborators the translator drives.
pub struct UiContext<'a> {
    pub surface: &'a mut dyn RenderSurface,
    pub highlights: &'a mut HighlightTable,
    pub dispatch: &'a Dispatch,
}

/// Classify a host message kind. `None` means the text is only transient
/// status.
pub fn message_kind(tag: &str) -> Option<MessageKind> {
    match tag {
        "echo" | "echomsg" => Some(MessageKind::Info),
        "emsg" | "echoerr" => Some(MessageKind::Error),
        "quickfix" | "return_prompt" => Some(MessageKind::System),
        _ => None,
    }
}

/// Command kind for a `cmdline_show` first character. This decides the
/// channel; a prompt only changes the published kind.
pub fn command_kind(first_char: &str) -> CommandKind {
    match first_char {
        "/" => CommandKind::SearchForward,
        "?" => CommandKind::SearchBackward,
        _ => CommandKind::Ex,
    }
}

/// Apply one decoded event.
pub fn translate(event: RedrawEvent, state: &mut SessionState, ctx: &mut UiContext<'_>) {
    match event {
        RedrawEvent::MsgShow {
            kind,
            chunks,
            replace_last,
        } => {
            if replace_last {
                tracing::debug!(kind = %kind, "msg_show replace_last ignored");
            }
            show_message(&kind, chunks, ctx.dispatch);
        }
        RedrawEvent::MsgShowMode(chunks) | RedrawEvent::MsgShowCmd(chunks) => {
            if chunks.is_empty() {
                ctx.dispatch.control.publish(String::new());
            }
            for chunk in chunks {
                ctx.dispatch.control.publish(chunk.text);
            }
        }
        RedrawEvent::MsgClear => {
            ctx.dispatch.message_clear.publish(());
            ctx.dispatch.status.publish(String::new());
        }
        RedrawEvent::MsgRuler => {}
        RedrawEvent::MsgHistoryShow { entries } => {
            tracing::info!("msg_history_show not implemented ({} entries)", entries);
        }
        RedrawEvent::ModeChange { mode } => change_mode(&mode, state, ctx),
        RedrawEvent::ModeInfoSet {
            cursor_style_enabled,
            modes,
        } => {
            tracing::debug!(cursor_style_enabled, count = modes.len(), "mode_info_set");
            state.set_modes(&modes);
        }
        RedrawEvent::OptionSet(options) => set_options(options, state, ctx),
        RedrawEvent::SetTitle(title) => ctx.dispatch.title.publish(title),
        RedrawEvent::HlAttrDefine { id, attrs } => ctx.highlights.define(id, attrs),
        RedrawEvent::DefaultColorsSet(defaults) => ctx.highlights.set_defaults(defaults),
        RedrawEvent::PopupMenuShow {
            items,
            selected,
            row,
            col,
        } => ctx.dispatch.popup_menu.publish(PopupMenuEvent::Show {
            items,
            selected,
            row,
            col,
        }),
        RedrawEvent::PopupMenuHide => ctx.dispatch.popup_menu.publish(PopupMenuEvent::Hide),
        RedrawEvent::PopupMenuSelect(selected) => ctx
            .dispatch
            .popup_menu
            .publish(PopupMenuEvent::Select { selected }),
        RedrawEvent::WildmenuShow(items) => {
            ctx.dispatch.wildmenu.publish(WildmenuEvent::Show { items })
        }
        RedrawEvent::WildmenuHide => ctx.dispatch.wildmenu.publish(WildmenuEvent::Hide),
        RedrawEvent::WildmenuSelect(selected) => ctx
            .dispatch
            .wildmenu
            .publish(WildmenuEvent::Select { selected }),
        RedrawEvent::CmdlineShow(show) => show_command_line(show, state, ctx.dispatch),
        RedrawEvent::CmdlineHide => {
            state.command_line.reset();
            ctx.dispatch.command.publish(CommandLineEvent::Hide);
            ctx.dispatch.search.publish(CommandLineEvent::Hide);
        }
        RedrawEvent::CmdlinePos { position } => {
            let channel = match state.last_command_kind {
                Some(kind) if kind.is_search() => &ctx.dispatch.search,
                _ => &ctx.dispatch.command,
            };
            channel.publish(CommandLineEvent::Position { position });
        }
        RedrawEvent::Unhandled(name) => tracing::debug!("Unhandled redraw event: {}", name),
    }
}

fn show_message(tag: &str, chunks: Vec<MessageChunk>, dispatch: &Dispatch) {
    match message_kind(tag) {
        Some(kind) => {
            for chunk in chunks {
                dispatch.message.publish(Message {
                    kind,
                    text: chunk.text,
                });
            }
        }
        None => {
            for chunk in chunks {
                dispatch.status.publish(chunk.text);
            }
        }
    }
}

fn change_mode(mode: &str, state: &SessionState, ctx: &mut UiContext<'_>) {
    ctx.dispatch.mode.publish(VimMode::from_host(mode));

    let Some(cursor) = state.modes.get(mode) else {
        tracing::debug!("No cursor info for mode {:?}", mode);
        ctx.surface.set_cursor_shape(CursorShape::Block, None);
        return;
    };

    if let Some(color) = cursor.hl_id.and_then(|id| ctx.highlights.background(id)) {
        ctx.surface.set_cursor_color(color);
    }
    ctx.surface
        .set_cursor_shape(cursor.shape, cursor.cell_percentage);
}

fn set_options(options: Vec<(String, Value)>, state: &mut SessionState, ctx: &mut UiContext<'_>) {
    for (name, value) in options {
        state.options.insert(name, value);
    }

    let font = derive_font(&state.options, state.font_defaults());
    if font == state.font {
        return;
    }

    tracing::debug!(
        face = %font.face,
        size = font.size,
        line_space = font.line_space,
        "font changed"
    );
    ctx.surface.regenerate_font_atlas(&font);
    ctx.surface.update_cell_size();
    ctx.surface.resize();
    state.font = font;
}

fn show_command_line(show: CmdlineShow, state: &mut SessionState, dispatch: &Dispatch) {
    state.command_line.active = true;
    state.command_line.position = Some(show.position);

    let text = show.text();
    if state.command_line.text.as_deref() == Some(text.as_str()) {
        return;
    }

    tracing::debug!(indent = show.indent, level = show.level, "cmdline_show");
    let base = command_kind(&show.first_char);
    state.command_line.text = Some(text.clone());
    state.last_command_kind = Some(base);

    let kind = if show.prompt.is_empty() {
        base
    } else {
        CommandKind::Prompt
    };
    let update = CommandLineEvent::Update(CommandUpdate {
        text,
        kind,
        position: show.position,
    });
    if base.is_search() {
        dispatch.search.publish(update);
    } else {
        dispatch.command.publish(update);
    }
}

/// Decode, filter and apply one batch entry.
pub fn handle_event(
    name: &str,
    tuples: &[Value],
    state: &mut SessionState,
    ctx: &mut UiContext<'_>,
) {
    for decoded in decode_entry(name, tuples) {
        match decoded {
            Ok(event) if state.is_redundant(&event) => {
                tracing::trace!("Dropping redundant {}", name);
            }
            Ok(event) => translate(event, state, ctx),
            Err(e) => tracing::warn!("Skipping malformed {} event: {:#}", name, e),
        }
    }
}

/// Apply every entry of a redraw batch in order.
pub fn handle_redraw(batch: &[Value], state: &mut SessionState, ctx: &mut UiContext<'_>) {
    for entry in batch {
        let Some((name, tuples)) = entry.as_array().and_then(|e| e.split_first()) else {
            tracing::warn!("Skipping malformed redraw entry: {}", entry);
            continue;
        };
        let Some(name) = value::text(name) else {
            tracing::warn!("Skipping redraw entry without a name: {}", entry);
            continue;
        };
        handle_event(&name, tuples, state, ctx);
    }
}

/// Entry point for host notifications. Only `redraw` is understood.
pub fn handle_notification(
    method: &str,
    params: &Value,
    state: &mut SessionState,
    ctx: &mut UiContext<'_>,
) {
    if method != "redraw" {
        tracing::debug!("Ignoring notification {}", method);
        return;
    }
    match params.as_array() {
        Some(batch) => handle_redraw(batch, state, ctx),
        None => tracing::warn!("redraw params are not an array: {}", params),
    }
}
