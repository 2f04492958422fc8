//! Decoding of host UI events into [`RedrawEvent`].
//!
//! A redraw batch entry is `[name, tuple, tuple, ...]`: the event name
//! followed by one positional argument tuple per occurrence.

use crate::value::{self, array_arg, int_arg, text_arg, uint_arg, Text};
use anyhow::{anyhow, Context, Result};
use dispatch::PopupMenuItem;
use highlight::{DefaultColors, Highlight, Rgb};
use serde::Deserialize;
use serde_json::Value;

/// Event names the translator understands.
const KNOWN_EVENTS: &[&str] = &[
    "msg_show",
    "msg_showmode",
    "msg_showcmd",
    "msg_clear",
    "msg_ruler",
    "msg_history_show",
    "mode_change",
    "mode_info_set",
    "option_set",
    "set_title",
    "hl_attr_define",
    "default_colors_set",
    "popupmenu_show",
    "popupmenu_hide",
    "popupmenu_select",
    "wildmenu_show",
    "wildmenu_hide",
    "wildmenu_select",
    "cmdline_show",
    "cmdline_hide",
    "cmdline_pos",
];

/// One `[attr, text]` piece of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChunk {
    pub hl_id: i64,
    pub text: String,
}

/// A mode descriptor from `mode_info_set`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModeInfo {
    pub name: Text,
    #[serde(default)]
    pub short_name: Option<Text>,
    #[serde(default)]
    pub cursor_shape: Option<Text>,
    #[serde(default)]
    pub cell_percentage: Option<u32>,
    #[serde(default)]
    pub attr_id: Option<u64>,
    #[serde(default)]
    pub attr_id_lm: Option<u64>,
    #[serde(default)]
    pub blinkwait: Option<u64>,
    #[serde(default)]
    pub blinkon: Option<u64>,
    #[serde(default)]
    pub blinkoff: Option<u64>,
}

/// Arguments of `cmdline_show`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmdlineShow {
    /// Text of each `[attr, text]` content chunk.
    pub content: Vec<String>,
    pub position: u64,
    /// `:`, `/`, `?`, or empty for `input()` prompts.
    pub first_char: String,
    pub prompt: String,
    pub indent: u64,
    pub level: u64,
}

impl CmdlineShow {
    /// The command line as one string.
    pub fn text(&self) -> String {
        self.content.concat()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RedrawEvent {
    MsgShow {
        kind: String,
        chunks: Vec<MessageChunk>,
        replace_last: bool,
    },
    MsgShowMode(Vec<MessageChunk>),
    MsgShowCmd(Vec<MessageChunk>),
    MsgClear,
    MsgRuler,
    MsgHistoryShow {
        entries: usize,
    },
    ModeChange {
        mode: String,
    },
    ModeInfoSet {
        cursor_style_enabled: bool,
        modes: Vec<ModeInfo>,
    },
    /// Every `(name, value)` pair of one batch entry.
    OptionSet(Vec<(String, Value)>),
    SetTitle(String),
    HlAttrDefine {
        id: u64,
        attrs: Highlight,
    },
    DefaultColorsSet(DefaultColors),
    PopupMenuShow {
        items: Vec<PopupMenuItem>,
        selected: i64,
        row: i64,
        col: i64,
    },
    PopupMenuHide,
    PopupMenuSelect(i64),
    WildmenuShow(Vec<String>),
    WildmenuHide,
    WildmenuSelect(i64),
    CmdlineShow(CmdlineShow),
    CmdlineHide,
    CmdlinePos {
        position: u64,
    },
    Unhandled(String),
}

impl RedrawEvent {
    /// Decode one argument tuple of event `name`.
    pub fn decode(name: &str, tuple: &[Value]) -> Result<Self> {
        let event = match name {
            "msg_show" => Self::MsgShow {
                kind: text_arg(tuple, 0, "message kind")?,
                chunks: decode_chunks(array_arg(tuple, 1, "message content")?)?,
                replace_last: tuple.get(2).and_then(Value::as_bool).unwrap_or(false),
            },
            "msg_showmode" => Self::MsgShowMode(decode_chunks(array_arg(tuple, 0, "content")?)?),
            "msg_showcmd" => Self::MsgShowCmd(decode_chunks(array_arg(tuple, 0, "content")?)?),
            "msg_clear" => Self::MsgClear,
            "msg_ruler" => Self::MsgRuler,
            "msg_history_show" => Self::MsgHistoryShow {
                entries: array_arg(tuple, 0, "history entries")?.len(),
            },
            "mode_change" => Self::ModeChange {
                mode: text_arg(tuple, 0, "mode name")?,
            },
            "mode_info_set" => {
                let modes = array_arg(tuple, 1, "mode info list")?
                    .iter()
                    .map(|info| ModeInfo::deserialize(info).context("malformed mode info"))
                    .collect::<Result<Vec<_>>>()?;
                Self::ModeInfoSet {
                    cursor_style_enabled: tuple.first().and_then(Value::as_bool).unwrap_or(true),
                    modes,
                }
            }
            "option_set" => Self::OptionSet(vec![decode_option(tuple)?]),
            "set_title" => Self::SetTitle(text_arg(tuple, 0, "title")?),
            "hl_attr_define" => Self::HlAttrDefine {
                id: uint_arg(tuple, 0, "highlight id")?,
                attrs: Highlight::deserialize(value::arg(tuple, 1, "rgb attributes")?)
                    .context("malformed highlight attributes")?,
            },
            "default_colors_set" => Self::DefaultColorsSet(DefaultColors {
                foreground: Rgb::from_host(int_arg(tuple, 0, "default foreground")?),
                background: Rgb::from_host(int_arg(tuple, 1, "default background")?),
                special: Rgb::from_host(int_arg(tuple, 2, "default special")?),
            }),
            "popupmenu_show" => Self::PopupMenuShow {
                items: array_arg(tuple, 0, "popup items")?
                    .iter()
                    .map(decode_popup_item)
                    .collect::<Result<Vec<_>>>()?,
                selected: int_arg(tuple, 1, "selected index")?,
                row: int_arg(tuple, 2, "row")?,
                col: int_arg(tuple, 3, "col")?,
            },
            "popupmenu_hide" => Self::PopupMenuHide,
            "popupmenu_select" => Self::PopupMenuSelect(int_arg(tuple, 0, "selected index")?),
            "wildmenu_show" => Self::WildmenuShow(
                array_arg(tuple, 0, "wildmenu items")?
                    .iter()
                    .map(|item| {
                        value::text(item).ok_or_else(|| anyhow!("wildmenu item is not text"))
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            "wildmenu_hide" => Self::WildmenuHide,
            "wildmenu_select" => Self::WildmenuSelect(int_arg(tuple, 0, "selected index")?),
            "cmdline_show" => Self::CmdlineShow(CmdlineShow {
                content: decode_chunks(array_arg(tuple, 0, "command line content")?)?
                    .into_iter()
                    .map(|chunk| chunk.text)
                    .collect(),
                position: uint_arg(tuple, 1, "cursor position")?,
                first_char: text_arg(tuple, 2, "first character")?,
                prompt: text_arg(tuple, 3, "prompt")?,
                indent: tuple.get(4).and_then(Value::as_u64).unwrap_or(0),
                level: tuple.get(5).and_then(Value::as_u64).unwrap_or(1),
            }),
            "cmdline_hide" => Self::CmdlineHide,
            "cmdline_pos" => Self::CmdlinePos {
                position: uint_arg(tuple, 0, "cursor position")?,
            },
            other => Self::Unhandled(other.to_string()),
        };
        Ok(event)
    }
}

/// Decode a whole batch entry (`tuples` is everything after the name).
///
/// Tuples decode independently so one malformed tuple does not drop its
/// siblings. `option_set` pairs are merged into a single event.
pub fn decode_entry(name: &str, tuples: &[Value]) -> Vec<Result<RedrawEvent>> {
    if !KNOWN_EVENTS.contains(&name) {
        return vec![Ok(RedrawEvent::Unhandled(name.to_string()))];
    }

    if tuples.is_empty() {
        return vec![RedrawEvent::decode(name, &[])];
    }

    if name == "option_set" {
        let mut results = Vec::new();
        let mut options = Vec::with_capacity(tuples.len());
        for tuple in tuples {
            match as_tuple(tuple).and_then(decode_option) {
                Ok(option) => options.push(option),
                Err(err) => results.push(Err(err)),
            }
        }
        if !options.is_empty() {
            results.push(Ok(RedrawEvent::OptionSet(options)));
        }
        return results;
    }

    tuples
        .iter()
        .map(|tuple| {
            as_tuple(tuple)
                .and_then(|args| RedrawEvent::decode(name, args))
                .with_context(|| format!("decoding {name}"))
        })
        .collect()
}

fn as_tuple(value: &Value) -> Result<&[Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| anyhow!("event arguments are not an array: {value}"))
}

fn decode_option(tuple: &[Value]) -> Result<(String, Value)> {
    let name = text_arg(tuple, 0, "option name")?;
    let value = value::arg(tuple, 1, "option value")?.clone();
    Ok((name, value))
}

fn decode_chunks(chunks: &[Value]) -> Result<Vec<MessageChunk>> {
    chunks
        .iter()
        .map(|chunk| {
            let chunk = as_tuple(chunk)?;
            Ok(MessageChunk {
                hl_id: chunk.first().and_then(Value::as_i64).unwrap_or(0),
                text: text_arg(chunk, 1, "chunk text")?,
            })
        })
        .collect()
}

fn decode_popup_item(item: &Value) -> Result<PopupMenuItem> {
    let (word, kind, menu, info) = <(Text, Text, Text, Text)>::deserialize(item)
        .with_context(|| format!("malformed popup item: {item}"))?;
    Ok(PopupMenuItem {
        word: word.into(),
        kind: kind.into(),
        menu: menu.into(),
        info: info.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn single(name: &str, tuple: Value) -> RedrawEvent {
        let mut events = decode_entry(name, &[tuple]);
        assert_eq!(events.len(), 1);
        events.remove(0).unwrap()
    }

    #[test]
    fn decodes_msg_show_with_code_point_kind() {
        let event = single("msg_show", json!(["emsg", [[0, "E37: No write"], [7, "!"]], false]));
        assert_eq!(
            event,
            RedrawEvent::MsgShow {
                kind: "emsg".into(),
                chunks: vec![
                    MessageChunk {
                        hl_id: 0,
                        text: "E37: No write".into()
                    },
                    MessageChunk {
                        hl_id: 7,
                        text: "!".into()
                    },
                ],
                replace_last: false,
            }
        );
    }

    #[test]
    fn decodes_single_character_chunk_from_code_point() {
        let event = single("msg_showcmd", json!([[[0, 100]]]));
        assert_eq!(
            event,
            RedrawEvent::MsgShowCmd(vec![MessageChunk {
                hl_id: 0,
                text: "d".into()
            }])
        );
    }

    #[test]
    fn decodes_mode_info_set() {
        let event = single(
            "mode_info_set",
            json!([true, [
                {
                    "name": "normal",
                    "short_name": 110,
                    "cursor_shape": "block",
                    "attr_id": 4,
                    "blinkon": 0
                },
                {
                    "name": "insert",
                    "short_name": 105,
                    "cursor_shape": "vertical",
                    "cell_percentage": 25
                },
            ]]),
        );

        let RedrawEvent::ModeInfoSet {
            cursor_style_enabled,
            modes,
        } = event
        else {
            panic!("expected ModeInfoSet");
        };
        assert!(cursor_style_enabled);
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[0].short_name, Some(Text("n".into())));
        assert_eq!(modes[0].attr_id, Some(4));
        assert_eq!(modes[1].cursor_shape, Some(Text("vertical".into())));
        assert_eq!(modes[1].cell_percentage, Some(25));
    }

    #[test]
    fn option_set_tuples_merge_into_one_event() {
        let events = decode_entry(
            "option_set",
            &[json!(["guifont", "Menlo:h14"]), json!(["linespace", 2])],
        );
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].as_ref().unwrap(),
            &RedrawEvent::OptionSet(vec![
                ("guifont".into(), json!("Menlo:h14")),
                ("linespace".into(), json!(2)),
            ])
        );
    }

    #[test]
    fn option_set_keeps_good_pairs_next_to_bad_ones() {
        let events = decode_entry("option_set", &[json!([null, 1]), json!(["ruler", true])]);
        assert_eq!(events.len(), 2);
        assert!(events[0].is_err());
        assert_eq!(
            events[1].as_ref().unwrap(),
            &RedrawEvent::OptionSet(vec![("ruler".into(), json!(true))])
        );
    }

    #[test]
    fn decodes_cmdline_show() {
        let event = single(
            "cmdline_show",
            json!([[[0, "e"], [0, "dit "], [0, 120]], 6, 58, "", 0, 1]),
        );
        let RedrawEvent::CmdlineShow(show) = event else {
            panic!("expected CmdlineShow");
        };
        assert_eq!(show.text(), "edit x");
        assert_eq!(show.first_char, ":");
        assert_eq!(show.position, 6);
        assert_eq!(show.level, 1);
    }

    #[test]
    fn decodes_popupmenu_show() {
        let event = single(
            "popupmenu_show",
            json!([[["foo", "v", "", ""], [120, "f", "[LS]", "doc"]], -1, 3, 10, 1]),
        );
        assert_eq!(
            event,
            RedrawEvent::PopupMenuShow {
                items: vec![
                    PopupMenuItem {
                        word: "foo".into(),
                        kind: "v".into(),
                        menu: "".into(),
                        info: "".into(),
                    },
                    PopupMenuItem {
                        word: "x".into(),
                        kind: "f".into(),
                        menu: "[LS]".into(),
                        info: "doc".into(),
                    },
                ],
                selected: -1,
                row: 3,
                col: 10,
            }
        );
    }

    #[test]
    fn decodes_default_colors_with_unset_special() {
        let event = single("default_colors_set", json!([0xffffff, 0x000000, -1, 15, 0]));
        assert_eq!(
            event,
            RedrawEvent::DefaultColorsSet(DefaultColors {
                foreground: Some(Rgb::new(255, 255, 255)),
                background: Some(Rgb::new(0, 0, 0)),
                special: None,
            })
        );
    }

    #[test]
    fn no_argument_events_decode_from_empty_tuple() {
        assert_eq!(single("popupmenu_hide", json!([])), RedrawEvent::PopupMenuHide);
        assert_eq!(single("cmdline_hide", json!([1])), RedrawEvent::CmdlineHide);
        assert_eq!(
            decode_entry("wildmenu_hide", &[]).remove(0).unwrap(),
            RedrawEvent::WildmenuHide
        );
    }

    #[test]
    fn unknown_events_decode_once() {
        let events = decode_entry("grid_line", &[json!([1, 2]), json!([3, 4])]);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].as_ref().unwrap(),
            &RedrawEvent::Unhandled("grid_line".into())
        );
    }

    #[test]
    fn malformed_tuple_fails_alone() {
        let events = decode_entry("mode_change", &[json!([]), json!(["insert", 1])]);
        assert!(events[0].is_err());
        assert_eq!(
            events[1].as_ref().unwrap(),
            &RedrawEvent::ModeChange {
                mode: "insert".into()
            }
        );
    }
}
