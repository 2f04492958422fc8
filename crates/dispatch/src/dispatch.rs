//! Shared message definitions and typed publish/subscribe channels.
//!
//! Every topic the event translator publishes on lives here so that
//! producers (`ui_events`) and consumers (`glyphvim_workspace`, the binary)
//! agree on payload types without depending on each other.

use serde::Serialize;

/// Subscriber callback for a channel carrying `T`.
pub type Handler<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A single pub/sub topic.
///
/// Handlers run synchronously, in subscription order, on the publishing
/// thread.
pub struct Channel<T> {
    topic: &'static str,
    handlers: Vec<Handler<T>>,
}

impl<T> Channel<T> {
    pub fn new(topic: &'static str) -> Self {
        Self {
            topic,
            handlers: Vec::new(),
        }
    }

    /// Topic name, used in logs and tooling output.
    pub fn topic(&self) -> &'static str {
        self.topic
    }

    pub fn subscribe(&mut self, handler: impl Fn(&T) + Send + Sync + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Deliver `payload` to every subscriber.
    pub fn publish(&self, payload: T) {
        tracing::trace!(
            topic = self.topic,
            subscribers = self.handlers.len(),
            "publish"
        );
        for handler in &self.handlers {
            handler(&payload);
        }
    }
}

/// Severity of a message that goes to the message log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Info,
    Error,
    System,
}

/// A classified host message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Editor mode as the rest of the UI cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VimMode {
    Normal,
    Insert,
    Visual,
    Replace,
    CommandLine,
    OperatorPending,
    Terminal,
    Other,
}

impl VimMode {
    /// Collapse a host mode name (`"cmdline_normal"`, `"visual_select"`, ...)
    /// into a [`VimMode`].
    pub fn from_host(name: &str) -> Self {
        match name {
            "normal" => Self::Normal,
            "insert" => Self::Insert,
            "replace" => Self::Replace,
            "operator" => Self::OperatorPending,
            "terminal" => Self::Terminal,
            _ if name.starts_with("visual") || name.starts_with("select") => Self::Visual,
            _ if name.starts_with("cmdline") => Self::CommandLine,
            _ => Self::Other,
        }
    }
}

/// One completion candidate in the popup menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopupMenuItem {
    pub word: String,
    pub kind: String,
    pub menu: String,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PopupMenuEvent {
    Show {
        items: Vec<PopupMenuItem>,
        /// `-1` when nothing is selected.
        selected: i64,
        row: i64,
        col: i64,
    },
    Hide,
    Select {
        selected: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WildmenuEvent {
    Show { items: Vec<String> },
    Hide,
    Select { selected: i64 },
}

/// What the command line is being used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Ex,
    Prompt,
    SearchForward,
    SearchBackward,
}

impl CommandKind {
    pub fn is_search(self) -> bool {
        matches!(self, Self::SearchForward | Self::SearchBackward)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandUpdate {
    pub text: String,
    pub kind: CommandKind,
    pub position: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CommandLineEvent {
    Update(CommandUpdate),
    Position { position: u64 },
    Hide,
}

/// The full set of topics for one UI session.
pub struct Dispatch {
    /// Transient status line text.
    pub status: Channel<String>,
    /// Show-mode / show-cmd text.
    pub control: Channel<String>,
    pub title: Channel<String>,
    pub mode: Channel<VimMode>,
    pub message: Channel<Message>,
    pub message_clear: Channel<()>,
    pub popup_menu: Channel<PopupMenuEvent>,
    pub wildmenu: Channel<WildmenuEvent>,
    /// Ex command line updates.
    pub command: Channel<CommandLineEvent>,
    /// Search prompt updates.
    pub search: Channel<CommandLineEvent>,
}

impl Dispatch {
    pub fn new() -> Self {
        Self {
            status: Channel::new("message.status"),
            control: Channel::new("message.control"),
            title: Channel::new("vim.title"),
            mode: Channel::new("vim.mode"),
            message: Channel::new("message.log"),
            message_clear: Channel::new("message.clear"),
            popup_menu: Channel::new("pmenu"),
            wildmenu: Channel::new("wildmenu"),
            command: Channel::new("cmd"),
            search: Channel::new("search"),
        }
    }
}

impl Default for Dispatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn channel_delivers_to_every_subscriber_in_order() {
        let mut channel = Channel::<String>::new("test");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = seen.clone();
        channel.subscribe(move |text| first.lock().push(format!("a:{text}")));
        let second = seen.clone();
        channel.subscribe(move |text| second.lock().push(format!("b:{text}")));

        channel.publish("hi".to_string());

        assert_eq!(*seen.lock(), vec!["a:hi", "b:hi"]);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let channel = Channel::<()>::new("nobody");
        channel.publish(());
        assert_eq!(channel.topic(), "nobody");
    }

    #[test]
    fn host_mode_names_collapse() {
        assert_eq!(VimMode::from_host("normal"), VimMode::Normal);
        assert_eq!(VimMode::from_host("insert"), VimMode::Insert);
        assert_eq!(VimMode::from_host("visual"), VimMode::Visual);
        assert_eq!(VimMode::from_host("select"), VimMode::Visual);
        assert_eq!(VimMode::from_host("cmdline_normal"), VimMode::CommandLine);
        assert_eq!(VimMode::from_host("cmdline_insert"), VimMode::CommandLine);
        assert_eq!(VimMode::from_host("operator"), VimMode::OperatorPending);
        assert_eq!(VimMode::from_host("showmatch"), VimMode::Other);
    }

    #[test]
    fn command_line_events_serialize_with_tag() {
        let json = serde_json::to_value(CommandLineEvent::Position { position: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "position", "position": 3 }));

        let json = serde_json::to_value(CommandLineEvent::Update(CommandUpdate {
            text: "wq".into(),
            kind: CommandKind::Ex,
            position: 2,
        }))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "event": "update", "text": "wq", "kind": "ex", "position": 2 })
        );
    }

    #[test]
    fn search_kinds() {
        assert!(CommandKind::SearchBackward.is_search());
        assert!(CommandKind::SearchForward.is_search());
        assert!(!CommandKind::Prompt.is_search());
        assert!(!CommandKind::Ex.is_search());
    }
}
