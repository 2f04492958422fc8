//! Buffer switcher panel: a filterable list of the host's other buffers.

use crate::buffer_list::{escape_path, BufferEntry};
use crate::fuzzy;
use serde::Serialize;
use settings::constants::buffer_switcher::{EMPTY_MESSAGE, VISIBLE_ITEMS};

/// User input the panel reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitcherInput {
    /// Replace the filter text.
    Query(String),
    Char(char),
    Backspace,
    Next,
    Prev,
    Select,
    Hide,
}

impl SwitcherInput {
    /// Map a key name from the input box.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "escape" => Some(Self::Hide),
            "up" => Some(Self::Prev),
            "down" | "tab" => Some(Self::Next),
            "enter" => Some(Self::Select),
            "backspace" => Some(Self::Backspace),
            "space" => Some(Self::Char(' ')),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Hidden,
    Unfiltered,
    Filtered,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherRow {
    /// `dir/`, dimmed, for duplicate basenames.
    pub dir_prefix: Option<String>,
    pub label: String,
    pub modified: bool,
    pub selected: bool,
}

/// Everything the renderer needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherView {
    pub visible: bool,
    pub query: String,
    pub rows: Vec<SwitcherRow>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct BufferSwitcher {
    query: String,
    /// Rows currently listed, at most `VISIBLE_ITEMS`.
    buffers: Vec<BufferEntry>,
    /// Full list from the last activation.
    cache: Vec<BufferEntry>,
    visible: bool,
    selected: usize,
}

impl BufferSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (self.visible, self.query.is_empty()) {
            (false, _) => Phase::Hidden,
            (true, true) => Phase::Unfiltered,
            (true, false) => Phase::Filtered,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn buffers(&self) -> &[BufferEntry] {
        &self.buffers
    }

    /// Open the panel on a fresh buffer list.
    pub fn show(&mut self, buffers: Vec<BufferEntry>) {
        tracing::debug!("Buffer switcher showing {} buffers", buffers.len());
        self.query.clear();
        self.selected = 0;
        self.buffers = buffers.iter().take(VISIBLE_ITEMS).cloned().collect();
        self.cache = buffers;
        self.visible = true;
    }

    /// Close the panel. The buffer list is discarded; the next `show`
    /// brings a fresh one.
    pub fn hide(&mut self) {
        self.query.clear();
        self.selected = 0;
        self.buffers.clear();
        self.cache.clear();
        self.visible = false;
    }

    /// Set the filter text and re-rank the cached list.
    pub fn change(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected = 0;
        self.buffers = if self.query.is_empty() {
            self.cache.iter().take(VISIBLE_ITEMS).cloned().collect()
        } else {
            fuzzy::rank(&self.cache, &self.query, |entry| entry.name.as_str())
                .into_iter()
                .take(VISIBLE_ITEMS)
                .cloned()
                .collect()
        };
    }

    /// Move down; wraps inside the fixed window.
    pub fn next(&mut self) {
        self.selected = if self.selected + 1 >= VISIBLE_ITEMS {
            0
        } else {
            self.selected + 1
        };
    }

    /// Move up; wraps inside the fixed window.
    pub fn prev(&mut self) {
        self.selected = if self.selected == 0 {
            VISIBLE_ITEMS - 1
        } else {
            self.selected - 1
        };
    }

    /// Close the panel and return the switch command for the selected row,
    /// if the selection points at one.
    pub fn select(&mut self) -> Option<String> {
        let command = self
            .buffers
            .get(self.selected)
            .map(|entry| format!("b {}", escape_path(&entry.path)));
        self.hide();
        command
    }

    /// Apply one input. Returns a host command to run, if any.
    pub fn handle_input(&mut self, input: SwitcherInput) -> Option<String> {
        if !self.visible {
            return None;
        }
        match input {
            SwitcherInput::Query(query) => self.change(query),
            SwitcherInput::Char(c) => {
                let mut query = std::mem::take(&mut self.query);
                query.push(c);
                self.change(query);
            }
            SwitcherInput::Backspace => {
                let mut query = std::mem::take(&mut self.query);
                query.pop();
                self.change(query);
            }
            SwitcherInput::Next => self.next(),
            SwitcherInput::Prev => self.prev(),
            SwitcherInput::Select => return self.select(),
            SwitcherInput::Hide => self.hide(),
        }
        None
    }

    pub fn view(&self) -> SwitcherView {
        let rows = self
            .buffers
            .iter()
            .enumerate()
            .map(|(ix, entry)| SwitcherRow {
                dir_prefix: entry.duplicate.then(|| format!("{}/", entry.dir)),
                label: if entry.duplicate {
                    entry.base.clone()
                } else {
                    entry.name.clone()
                },
                modified: entry.modified,
                selected: ix == self.selected,
            })
            .collect::<Vec<_>>();

        SwitcherView {
            visible: self.visible,
            query: self.query.clone(),
            empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
            rows,
        }
    }
}
