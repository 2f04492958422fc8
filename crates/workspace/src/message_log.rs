//! Bounded history of classified editor messages.

use dispatch::{Dispatch, Message};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Keeps the most recent `capacity` messages. Clones share the same log.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: Arc<Mutex<VecDeque<Message>>>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity,
        }
    }

    /// Follow the `message` and `message_clear` channels.
    pub fn attach(&self, dispatch: &mut Dispatch) {
        let log = self.clone();
        dispatch.message.subscribe(move |message| log.push(message.clone()));
        let log = self.clone();
        dispatch.message_clear.subscribe(move |_| log.clear());
    }

    pub fn push(&self, message: Message) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(message);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Oldest first.
    pub fn snapshot(&self) -> Vec<Message> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<Message> {
        self.entries.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
