//! History change detection.
//!
//! A [`HistoryWatcher`] remembers the message ids it last saw and invokes its
//! callback whenever the history grows, shrinks or is rewritten. Frontends
//! hook their "scroll to end" behavior onto it.

use smartsupport_types::message::Message;

/// Describes how the history changed since the previous observation.
#[derive(Debug)]
pub struct HistoryChange<'a> {
    /// The full current history.
    pub messages: &'a [Message],
    /// Index of the first message not present at the previous observation.
    pub first_new: usize,
    /// Whether previously observed messages were removed.
    pub rewound: bool,
}

impl<'a> HistoryChange<'a> {
    /// Messages added since the previous observation.
    pub fn new_messages(&self) -> &'a [Message] {
        &self.messages[self.first_new..]
    }
}

pub struct HistoryWatcher<F> {
    seen: Vec<String>,
    on_change: F,
}

impl<F> HistoryWatcher<F>
where
    F: FnMut(HistoryChange<'_>),
{
    pub fn new(on_change: F) -> Self {
        Self {
            seen: Vec::new(),
            on_change,
        }
    }

    /// Compare `messages` with the previous observation.
    ///
    /// Returns `true` (after invoking the callback) when length or identity
    /// changed.
    pub fn observe(&mut self, messages: &[Message]) -> bool {
        let common = self
            .seen
            .iter()
            .zip(messages)
            .take_while(|(id, m)| **id == m.id)
            .count();

        if common == self.seen.len() && common == messages.len() {
            return false;
        }

        let rewound = common < self.seen.len();
        self.seen = messages.iter().map(|m| m.id.clone()).collect();
        (self.on_change)(HistoryChange {
            messages,
            first_new: common,
            rewound,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn unchanged_history_does_not_fire() {
        let log = RefCell::new(Vec::new());
        let mut watcher = HistoryWatcher::new(|change: HistoryChange<'_>| {
            log.borrow_mut().push((change.first_new, change.rewound))
        });
        let messages = vec![Message::user("Hello")];

        assert!(watcher.observe(&messages));
        assert!(!watcher.observe(&messages));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn appended_messages_start_after_previous_tail() {
        let log = RefCell::new(Vec::new());
        let mut watcher = HistoryWatcher::new(|change: HistoryChange<'_>| {
            log.borrow_mut().push((change.first_new, change.rewound))
        });
        let mut messages = vec![Message::user("Hello")];
        watcher.observe(&messages);

        messages.push(Message::assistant("Hi there", Vec::new()));
        assert!(watcher.observe(&messages));
        assert_eq!(log.borrow().last(), Some(&(1, false)));
    }

    #[test]
    fn replaced_tail_reports_rewind() {
        let log = RefCell::new(Vec::new());
        let mut watcher = HistoryWatcher::new(|change: HistoryChange<'_>| {
            log.borrow_mut().push((change.first_new, change.rewound))
        });
        let mut messages = vec![Message::user("q"), Message::assistant("a1", Vec::new())];
        watcher.observe(&messages);

        messages.pop();
        messages.push(Message::assistant("a2", Vec::new()));
        assert!(watcher.observe(&messages));
        assert_eq!(log.borrow().last(), Some(&(1, true)));
    }

    #[test]
    fn cleared_history_fires_with_rewind() {
        let log = RefCell::new(Vec::new());
        let mut watcher = HistoryWatcher::new(|change: HistoryChange<'_>| {
            log.borrow_mut().push((change.first_new, change.rewound))
        });
        watcher.observe(&[Message::user("q")]);

        assert!(watcher.observe(&[]));
        assert_eq!(log.borrow().last(), Some(&(0, true)));
    }

    #[test]
    fn new_messages_slice() {
        let messages = vec![Message::user("q"), Message::assistant("a", Vec::new())];
        let change = HistoryChange {
            messages: &messages,
            first_new: 1,
            rewound: false,
        };
        assert_eq!(change.new_messages().len(), 1);
        assert_eq!(change.new_messages()[0].content, "a");
    }
}
