//! Navigation codec and history hosts.
//!
//! [`add_history`] encodes a selection and pushes it onto a
//! [`HistoryHost`]. Decoding goes the other way: a back/forward
//! [`PopEvent`] carries the state record pushed earlier (or nothing, for
//! entries that predate any push), and the initial page load carries only
//! a hash, decoded with [`parse_hash`](crate::locator::parse_hash).
//!
//! Two hosts ship with the crate:
//!
//! - [`SessionHistory`]: an in-memory, browser-like entry stack.
//! - [`NoHistory`]: a host that cannot mutate history; pushes are dropped.

use tracing::debug;

use crate::locator::Locator;
use crate::models::{Lens, Standard};

/// Address bar and history stack of the host environment.
pub trait HistoryHost {
    /// Whether [`push`](HistoryHost::push) has any effect.
    fn supports_push(&self) -> bool;

    /// Add an entry after the current one, dropping any forward entries.
    fn push(&mut self, state: Locator, url: String);

    /// The current location hash, including the leading `#` (or empty).
    fn location_hash(&self) -> String;

    /// Change the location without attaching state, like editing the
    /// address bar.
    fn navigate(&mut self, hash: String);

    /// Move one entry back. `None` when there is nothing to go back to.
    fn back(&mut self) -> Option<PopEvent> {
        None
    }

    /// Move one entry forward. `None` when there is nothing ahead.
    fn forward(&mut self) -> Option<PopEvent> {
        None
    }
}

/// Event raised when the user moves back or forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopEvent {
    /// State record of the entry moved to. `None` for entries not created
    /// by a push.
    pub state: Option<Locator>,
}

/// Encode a selection and push it. Returns `false` when the host cannot
/// mutate history.
pub fn add_history(
    host: &mut dyn HistoryHost,
    lens: &Lens,
    standard: Option<&Standard>,
) -> bool {
    if !host.supports_push() {
        return false;
    }
    let state = Locator::for_selection(lens, standard);
    let url = state.to_hash();
    debug!(%url, "push history");
    host.push(state, url);
    true
}

#[derive(Debug, Clone)]
struct Entry {
    state: Option<Locator>,
    hash: String,
}

/// In-memory history stack with browser semantics.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<Entry>,
    cursor: usize,
}

impl SessionHistory {
    /// Start with one stateless entry at `initial_hash`.
    pub fn new(initial_hash: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry {
                state: None,
                hash: initial_hash.into(),
            }],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    fn current_event(&self) -> PopEvent {
        PopEvent {
            state: self.entries[self.cursor].state.clone(),
        }
    }
}

impl HistoryHost for SessionHistory {
    fn supports_push(&self) -> bool {
        true
    }

    fn push(&mut self, state: Locator, url: String) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Entry {
            state: Some(state),
            hash: url,
        });
        self.cursor += 1;
    }

    fn location_hash(&self) -> String {
        self.entries[self.cursor].hash.clone()
    }

    fn navigate(&mut self, hash: String) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Entry { state: None, hash });
        self.cursor += 1;
    }

    fn back(&mut self) -> Option<PopEvent> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current_event())
    }

    fn forward(&mut self) -> Option<PopEvent> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current_event())
    }
}

/// Host without history mutation. The hash never changes after load.
#[derive(Debug, Clone, Default)]
pub struct NoHistory {
    hash: String,
}

impl NoHistory {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
}

impl HistoryHost for NoHistory {
    fn supports_push(&self) -> bool {
        false
    }

    fn push(&mut self, _state: Locator, _url: String) {}

    fn location_hash(&self) -> String {
        self.hash.clone()
    }

    fn navigate(&mut self, hash: String) {
        self.hash = hash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_history_pushes_state_and_hash() {
        let mut h = SessionHistory::new("");
        let lens = Lens::for_category("Tech", "");
        assert!(add_history(&mut h, &lens, None));
        assert_eq!(h.location_hash(), "#/tech/");
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn test_add_history_unsupported_is_noop() {
        let mut h = NoHistory::new("#/all/");
        let lens = Lens::for_category("Tech", "");
        assert!(!add_history(&mut h, &lens, None));
        assert_eq!(h.location_hash(), "#/all/");
        assert!(h.back().is_none());

        h.navigate("#/tech/".to_string());
        assert_eq!(h.location_hash(), "#/tech/");
    }

    #[test]
    fn test_back_to_initial_entry_has_no_state() {
        let mut h = SessionHistory::new("#/tech/");
        h.push(Locator::new("ops", None), "#/ops/".to_string());
        let ev = h.back().unwrap();
        assert_eq!(ev.state, None);
        assert_eq!(h.location_hash(), "#/tech/");
        assert!(h.back().is_none());
    }

    #[test]
    fn test_forward_restores_pushed_state() {
        let mut h = SessionHistory::new("");
        h.push(Locator::new("ops", Some(2)), "#/ops/2/".to_string());
        h.back();
        let ev = h.forward().unwrap();
        assert_eq!(ev.state, Some(Locator::new("ops", Some(2))));
        assert!(h.forward().is_none());
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut h = SessionHistory::new("");
        h.push(Locator::new("a", None), "#/a/".to_string());
        h.push(Locator::new("b", None), "#/b/".to_string());
        h.back();
        h.push(Locator::new("c", None), "#/c/".to_string());
        assert_eq!(h.len(), 3);
        assert!(h.forward().is_none());
        assert_eq!(h.back().unwrap().state, Some(Locator::new("a", None)));
    }

    #[test]
    fn test_navigate_adds_stateless_entry() {
        let mut h = SessionHistory::new("");
        h.navigate("#/ops/".to_string());
        assert_eq!(h.location_hash(), "#/ops/");
        assert_eq!(h.position(), 1);
        h.back();
        assert_eq!(h.forward().unwrap().state, None);
    }
}
