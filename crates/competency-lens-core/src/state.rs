//! Selection state machine.
//!
//! Holds the active lens and the optional active standard as identifiers
//! into a [`Repository`]. Every transition replaces one or both fields and
//! returns a [`Change`] describing what actually moved; the caller decides
//! whether to re-render. Transitions never call back into the caller.
//!
//! # Transitions
//!
//! | Transition | Lens | Standard |
//! |------------|------|----------|
//! | [`select_lens`](StateMachine::select_lens) | set | kept |
//! | [`select_standard`](StateMachine::select_standard) | kept | set |
//! | [`clear_standard`](StateMachine::clear_standard) | kept | cleared |
//! | [`set_state`](StateMachine::set_state) | set | set or cleared |

use tracing::debug;

use crate::locator::Locator;
use crate::models::Standard;
use crate::repository::{LensKey, Repository};

/// Which fields a transition changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Change {
    pub lens: bool,
    pub standard: bool,
}

impl Change {
    pub fn any(&self) -> bool {
        self.lens || self.standard
    }
}

/// The active selection.
///
/// The lens is unset until the first transition, which the view applies
/// once ingestion completes.
#[derive(Debug, Default)]
pub struct StateMachine {
    active_lens: Option<LensKey>,
    active_standard: Option<u32>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_lens(&self) -> Option<LensKey> {
        self.active_lens
    }

    pub fn active_standard(&self) -> Option<u32> {
        self.active_standard
    }

    /// Switch lens. An open standard stays open.
    pub fn select_lens(&mut self, lens: LensKey) -> Change {
        self.apply(Some(lens), self.active_standard)
    }

    pub fn select_standard(&mut self, standard: &Standard) -> Change {
        self.apply(self.active_lens, Some(standard.id))
    }

    pub fn clear_standard(&mut self) -> Change {
        self.apply(self.active_lens, None)
    }

    /// Apply a decoded locator as one transition.
    ///
    /// An unknown lens href falls back to the "all" lens. A missing or
    /// unknown standard id clears the active standard.
    pub fn set_state(&mut self, repo: &Repository, locator: &Locator) -> Change {
        let lens = repo.key_by_href(&locator.lens).unwrap_or(LensKey::ALL);
        let standard = locator
            .standard
            .and_then(|id| repo.by_id(id))
            .map(|s| s.id);
        self.apply(Some(lens), standard)
    }

    fn apply(&mut self, lens: Option<LensKey>, standard: Option<u32>) -> Change {
        let change = Change {
            lens: self.active_lens != lens,
            standard: self.active_standard != standard,
        };
        self.active_lens = lens;
        self.active_standard = standard;
        if change.any() {
            debug!(?lens, ?standard, "selection changed");
        }
        change
    }
}
