//! Session context and the render context derived from it.
//!
//! [`ApplicationContext`] is the single owner of a session's data: the
//! [`Repository`] and the [`StateMachine`] pointing into it. Renderers never
//! see either directly; they receive a [`RenderContext`] built fresh after
//! every transition.

use serde::Serialize;

use crate::locator::Locator;
use crate::models::{Lens, Standard, MASTERY_LEVELS};
use crate::repository::{LensKey, Repository};
use crate::state::{Change, StateMachine};

/// Everything a renderer needs for one frame.
///
/// Serializes as `{mastery, lenses, activeLens, activeStandard?}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext<'a> {
    /// Standards of the active lens, one group per mastery level.
    pub mastery: [Vec<&'a Standard>; 3],
    pub lenses: &'a [Lens],
    pub active_lens: &'a Lens,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_standard: Option<&'a Standard>,
}

/// Repository plus selection for one session.
#[derive(Debug)]
pub struct ApplicationContext {
    repository: Repository,
    state: StateMachine,
}

impl ApplicationContext {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            state: StateMachine::new(),
        }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Mutable access for ingestion. Collections are append-only.
    pub fn repository_mut(&mut self) -> &mut Repository {
        &mut self.repository
    }

    /// The active lens, once the first transition has run.
    pub fn active_lens(&self) -> Option<&Lens> {
        self.state.active_lens().map(|k| self.repository.lens(k))
    }

    pub fn active_standard(&self) -> Option<&Standard> {
        self.state
            .active_standard()
            .and_then(|id| self.repository.by_id(id))
    }

    /// The selection as a history-state record.
    pub fn locator(&self) -> Option<Locator> {
        self.active_lens()
            .map(|lens| Locator::for_selection(lens, self.active_standard()))
    }

    pub fn select_lens(&mut self, lens: LensKey) -> Change {
        self.state.select_lens(lens)
    }

    /// Open the standard with `id`. `None` if no such standard exists.
    pub fn select_standard(&mut self, id: u32) -> Option<Change> {
        let standard = self.repository.by_id(id)?;
        Some(self.state.select_standard(standard))
    }

    pub fn clear_standard(&mut self) -> Change {
        self.state.clear_standard()
    }

    pub fn set_state(&mut self, locator: &Locator) -> Change {
        self.state.set_state(&self.repository, locator)
    }

    /// Build the render context. `None` before the first transition.
    pub fn render_context(&self) -> Option<RenderContext<'_>> {
        let active_lens = self.active_lens()?;
        let filter = active_lens.filter.as_deref();
        let mastery = MASTERY_LEVELS.map(|level| self.repository.by_type_and_mastery(filter, level));
        Some(RenderContext {
            mastery,
            lenses: self.repository.lenses(),
            active_lens,
            active_standard: self.active_standard(),
        })
    }
}
