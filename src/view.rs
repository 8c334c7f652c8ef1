//! The standards view: wires user input, history, and rendering to the
//! selection state.
//!
//! [`StandardView`] owns one session's [`ApplicationContext`] together with
//! the [`HistoryHost`] and [`Renderer`] it talks to.
//!
//! # Event handling
//!
//! | Entry point | Trigger | Pushes history |
//! |-------------|---------|----------------|
//! | [`on_parse_complete`](StandardView::on_parse_complete) | rows ingested | no |
//! | [`on_lens`](StandardView::on_lens) | lens clicked | yes |
//! | [`on_show_detail`](StandardView::on_show_detail) | standard clicked | yes |
//! | [`on_hide_detail`](StandardView::on_hide_detail) | detail dismissed | unless forced |
//! | [`pop_history`](StandardView::pop_history) | back / forward | no |
//! | [`load_hash`](StandardView::load_hash) | deep link opened | no |
//!
//! Each entry point runs one transition, then re-renders if it changed
//! anything. Closing the detail panel from a render is reported back as a
//! queued dismissal, handled after the render returns.

use anyhow::Result;
use competency_lens_core::builder::{build_entities, BuildSummary};
use competency_lens_core::context::ApplicationContext;
use competency_lens_core::locator::parse_hash;
use competency_lens_core::models::{FieldNames, Row};
use competency_lens_core::navigation::{add_history, HistoryHost, PopEvent};
use competency_lens_core::repository::Repository;
use competency_lens_core::state::Change;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::render::Renderer;

/// Open detail panel. `force_close` is set when the view itself hides it.
#[derive(Debug, Default)]
struct DetailPanel {
    force_close: bool,
}

#[derive(Debug)]
enum Signal {
    DetailHidden,
}

pub struct StandardView<R: Renderer> {
    app: ApplicationContext,
    fields: FieldNames,
    history: Box<dyn HistoryHost>,
    renderer: R,
    detail: Option<DetailPanel>,
    pending: VecDeque<Signal>,
    renders: usize,
}

impl<R: Renderer> StandardView<R> {
    /// A view with only the "all" lens, waiting for rows.
    pub fn new(
        all_description: impl Into<String>,
        fields: FieldNames,
        history: Box<dyn HistoryHost>,
        renderer: R,
    ) -> Self {
        Self {
            app: ApplicationContext::new(Repository::new(all_description)),
            fields,
            history,
            renderer,
            detail: None,
            pending: VecDeque::new(),
            renders: 0,
        }
    }

    pub fn app(&self) -> &ApplicationContext {
        &self.app
    }

    pub fn history(&self) -> &dyn HistoryHost {
        self.history.as_ref()
    }

    pub fn history_mut(&mut self) -> &mut dyn HistoryHost {
        self.history.as_mut()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Number of frames rendered so far.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail.is_some()
    }

    /// Build entities from the ingested rows, then apply the current hash.
    pub fn on_parse_complete<I>(&mut self, rows: I) -> Result<BuildSummary>
    where
        I: IntoIterator<Item = Row>,
    {
        let summary = build_entities(self.app.repository_mut(), rows, &self.fields);
        info!(
            rows = summary.rows,
            accepted = summary.accepted,
            rejected = summary.rejected,
            lenses = summary.lenses_added,
            "catalog built"
        );
        if summary.accepted == 0 {
            warn!("no active standards in source; rendering an empty catalog");
        }
        self.load_hash()?;
        Ok(summary)
    }

    /// Decode the host's current hash and apply it without pushing history.
    pub fn load_hash(&mut self) -> Result<()> {
        let hash = self.history.location_hash();
        let locator = parse_hash(&hash);
        debug!(%hash, ?locator, "decode location");
        let change = self.app.set_state(&locator);
        self.commit(change)
    }

    /// Back/forward navigation. Events without state are ignored.
    pub fn pop_history(&mut self, event: PopEvent) -> Result<()> {
        let Some(locator) = event.state else {
            debug!("popstate without state; ignoring");
            return Ok(());
        };
        let change = self.app.set_state(&locator);
        self.commit(change)
    }

    /// A lens was clicked. Returns `false` for an unknown lens name.
    pub fn on_lens(&mut self, name: &str) -> Result<bool> {
        let Some(key) = self.app.repository().key_by_name(name) else {
            warn!(%name, "unknown lens");
            return Ok(false);
        };
        let repo = self.app.repository();
        add_history(self.history.as_mut(), repo.lens(key), None);
        let change = self.app.select_lens(key);
        self.commit(change)?;
        Ok(true)
    }

    /// A standard was clicked. Returns `false` for an unknown id.
    pub fn on_show_detail(&mut self, id: u32) -> Result<bool> {
        let (Some(lens), Some(standard)) = (self.app.active_lens(), self.app.repository().by_id(id))
        else {
            warn!(id, "unknown standard");
            return Ok(false);
        };
        add_history(self.history.as_mut(), lens, Some(standard));
        let change = self.app.select_standard(id).unwrap_or_default();
        self.commit(change)?;
        Ok(true)
    }

    /// The detail panel was dismissed.
    ///
    /// A dismissal the user caused pushes `(active lens, no standard)`; one
    /// caused by the view hiding the panel after a transition does not.
    pub fn on_hide_detail(&mut self) -> Result<()> {
        let change = self.hide_detail();
        self.commit(change)
    }

    /// Rebuild the context and hand it to the renderer.
    pub fn render(&mut self) -> Result<()> {
        let Some(ctx) = self.app.render_context() else {
            return Ok(());
        };
        self.renderer.render(&ctx)?;
        self.renders += 1;

        if ctx.active_standard.is_some() {
            // A freshly shown panel supersedes any dismissal still queued.
            self.pending.clear();
            self.detail = Some(DetailPanel::default());
            self.renderer.show_detail(&ctx)?;
        } else if let Some(panel) = self.detail.as_mut() {
            panel.force_close = true;
            self.pending.push_back(Signal::DetailHidden);
            self.renderer.hide_detail()?;
        }
        Ok(())
    }

    fn hide_detail(&mut self) -> Change {
        let Some(panel) = self.detail.take() else {
            return Change::default();
        };
        if !panel.force_close {
            if let Some(lens) = self.app.active_lens() {
                add_history(self.history.as_mut(), lens, None);
            }
        }
        self.app.clear_standard()
    }

    /// Render if `change` moved anything, then drain queued signals.
    fn commit(&mut self, change: Change) -> Result<()> {
        if change.any() {
            self.render()?;
        }
        while let Some(signal) = self.pending.pop_front() {
            match signal {
                Signal::DetailHidden => {
                    let change = self.hide_detail();
                    if change.any() {
                        self.render()?;
                    }
                }
            }
        }
        Ok(())
    }
}
