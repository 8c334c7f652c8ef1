//! Entity builder: parsed rows → standards and lenses.
//!
//! Runs once per session over the full row sequence, in document order.
//!
//! # Algorithm
//!
//! 1. Skip rows whose activity flag is not exactly `"y"` or `"Y"`.
//! 2. Give each accepted row the next 1-based id (counting accepted rows
//!    only, not source positions).
//! 3. Store the row as a [`Standard`].
//! 4. Register a [`Lens`] the first time a non-empty lens name appears.

use tracing::debug;

use crate::models::{FieldNames, Lens, Row, Standard};
use crate::repository::Repository;

/// Counts reported after a build pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub rows: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub lenses_added: usize,
}

/// Whether a row's activity flag marks it as live.
pub fn is_accepted(row: &Row, names: &FieldNames) -> bool {
    matches!(row.get(&names.active).map(String::as_str), Some("y" | "Y"))
}

/// Add every accepted row to `repo`.
pub fn build_entities<I>(repo: &mut Repository, rows: I, names: &FieldNames) -> BuildSummary
where
    I: IntoIterator<Item = Row>,
{
    let mut summary = BuildSummary::default();

    for row in rows {
        summary.rows += 1;
        if !is_accepted(&row, names) {
            summary.rejected += 1;
            continue;
        }

        let lens_name = row.get(&names.lens_name).cloned().unwrap_or_default();
        let lens_description = row
            .get(&names.lens_description)
            .cloned()
            .unwrap_or_default();

        let standard = Standard::from_row(repo.next_standard_id(), row, names);
        repo.push_standard(standard);
        summary.accepted += 1;

        if !lens_name.is_empty() && repo.by_name(&lens_name).is_none() {
            let lens = Lens::for_category(&lens_name, lens_description);
            debug!(name = %lens.name, href = %lens.href, "registered lens");
            repo.push_lens(lens);
            summary.lenses_added += 1;
        }
    }

    summary
}
