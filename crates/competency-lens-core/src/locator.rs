//! Locators: the serialized form of a (lens, standard) selection.
//!
//! A selection has two interchangeable representations:
//!
//! | Form | Example |
//! |------|---------|
//! | Hash path | `#/technical/4/` |
//! | History-state record | `{"lens": "technical", "standard": 4}` |
//!
//! [`Locator`] is the history-state record; [`Locator::to_hash`] and
//! [`parse_hash`] convert to and from the hash path.

use serde::{Deserialize, Serialize};

use crate::models::{Lens, Standard, ALL_LENS_HREF};

/// A lens href plus an optional standard id.
///
/// Values are unresolved: the href or id may not exist in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    pub lens: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<u32>,
}

impl Locator {
    pub fn new(lens: impl Into<String>, standard: Option<u32>) -> Self {
        Self {
            lens: lens.into(),
            standard,
        }
    }

    /// The default view: every standard, no detail open.
    pub fn all() -> Self {
        Self::new(ALL_LENS_HREF, None)
    }

    /// Locator for a resolved selection.
    pub fn for_selection(lens: &Lens, standard: Option<&Standard>) -> Self {
        Self::new(lens.href.clone(), standard.map(|s| s.id))
    }

    /// `#/<lens>/` or `#/<lens>/<id>/`.
    pub fn to_hash(&self) -> String {
        match self.standard {
            Some(id) => format!("#/{}/{}/", self.lens, id),
            None => format!("#/{}/", self.lens),
        }
    }
}

/// Decode a location hash.
///
/// The hash is split on `/`:
///
/// - 3 segments (`#/lens/`) select the lens only.
/// - 4 segments (`#/lens/id/`) select the lens and a standard. A segment
///   that is not a decimal id selects no standard.
/// - Any other count, including the empty hash and `#/`, selects the
///   "all" lens.
pub fn parse_hash(hash: &str) -> Locator {
    let parts: Vec<&str> = hash.split('/').collect();
    match parts.as_slice() {
        [_, lens, _] => Locator::new(*lens, None),
        [_, lens, id, _] => Locator::new(*lens, id.parse().ok()),
        _ => Locator::all(),
    }
}
