//! Core data models: rows, standards, and lenses.
//!
//! A [`Row`] is what the row ingestor yields: one header→value mapping per
//! CSV record. Accepted rows become [`Standard`]s; distinct lens names become
//! [`Lens`]es. Both are immutable once created.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::slug::slugify;

/// A parsed source row, keyed by header name.
pub type Row = BTreeMap<String, String>;

/// Mastery levels in display order. Values match the source formatting.
pub const MASTERY_LEVELS: [&str; 3] = ["1", "2", "3"];

/// Href of the implicit lens that shows every standard.
pub const ALL_LENS_HREF: &str = "all";

/// Display name of the implicit lens that shows every standard.
pub const ALL_LENS_NAME: &str = "All Competencies";

/// Header names of the columns the catalog interprets.
///
/// Every other column is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub active: String,
    pub lens_name: String,
    pub lens_description: String,
    pub mastery: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            active: "Active (y/n)".to_string(),
            lens_name: "Lens".to_string(),
            lens_description: "Lens_Description".to_string(),
            mastery: "Mastery".to_string(),
        }
    }
}

/// A single competency record.
///
/// Serializes as its source fields plus `id`, which is the shape handed to
/// renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standard {
    pub id: u32,
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
    #[serde(skip)]
    lens: Option<String>,
    #[serde(skip)]
    mastery: Option<String>,
}

impl Standard {
    /// Build a standard from a source row. An `id` column in the row is
    /// replaced by the assigned id.
    pub fn from_row(id: u32, mut row: Row, names: &FieldNames) -> Self {
        row.remove("id");
        let lens = row.get(&names.lens_name).cloned();
        let mastery = row.get(&names.mastery).cloned();
        Self {
            id,
            fields: row,
            lens,
            mastery,
        }
    }

    /// Raw value of any source column.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// The lens (category) key this standard belongs to.
    pub fn lens_name(&self) -> Option<&str> {
        self.lens.as_deref()
    }

    pub fn mastery(&self) -> Option<&str> {
        self.mastery.as_deref()
    }
}

/// A named filter category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lens {
    pub name: String,
    pub href: String,
    /// Category key matched against [`Standard::lens_name`]. `None` for the
    /// "all" lens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub description: String,
}

impl Lens {
    /// The implicit lens that matches every standard.
    pub fn all(description: impl Into<String>) -> Self {
        Self {
            name: ALL_LENS_NAME.to_string(),
            href: ALL_LENS_HREF.to_string(),
            filter: None,
            description: description.into(),
        }
    }

    /// A lens for one source category, first seen with `description`.
    pub fn for_category(name: &str, description: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            href: slugify(name),
            filter: Some(name.to_string()),
            description: description.into(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.filter.is_none()
    }
}
