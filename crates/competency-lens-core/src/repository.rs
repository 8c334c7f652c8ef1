//! In-memory catalog of standards and lenses.
//!
//! The [`Repository`] owns both collections for the lifetime of a session.
//! Collections are append-only: the entity builder adds to them during
//! ingestion and nothing removes or mutates an entry afterwards, so the
//! positions handed out as [`LensKey`]s stay valid.
//!
//! # Lookups
//!
//! | Method | Matches on |
//! |--------|------------|
//! | [`by_id`](Repository::by_id) | standard id |
//! | [`by_name`](Repository::by_name) | lens display name |
//! | [`by_href`](Repository::by_href) | lens href slug |
//! | [`by_type_and_mastery`](Repository::by_type_and_mastery) | lens filter + mastery level |

use std::collections::HashMap;

use crate::models::{Lens, Standard};

/// Position of a lens in the repository's lens collection.
///
/// Only the repository hands these out, so a key always resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LensKey(usize);

impl LensKey {
    /// The implicit "all" lens, registered first in every repository.
    pub const ALL: LensKey = LensKey(0);
}

#[derive(Debug)]
pub struct Repository {
    standards: Vec<Standard>,
    lenses: Vec<Lens>,
    lens_by_name: HashMap<String, usize>,
    lens_by_href: HashMap<String, usize>,
}

impl Repository {
    /// Create a repository holding only the "all" lens.
    pub fn new(all_description: impl Into<String>) -> Self {
        let mut repo = Self {
            standards: Vec::new(),
            lenses: Vec::new(),
            lens_by_name: HashMap::new(),
            lens_by_href: HashMap::new(),
        };
        repo.push_lens(Lens::all(all_description));
        repo
    }

    pub fn standards(&self) -> &[Standard] {
        &self.standards
    }

    pub fn lenses(&self) -> &[Lens] {
        &self.lenses
    }

    pub fn lens(&self, key: LensKey) -> &Lens {
        &self.lenses[key.0]
    }

    pub fn all_lens(&self) -> &Lens {
        self.lens(LensKey::ALL)
    }

    /// Id the next accepted standard will receive.
    pub fn next_standard_id(&self) -> u32 {
        self.standards.len() as u32 + 1
    }

    /// Standard with exactly this id.
    pub fn by_id(&self, id: u32) -> Option<&Standard> {
        // Ids are assigned in insertion order, so the collection is sorted.
        self.standards
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|i| &self.standards[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&Lens> {
        self.key_by_name(name).map(|k| self.lens(k))
    }

    pub fn by_href(&self, href: &str) -> Option<&Lens> {
        self.key_by_href(href).map(|k| self.lens(k))
    }

    pub fn key_by_name(&self, name: &str) -> Option<LensKey> {
        self.lens_by_name.get(name).copied().map(LensKey)
    }

    /// First lens registered under `href`. Two category names can share a
    /// slug; the earlier one wins.
    pub fn key_by_href(&self, href: &str) -> Option<LensKey> {
        self.lens_by_href.get(href).copied().map(LensKey)
    }

    /// Standards at `mastery`, narrowed to one lens when `filter` is given.
    ///
    /// `None` is the "all" lens: every standard at that level matches
    /// regardless of lens. Results keep acceptance order.
    pub fn by_type_and_mastery(&self, filter: Option<&str>, mastery: &str) -> Vec<&Standard> {
        self.standards
            .iter()
            .filter(|s| s.mastery() == Some(mastery))
            .filter(|s| match filter {
                Some(f) => s.lens_name() == Some(f),
                None => true,
            })
            .collect()
    }

    /// Number of standards a lens shows across all mastery levels.
    pub fn count_for(&self, lens: &Lens) -> usize {
        if lens.is_all() {
            return self.standards.len();
        }
        self.standards
            .iter()
            .filter(|s| s.lens_name() == lens.filter.as_deref())
            .count()
    }

    pub(crate) fn push_standard(&mut self, standard: Standard) {
        debug_assert_eq!(standard.id, self.next_standard_id());
        self.standards.push(standard);
    }

    /// Register a lens. Returns `false` if the name is already taken.
    pub(crate) fn push_lens(&mut self, lens: Lens) -> bool {
        if self.lens_by_name.contains_key(&lens.name) {
            return false;
        }
        let idx = self.lenses.len();
        self.lens_by_name.insert(lens.name.clone(), idx);
        self.lens_by_href.entry(lens.href.clone()).or_insert(idx);
        self.lenses.push(lens);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldNames, Row};

    fn standard(id: u32, lens: &str, mastery: &str) -> Standard {
        let mut row = Row::new();
        row.insert("Lens".to_string(), lens.to_string());
        row.insert("Mastery".to_string(), mastery.to_string());
        Standard::from_row(id, row, &FieldNames::default())
    }

    fn sample() -> Repository {
        let mut repo = Repository::new("all of them");
        repo.push_standard(standard(1, "Technical", "2"));
        repo.push_standard(standard(2, "Leadership", "2"));
        repo.push_standard(standard(3, "Technical", "1"));
        repo.push_standard(standard(4, "Technical", "2"));
        repo.push_lens(Lens::for_category("Technical", "tech"));
        repo.push_lens(Lens::for_category("Leadership", "lead"));
        repo
    }

    #[test]
    fn test_new_repository_has_all_lens() {
        let repo = Repository::new("desc");
        assert_eq!(repo.lenses().len(), 1);
        assert_eq!(repo.all_lens().href, "all");
        assert_eq!(repo.all_lens().description, "desc");
        assert!(repo.standards().is_empty());
    }

    #[test]
    fn test_by_id() {
        let repo = sample();
        assert_eq!(repo.by_id(3).map(|s| s.id), Some(3));
        assert!(repo.by_id(0).is_none());
        assert!(repo.by_id(5).is_none());
    }

    #[test]
    fn test_lens_lookups() {
        let repo = sample();
        assert_eq!(repo.by_name("Technical").unwrap().href, "technical");
        assert_eq!(repo.by_href("leadership").unwrap().name, "Leadership");
        assert_eq!(repo.by_href("all").unwrap().name, "All Competencies");
        assert!(repo.by_name("technical").is_none());
        assert!(repo.by_href("Technical").is_none());
    }

    #[test]
    fn test_duplicate_lens_name_rejected() {
        let mut repo = sample();
        assert!(!repo.push_lens(Lens::for_category("Technical", "again")));
        assert_eq!(repo.lenses().len(), 3);
        assert_eq!(repo.by_name("Technical").unwrap().description, "tech");
    }

    #[test]
    fn test_by_type_and_mastery_all_lens() {
        let repo = sample();
        let ids: Vec<u32> = repo
            .by_type_and_mastery(None, "2")
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn test_by_type_and_mastery_filtered() {
        let repo = sample();
        let ids: Vec<u32> = repo
            .by_type_and_mastery(Some("Technical"), "2")
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(repo.by_type_and_mastery(Some("Technical"), "3").is_empty());
    }

    #[test]
    fn test_count_for() {
        let repo = sample();
        assert_eq!(repo.count_for(repo.all_lens()), 4);
        assert_eq!(repo.count_for(repo.by_name("Technical").unwrap()), 3);
    }
}
