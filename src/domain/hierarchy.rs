//! Ordered section map
//!
//! Sections of a notebook keyed by name. Iteration follows insertion order,
//! which is the authoring order reported by the automation service. Names are
//! the join key when two notebooks are reconciled, so a map never holds two
//! sections with the same name.

use super::section::Section;
use std::collections::HashMap;

/// Insertion-ordered mapping of section name to [`Section`]
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    entries: Vec<Section>,
    index: HashMap<String, usize>,
}

impl SectionMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a section under its name
    ///
    /// A section whose name is already present replaces the existing entry in
    /// place; its position in the iteration order does not change.
    pub fn insert(&mut self, section: Section) {
        match self.index.get(&section.name) {
            Some(&position) => self.entries[position] = section,
            None => {
                self.index.insert(section.name.clone(), self.entries.len());
                self.entries.push(section);
            }
        }
    }

    /// Looks a section up by name
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// Looks a section up by name for modification
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        match self.index.get(name) {
            Some(&position) => Some(&mut self.entries[position]),
            None => None,
        }
    }

    /// Whether a section with this name is present
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates sections in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.entries.iter()
    }

    /// Section names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|s| s.name.as_str()).collect()
    }
}

impl PartialEq for SectionMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for SectionMap {}

impl FromIterator<Section> for SectionMap {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        let mut map = SectionMap::new();
        for section in iter {
            map.insert(section);
        }
        map
    }
}

impl IntoIterator for SectionMap {
    type Item = Section;
    type IntoIter = std::vec::IntoIter<Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a SectionMap {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::SectionId;

    fn section(name: &str, id: &str) -> Section {
        Section::new(name, SectionId::new(id).unwrap())
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let map: SectionMap = vec![
            section("Zeta", "1"),
            section("Alpha", "2"),
            section("Mid", "3"),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.names(), vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let mut map = SectionMap::new();
        map.insert(section("A", "1"));
        map.insert(section("B", "2"));
        map.insert(section("A", "3"));

        assert_eq!(map.names(), vec!["A", "B"]);
        assert_eq!(map.get("A").unwrap().id.as_ref().unwrap().as_str(), "3");
    }

    #[test]
    fn test_get_mut_updates_entry() {
        let mut map = SectionMap::new();
        map.insert(section("A", "1"));

        map.get_mut("A").unwrap().has_pages = true;

        assert!(map.get("A").unwrap().has_pages);
        assert!(map.get_mut("missing").is_none());
    }

    #[test]
    fn test_contains_and_empty() {
        let mut map = SectionMap::new();
        assert!(map.is_empty());
        assert!(!map.contains("A"));

        map.insert(section("A", "1"));
        assert!(map.contains("A"));
        assert!(!map.is_empty());
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let forward: SectionMap = vec![section("A", "1"), section("B", "2")]
            .into_iter()
            .collect();
        let backward: SectionMap = vec![section("B", "2"), section("A", "1")]
            .into_iter()
            .collect();

        assert_ne!(forward, backward);
        assert_eq!(forward, forward.clone());
    }
}
