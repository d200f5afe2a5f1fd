use indexmap::IndexMap;
use log::trace;

use crate::sets::{element::Element, infinite::InfiniteSet, infinite::predefined};

/// Names starting with this prefix hold intermediate results of an expression
/// and never outlive the evaluation that created them.
pub const TEMP_PREFIX: &str = "_temp";

/// Whether `name` is an internal temporary.
#[must_use]
pub fn is_temp(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX)
}

/// A registered set.
#[derive(Debug, Clone)]
pub enum StoredSet {
    /// An explicitly enumerated set.
    Finite(Vec<Element>),
    /// A symbolic set.
    Infinite(InfiniteSet),
}

/// Named finite and infinite sets, in registration order.
///
/// A name lives in at most one of the two maps: registering a finite set
/// replaces an infinite one of the same name and vice versa.
#[derive(Debug, Clone)]
pub struct SetRegistry {
    finite:   IndexMap<String, Vec<Element>>,
    infinite: IndexMap<String, InfiniteSet>,
}

impl Default for SetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SetRegistry {
    /// A registry seeded with the predefined infinite sets.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (name, set) in predefined() {
            registry.insert_infinite(name, set);
        }
        registry
    }

    /// A registry without any set.
    #[must_use]
    pub fn empty() -> Self {
        Self { finite:   IndexMap::new(),
               infinite: IndexMap::new(), }
    }

    /// Whether `name` is registered in either map.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.finite.contains_key(name) || self.infinite.contains_key(name)
    }

    /// Whether `name` is a registered infinite set.
    #[must_use]
    pub fn is_infinite(&self, name: &str) -> bool {
        self.infinite.contains_key(name)
    }

    /// The elements of a finite set.
    #[must_use]
    pub fn finite(&self, name: &str) -> Option<&[Element]> {
        self.finite.get(name).map(Vec::as_slice)
    }

    /// An infinite set.
    #[must_use]
    pub fn infinite(&self, name: &str) -> Option<&InfiniteSet> {
        self.infinite.get(name)
    }

    /// A copy of whatever is registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<StoredSet> {
        self.finite
            .get(name)
            .map(|elements| StoredSet::Finite(elements.clone()))
            .or_else(|| self.infinite.get(name).cloned().map(StoredSet::Infinite))
    }

    pub(crate) fn insert_finite(&mut self, name: &str, elements: Vec<Element>) {
        self.infinite.shift_remove(name);
        self.finite.insert(name.to_string(), elements);
    }

    pub(crate) fn insert_infinite(&mut self, name: &str, set: InfiniteSet) {
        self.finite.shift_remove(name);
        self.infinite.insert(name.to_string(), set);
    }

    pub(crate) fn insert(&mut self, name: &str, set: StoredSet) {
        match set {
            StoredSet::Finite(elements) => self.insert_finite(name, elements),
            StoredSet::Infinite(set) => self.insert_infinite(name, set),
        }
    }

    /// Removes `name`, returning whether it was registered.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.finite.shift_remove(name).is_some() || self.infinite.shift_remove(name).is_some()
    }

    /// Every name, finite sets first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.finite
            .keys()
            .chain(self.infinite.keys())
            .map(String::as_str)
    }

    /// Finite sets in registration order.
    pub fn finite_sets(&self) -> impl Iterator<Item = (&str, &[Element])> {
        self.finite
            .iter()
            .map(|(name, elements)| (name.as_str(), elements.as_slice()))
    }

    /// Infinite sets in registration order.
    pub fn infinite_sets(&self) -> impl Iterator<Item = (&str, &InfiniteSet)> {
        self.infinite.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Drops every temporary, returning how many were removed.
    pub(crate) fn purge_temps(&mut self) -> usize {
        let before = self.finite.len() + self.infinite.len();
        self.finite.retain(|name, _| !is_temp(name));
        self.infinite.retain(|name, _| !is_temp(name));
        let purged = before - self.finite.len() - self.infinite.len();
        if purged > 0 {
            trace!("purged {purged} temporary sets");
        }
        purged
    }
}
