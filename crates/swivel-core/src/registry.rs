//! Named element groups.
//!
//! The engine core takes plain element collections; callers usually address
//! elements through logical names instead ("sidebar", "toast"). An
//! [`ElementBank`] keeps that mapping: any number of elements can register
//! under one name, duplicates collapse, and registration order is preserved
//! so per-request element iteration stays deterministic.

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// A keyed collection of de-duplicated element groups.
#[derive(Debug, Clone, Default)]
pub struct ElementBank<E> {
    groups: IndexMap<String, IndexSet<E>>,
}

impl<E: Clone + Eq + Hash> ElementBank<E> {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }

    /// Register an element under a group name. Registering the same element
    /// twice is a no-op.
    pub fn register(&mut self, group: impl Into<String>, element: E) {
        self.groups.entry(group.into()).or_default().insert(element);
    }

    /// Remove an element from a group. An emptied group is dropped so its
    /// name reads as unregistered again.
    pub fn release(&mut self, group: &str, element: &E) {
        if let Some(elements) = self.groups.get_mut(group) {
            elements.shift_remove(element);
            if elements.is_empty() {
                self.groups.shift_remove(group);
            }
        }
    }

    /// The elements registered under a name, in registration order. `None`
    /// for an unknown or emptied group.
    pub fn elements(&self, group: &str) -> Option<&IndexSet<E>> {
        self.groups.get(group)
    }

    /// Check whether a group has any elements.
    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Registered group names, in registration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check whether the bank has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
