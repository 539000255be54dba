//! Registry of live entity instances keyed by storage id.
//!
//! # Invariants
//! - At most one live instance per id.
//! - Entries are only removed explicitly; there is no eviction.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a live entity instance.
///
/// Two handles refer to the same row object iff `Rc::ptr_eq` holds.
pub type Shared<T> = Rc<RefCell<T>>;

#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: HashMap<i64, Shared<T>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> IdentityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resident instance for `id`, if any.
    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.get(&id).map(Rc::clone)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resident ids in ascending order.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn insert(&mut self, id: i64, instance: Shared<T>) {
        self.entries.insert(id, instance);
    }

    pub(crate) fn remove(&mut self, id: i64) -> Option<Shared<T>> {
        self.entries.remove(&id)
    }
}
