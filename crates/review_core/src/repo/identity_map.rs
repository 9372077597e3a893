//! Identity map for persisted reviews.
//!
//! # Invariants
//! - At most one handle per review id.
//! - Only persisted reviews are registered; keys match `Review::id()`.

use crate::model::review::{ReviewHandle, ReviewId};
use std::collections::HashMap;
use std::rc::Rc;

/// Cache of live review handles keyed by storage id.
#[derive(Debug, Default)]
pub struct IdentityMap {
    entries: HashMap<ReviewId, ReviewHandle>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the cached handle, sharing the same allocation.
    pub fn get(&self, id: ReviewId) -> Option<ReviewHandle> {
        self.entries.get(&id).map(Rc::clone)
    }

    pub fn contains(&self, id: ReviewId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Registers `handle` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: ReviewId, handle: ReviewHandle) {
        self.entries.insert(id, handle);
    }

    pub fn evict(&mut self, id: ReviewId) -> Option<ReviewHandle> {
        self.entries.remove(&id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::IdentityMap;
    use crate::model::employee::Employee;
    use crate::model::review::{Review, ReviewHandle};
    use std::rc::Rc;

    fn handle(summary: &str) -> ReviewHandle {
        Review::new(2022, summary, Employee::resolved(1, "Ada", "Analyst"))
            .unwrap()
            .into_handle()
    }

    #[test]
    fn get_returns_shared_handle() {
        let mut map = IdentityMap::new();
        let review = handle("kept");
        map.insert(4, Rc::clone(&review));

        let cached = map.get(4).unwrap();
        assert!(Rc::ptr_eq(&cached, &review));
        assert!(map.contains(4));
        assert!(map.get(5).is_none());
    }

    #[test]
    fn evict_and_clear_remove_entries() {
        let mut map = IdentityMap::new();
        map.insert(1, handle("one"));
        map.insert(2, handle("two"));
        assert_eq!(map.len(), 2);

        assert!(map.evict(1).is_some());
        assert!(map.evict(1).is_none());
        assert_eq!(map.len(), 1);

        map.clear();
        assert!(map.is_empty());
    }
}
