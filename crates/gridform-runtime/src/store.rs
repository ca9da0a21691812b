#![forbid(unsafe_code)]

//! Item list storage seam.
//!
//! The caller owns the canonical list. The surface reads a snapshot before
//! each drop and writes the whole planned list back in one `set`; it never
//! edits the stored list in place.

use gridform_core::Item;

/// Where the surface reads and writes the item list.
pub trait ItemStore<P> {
    /// Snapshot of the current list.
    fn get(&self) -> Vec<Item<P>>;

    /// Replace the list wholesale.
    fn set(&mut self, items: Vec<Item<P>>);
}

/// In-memory store with a write counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore<P> {
    items: Vec<Item<P>>,
    version: u64,
}

impl<P> MemoryStore<P> {
    #[must_use]
    pub fn new(items: Vec<Item<P>>) -> Self {
        Self { items, version: 0 }
    }

    /// Number of `set` calls so far.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Borrow the stored list.
    #[must_use]
    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Item<P>> {
        self.items
    }
}

impl<P> Default for MemoryStore<P> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<P: Clone> ItemStore<P> for MemoryStore<P> {
    fn get(&self) -> Vec<Item<P>> {
        self.items.clone()
    }

    fn set(&mut self, items: Vec<Item<P>>) {
        self.items = items;
        self.version = self.version.saturating_add(1);
    }
}
