//! Interning tables.
//!
//! An [`InternTable`] assigns each distinct value a dense [`InternId`] the
//! first time it is seen and returns the same id for every later equal
//! value. Entries are never evicted.

use hashbrown::HashMap;
use std::borrow::Borrow;
use std::hash::Hash;

use crate::handle::InternId;

/// Value-to-id table with reverse lookup.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    ids: HashMap<T, InternId>,
    values: Vec<T>,
}

impl<T: Clone + Eq + Hash> Default for InternTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> InternTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            values: Vec::new(),
        }
    }

    /// Returns the id of `value`, assigning the next free id if it is new.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct values are interned.
    pub fn intern(&mut self, value: T) -> InternId {
        self.intern_full(value).0
    }

    /// Like [`InternTable::intern`], also reporting whether the value was
    /// inserted by this call.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct values are interned.
    pub fn intern_full(&mut self, value: T) -> (InternId, bool) {
        if let Some(&id) = self.ids.get(&value) {
            return (id, false);
        }
        let index = u32::try_from(self.values.len())
            .unwrap_or_else(|_| panic!("intern table is full"));
        let id = InternId::new(index);
        self.ids.insert(value.clone(), id);
        self.values.push(value);
        (id, true)
    }

    /// Returns the value with the given id.
    #[must_use]
    pub fn get(&self, id: InternId) -> Option<&T> {
        self.values.get(id.index() as usize)
    }

    /// Returns the id of `value` without interning it.
    #[must_use]
    pub fn get_id<Q>(&self, value: &Q) -> Option<InternId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ids.get(value).copied()
    }

    /// Number of interned values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(id, value)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (InternId, &T)> {
        (0u32..).zip(&self.values).map(|(i, v)| (InternId::new(i), v))
    }
}
