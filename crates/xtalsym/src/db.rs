//! Deduplicated in-memory object database.
//!
//! Higher layers insert canonical objects here to guarantee a
//! symmetry-deduplicated collection. Storage and commit mechanics beyond the
//! in-memory collection are external concerns; `commit` only flushes the
//! dirty flag so callers can observe whether anything changed since the last
//! flush.

use crate::compare::SymCompare;

/// Stable reference into a `Database`. Valid for the database it came from;
/// records are never removed, so references never dangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DbRef(pub usize);

/// Ordered, deduplicated store keyed by a comparator.
///
/// Records are kept in insertion order; lookup is a linear scan with the
/// comparator's `equal`. Collection sizes here are enumeration-scale
/// (hundreds to thousands), so the scan is not a hotspot.
#[derive(Clone, Debug)]
pub struct Database<T, C> {
    cmp: C,
    records: Vec<T>,
    dirty: bool,
}

impl<T, C: SymCompare<T>> Database<T, C> {
    pub fn new(cmp: C) -> Self {
        Self {
            cmp,
            records: Vec::new(),
            dirty: false,
        }
    }

    /// Look up a record equal to `key` under the comparator.
    pub fn find(&self, key: &T) -> Option<DbRef> {
        self.records
            .iter()
            .position(|r| self.cmp.equal(r, key))
            .map(DbRef)
    }

    /// Insert-or-find: returns the record's reference and whether a new
    /// record was created.
    pub fn insert(&mut self, obj: T) -> (DbRef, bool) {
        if let Some(r) = self.find(&obj) {
            return (r, false);
        }
        self.records.push(obj);
        self.dirty = true;
        (DbRef(self.records.len() - 1), true)
    }

    /// Flush the dirty flag; returns true if anything was inserted since the
    /// last commit.
    pub fn commit(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn get(&self, r: DbRef) -> Option<&T> {
        self.records.get(r.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}
