use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FromIterator;

use super::{HashTable, Keys};
use crate::container::Container;
use crate::error::Result;

/// A set of values, stored as the keys of a [`HashTable`] with nothing for
/// values.
pub struct HashSet<T, S = RandomState> {
    table: HashTable<T, (), S>,
}

impl<T> HashSet<T, RandomState>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
        }
    }
}

impl<T, S> HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::with_hasher(hash_builder),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Adds a value, returning whether it was new.
    pub fn insert(&mut self, value: T) -> bool {
        self.table.set(value, ()).is_none()
    }

    pub fn remove<Q>(&mut self, value: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.delete(value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains(value)
    }
}

impl<T, S> HashSet<T, S> {
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn iter(&self) -> Keys<'_, T, ()> {
        self.table.keys()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    /// Everything in either set. The result hashes with this set's hasher.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.empty_like();
        out.extend(self.iter().cloned());
        out.extend(other.iter().cloned());
        out
    }

    /// Everything in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = self.empty_like();
        out.extend(self.iter().filter(|v| other.contains(*v)).cloned());
        out
    }

    /// Everything in this set that isn't in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = self.empty_like();
        out.extend(self.iter().filter(|v| !other.contains(*v)).cloned());
        out
    }

    fn empty_like(&self) -> Self {
        Self::with_hasher(self.table.hash_builder.clone())
    }
}

impl<T, S> Container for HashSet<T, S> {
    fn len(&self) -> usize {
        self.table.len()
    }

    fn clear(&mut self) {
        self.table.clear();
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self {
            table: HashTable::default(),
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for HashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.table.iter().map(|(value, _)| value))
            .finish()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
