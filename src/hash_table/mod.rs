//! A hash map on open addressing with linear probing.
//!
//! Every entry lives directly in the slot array. A key hashes to a home slot
//! and, if that's taken by some other key, walks forward one slot at a time
//! (wrapping at the end) until it finds its key or an empty slot. Deleting
//! can't just empty a slot, because that would cut the probe path of any key
//! which walked past it; instead it leaves a tombstone, which lookups step
//! over and inserts are free to reuse.
//!
//! ```text
//!  home(1) = home(9) = home(17) = 1, capacity 8
//!
//!  [ _ | 1 | 9 | 17 | _ | _ | _ | _ ]     insert 1, 9, 17
//!  [ _ | 1 | † | 17 | _ | _ | _ | _ ]     delete 9, 17 still reachable
//!  [ _ | 1 | 25| 17 | _ | _ | _ | _ ]     insert 25 reuses the tombstone
//! ```
//!
//! Tombstones count against the load factor, since they lengthen probe paths
//! just as much as live entries do. Once the next insert would take the table
//! past [`MAX_LOAD_FACTOR`] the table is rebuilt from its live entries alone.

pub mod hash_set;

pub use hash_set::HashSet;

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;
use std::mem;
use std::slice;

use log::debug;

use crate::container::Container;
use crate::error::{Error, Result};

/// Occupied slots plus tombstones, over capacity, that an insert may not push
/// the table past.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

/// No table is ever smaller than this.
pub const MIN_CAPACITY: usize = 8;

enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(K, V),
}

/// How many slots hold `capacity` entries without crossing the load factor.
fn slots_for(capacity: usize) -> usize {
    ((capacity as f64 / MAX_LOAD_FACTOR).ceil() as usize)
        .saturating_add(1)
        .max(MIN_CAPACITY)
}

impl<K, V> Slot<K, V> {
    fn empty_slots(capacity: usize) -> Vec<Self> {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        slots
    }
}

/// A map with linear probing. `S` picks the hash function the same way it
/// does for the standard library's maps.
pub struct HashTable<K, V, S = RandomState> {
    hash_builder: S,
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
}

impl<K, V> HashTable<K, V, RandomState>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(0, Default::default())
    }

    /// A table with room for at least `capacity` entries before the first
    /// resize.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// The number of slots, live or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live entries and tombstones over capacity.
    pub fn load_factor(&self) -> f64 {
        (self.len + self.tombstones) as f64 / self.slots.len() as f64
    }

    /// Entries in slot order, which has nothing to do with insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            hash_builder,
            slots: Slot::empty_slots(slots_for(capacity)),
            len: 0,
            tombstones: 0,
        }
    }

    /// Stores a value under a key, returning whatever was stored there
    /// before.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len;

        if let Some(index) = self.find(&key) {
            if let Slot::Occupied(_, existing) = &mut self.slots[index] {
                return Some(mem::replace(existing, value));
            }
        }

        if self.over_load_factor() {
            self.rebuild();
        }

        let hash = self.hash(&key);
        if let Slot::Tombstone = Self::place(&mut self.slots, hash, key, value) {
            self.tombstones -= 1;
        }
        self.len += 1;

        #[cfg(test)]
        {
            assert_eq!(original_len + 1, self.len);
            self.accounting_test();
        }

        None
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find(key).map(|index| &self.slots[index]) {
            Some(Slot::Occupied(_, value)) => Ok(value),
            _ => Err(Error::NotFound),
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key).ok_or(Error::NotFound)?;
        match &mut self.slots[index] {
            Slot::Occupied(_, value) => Ok(value),
            _ => Err(Error::NotFound),
        }
    }

    /// Takes a key out of the table, leaving a tombstone in its slot.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key).ok_or(Error::NotFound)?;

        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(_, value) => {
                self.len -= 1;
                self.tombstones += 1;

                #[cfg(test)]
                self.accounting_test();

                Ok(value)
            }
            other => {
                self.slots[index] = other;
                Err(Error::NotFound)
            }
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    fn hash<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Walks the probe path for a key, returning the slot holding it. The walk
    /// stops at the first empty slot, or after visiting every slot once when a
    /// table has no empty slots left.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let capacity = self.slots.len();
        let home = (self.hash(key) % capacity as u64) as usize;

        for step in 0..capacity {
            let index = (home + step) % capacity;
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => continue,
                Slot::Occupied(k, _) if Q::eq(k.borrow(), key) => return Some(index),
                Slot::Occupied(..) => continue,
            }
        }

        None
    }

    fn over_load_factor(&self) -> bool {
        let used = self.len + self.tombstones + 1;
        used as f64 / self.slots.len() as f64 > MAX_LOAD_FACTOR
    }

    /// Moves the live entries into a fresh slot array, dropping tombstones.
    /// The table doubles when live entries are what filled it; when it was
    /// mostly tombstones it keeps its size.
    fn rebuild(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = if (self.len + 1) as f64 / old_capacity as f64 > MAX_LOAD_FACTOR / 2.0
        {
            old_capacity * 2
        } else {
            old_capacity
        };

        let mut fresh = Slot::empty_slots(new_capacity);
        for slot in mem::take(&mut self.slots) {
            if let Slot::Occupied(key, value) = slot {
                let hash = self.hash(&key);
                Self::place(&mut fresh, hash, key, value);
            }
        }

        debug!(
            "hash table rebuilt: capacity {} -> {}, {} entries, {} tombstones purged",
            old_capacity, new_capacity, self.len, self.tombstones
        );

        self.slots = fresh;
        self.tombstones = 0;
    }

    /// Puts an entry known not to be in `slots` into the first free slot on
    /// its probe path, handing back what that slot was before.
    fn place(slots: &mut [Slot<K, V>], hash: u64, key: K, value: V) -> Slot<K, V> {
        let capacity = slots.len();
        let home = (hash % capacity as u64) as usize;

        let index = (0..capacity)
            .map(|step| (home + step) % capacity)
            .find(|&index| !matches!(slots[index], Slot::Occupied(..)))
            .expect("the load factor keeps at least one slot free");

        mem::replace(&mut slots[index], Slot::Occupied(key, value))
    }

    #[cfg(test)]
    fn accounting_test(&self) {
        let live = self.slots.iter().filter(|s| matches!(s, Slot::Occupied(..))).count();
        let dead = self.slots.iter().filter(|s| matches!(s, Slot::Tombstone)).count();
        assert_eq!(live, self.len);
        assert_eq!(dead, self.tombstones);
        assert!(self.load_factor() <= MAX_LOAD_FACTOR);
    }
}

impl<K, V, S> Container for HashTable<K, V, S> {
    fn len(&self) -> usize {
        self.len
    }

    /// Empties every slot but keeps the capacity.
    fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.tombstones = 0;
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hasher(0, S::default())
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        });
        f.debug_map().entries(entries).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in &mut self.slots {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::{slots_for, HashTable, Slot, MIN_CAPACITY};
    use crate::identity_hasher::BuildIdentityHasher;
    use crate::{Container, Error};

    fn identity_table() -> HashTable<u64, &'static str, BuildIdentityHasher> {
        HashTable::with_hasher(BuildIdentityHasher)
    }

    fn slot_key(table: &HashTable<u64, &'static str, BuildIdentityHasher>, i: usize) -> Option<u64> {
        match &table.slots[i] {
            Slot::Occupied(k, _) => Some(*k),
            _ => None,
        }
    }

    #[test]
    fn set_get_delete() {
        let mut table = HashTable::new();
        assert_eq!(None, table.set("apple", 1));
        assert_eq!(None, table.set("banana", 2));
        assert_eq!(Some(1), table.set("apple", 3));

        assert_eq!(Ok(&3), table.get("apple"));
        assert_eq!(Ok(&2), table.get("banana"));
        assert_eq!(Err(Error::NotFound), table.get("cherry"));
        assert_eq!(2, table.len());

        *table.get_mut("banana").unwrap() += 10;
        assert_eq!(Ok(12), table.delete("banana"));
        assert_eq!(Err(Error::NotFound), table.delete("banana"));
        assert!(!table.contains("banana"));
        assert!(table.contains("apple"));
        assert_eq!(1, table.len());
    }

    #[test]
    fn collisions_probe_forward() {
        let mut table = identity_table();
        assert_eq!(MIN_CAPACITY, table.capacity());

        table.set(1, "one");
        table.set(9, "nine");
        table.set(17, "seventeen");

        assert_eq!(Some(1), slot_key(&table, 1));
        assert_eq!(Some(9), slot_key(&table, 2));
        assert_eq!(Some(17), slot_key(&table, 3));

        // probe wraps around the end of the slot array
        table.set(7, "seven");
        table.set(15, "fifteen");
        assert_eq!(Some(15), slot_key(&table, 0));
        assert_eq!(Ok(&"fifteen"), table.get(&15));
    }

    #[test]
    fn tombstones_keep_probe_paths_and_get_reused() {
        let mut table = identity_table();
        table.set(1, "one");
        table.set(9, "nine");
        table.set(17, "seventeen");

        assert_eq!(Ok("nine"), table.delete(&9));
        assert!(matches!(table.slots[2], Slot::Tombstone));
        assert_eq!(Ok(&"seventeen"), table.get(&17));
        assert_eq!(Err(Error::NotFound), table.get(&9));

        table.set(25, "twenty-five");
        assert_eq!(Some(25), slot_key(&table, 2));
        assert_eq!(0, table.tombstones);

        // updating a key past a tombstone mustn't duplicate it
        table.delete(&1).unwrap();
        assert_eq!(Some("seventeen"), table.set(17, "17"));
        assert_eq!(2, table.len());
    }

    #[test]
    fn grows_past_the_load_factor() {
        let mut table = identity_table();
        for k in 0..5 {
            table.set(k, "x");
        }
        assert_eq!(8, table.capacity());

        // a sixth entry would make 6/8 > 0.7
        table.set(5, "y");
        assert_eq!(16, table.capacity());
        for k in 0..5 {
            assert_eq!(Ok(&"x"), table.get(&k));
        }
        assert_eq!(Ok(&"y"), table.get(&5));
    }

    #[test]
    fn tombstone_heavy_table_rebuilds_in_place() {
        let mut table = identity_table();
        for k in 1..=5 {
            table.set(k, "x");
        }
        for k in 1..=4 {
            table.delete(&k).unwrap();
        }
        assert_eq!(4, table.tombstones);
        assert!((table.load_factor() - 5.0 / 8.0).abs() < f64::EPSILON);

        table.set(6, "y");
        assert_eq!(8, table.capacity());
        assert_eq!(0, table.tombstones);
        assert_eq!(2, table.len());
        assert_eq!(Ok(&"x"), table.get(&5));
    }

    #[test]
    fn latest_value_survives_churn() {
        let mut table = HashTable::with_capacity(4);
        for round in 0..10u32 {
            for k in 0..100u32 {
                table.set(k, round * 1000 + k);
            }
            for k in (0..100u32).filter(|k| k % 3 == 0) {
                table.delete(&k).unwrap();
            }
        }

        for k in 0..100u32 {
            if k % 3 == 0 {
                assert_eq!(Err(Error::NotFound), table.get(&k));
            } else {
                assert_eq!(Ok(&(9000 + k)), table.get(&k));
            }
        }
        assert_eq!(66, table.len());
    }

    #[test]
    fn iterators_and_clear() {
        let mut table: HashTable<u64, u64, BuildIdentityHasher> =
            (0..20).map(|k| (k, k * k)).collect();

        let mut keys: Vec<u64> = table.keys().copied().collect();
        keys.sort();
        assert_eq!((0..20).collect::<Vec<_>>(), keys);
        assert_eq!(20, table.iter().len());
        assert_eq!((0..20).map(|k| k * k).sum::<u64>(), table.values().sum::<u64>());

        let capacity = table.capacity();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(capacity, table.capacity());
        assert_eq!(None, table.iter().next());
    }

    #[test]
    fn with_capacity_avoids_resizing() {
        let mut table: HashTable<u64, (), BuildIdentityHasher> =
            HashTable::with_capacity_and_hasher(100, BuildIdentityHasher);
        let capacity = table.capacity();
        for k in 0..100 {
            table.set(k, ());
        }
        assert_eq!(capacity, table.capacity());
    }

    #[test]
    fn slot_count_saturates_for_huge_capacities() {
        assert_eq!(MIN_CAPACITY, slots_for(0));
        assert_eq!(16, slots_for(10));
        assert_eq!(usize::MAX, slots_for(usize::MAX));
        assert_eq!(usize::MAX, slots_for(usize::MAX - 1));
    }

    #[test]
    fn debug_shows_entries() {
        let mut table = identity_table();
        table.set(3, "three");
        assert_eq!("{3: \"three\"}", format!("{:?}", table));
    }
}
