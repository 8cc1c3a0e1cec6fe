//! A sorted map on a skip list.
//!
//! The bottom level is an ordinary sorted linked list of every entry. Each
//! level above it is an express lane holding a random subset of the level
//! below, about half as many, so a search can skip long runs of the list
//! before dropping down a level.
//!
//! ```text
//! level 2:  HEAD ───────────────────► 50 ──────────► nil
//! level 1:  HEAD ─────────► 20 ─────► 50 ──────────► nil
//! level 0:  HEAD ──► 10 ──► 20 ──► 30 ──► 50 ──► 60 ──► nil
//! ```
//!
//! A new node's height is one plus the number of trailing one bits in a
//! random `u32`, which is a coin flip per level. Nodes live in a Vec and link
//! to each other by index; slots freed by removals are reused.
//!
//! The random source is a type parameter. [`SkipList::new`] seeds a
//! [`SmallRng`] from [`DEFAULT_SEED`], so two lists built by the same sequence
//! of calls have the same shape; use [`SkipList::with_seed`] or
//! [`SkipList::with_rng`] to pick another source.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use log::debug;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::container::Container;
use crate::error::{Error, Result};

/// No node is ever taller than this.
pub const MAX_LEVEL: usize = 16;

/// What [`SkipList::new`] seeds its random source with.
pub const DEFAULT_SEED: u64 = 0x5eed_cafe_f00d_d00d;

type Link = Option<usize>;

struct Node<K, V> {
    key: K,
    value: V,
    /// One link per level this node stands in, bottom first.
    forward: Vec<Link>,
}

pub struct SkipList<K, V, R = SmallRng> {
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: [Link; MAX_LEVEL],
    level: usize,
    len: usize,
    rng: R,
}

impl<K: Ord, V> SkipList<K, V, SmallRng> {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<K: Ord, V, R: RngCore> SkipList<K, V, R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: [None; MAX_LEVEL],
            level: 1,
            len: 0,
            rng,
        }
    }

    /// Stores a value under a key, returning whatever was stored there
    /// before.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut update = [None; MAX_LEVEL];

        if let Some(found) = self.search(&key, &mut update) {
            return Some(mem::replace(&mut self.node_mut(found).value, value));
        }

        let height = self.random_height();
        if height > self.level {
            // update is already None (the head) for the new levels
            debug!("skip list grew from {} to {} levels", self.level, height);
            self.level = height;
        }

        let forward = (0..height)
            .map(|lvl| self.next_of(update[lvl], lvl))
            .collect();
        let idx = self.place(Node {
            key,
            value,
            forward,
        });

        for (lvl, prev) in update.iter().enumerate().take(height) {
            self.set_next(*prev, lvl, Some(idx));
        }
        self.len += 1;

        #[cfg(test)]
        self.structure_test();

        None
    }

    /// Takes a key out of the list, handing back its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut update = [None; MAX_LEVEL];
        let idx = self.search(key, &mut update).ok_or(Error::NotFound)?;

        let node = self.nodes[idx]
            .take()
            .expect("search only returns occupied slots");
        for (lvl, next) in node.forward.iter().enumerate() {
            self.set_next(update[lvl], lvl, *next);
        }
        self.free.push(idx);
        self.len -= 1;

        while self.level > 1 && self.head[self.level - 1].is_none() {
            self.level -= 1;
        }

        #[cfg(test)]
        self.structure_test();

        Ok(node.value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.find(key)?;
        Some(&self.node(idx).value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.find(key)?;
        Some(&mut self.node_mut(idx).value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = self.node(self.head[0]?);
        Some((&node.key, &node.value))
    }

    /// The entry with the largest key, found by running along each level as
    /// far as it goes before dropping down.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut prev: Link = None;
        for lvl in (0..self.level).rev() {
            while let Some(next) = self.next_of(prev, lvl) {
                prev = Some(next);
            }
        }

        let node = self.node(prev?);
        Some((&node.key, &node.value))
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, R> {
        Iter {
            list: self,
            next: self.head[0],
            remaining: self.len,
        }
    }

    /// How many levels are in use right now.
    pub fn levels(&self) -> usize {
        self.level
    }

    /// Walks down from the top level, stopping on each level at the last node
    /// whose key is less than `key` and noting it in `update` (`None` being
    /// the head). Returns the node holding `key`, if any.
    fn search<Q>(&self, key: &Q, update: &mut [Link; MAX_LEVEL]) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut prev: Link = None;

        for lvl in (0..self.level).rev() {
            while let Some(next) = self.next_of(prev, lvl) {
                if Q::cmp(self.node(next).key.borrow(), key) == Ordering::Less {
                    prev = Some(next);
                } else {
                    break;
                }
            }
            update[lvl] = prev;
        }

        self.next_of(prev, 0)
            .filter(|&idx| Q::eq(self.node(idx).key.borrow(), key))
    }

    fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key, &mut [None; MAX_LEVEL])
    }

    fn random_height(&mut self) -> usize {
        let height = 1 + self.rng.next_u32().trailing_ones() as usize;
        height.min(MAX_LEVEL)
    }

    fn next_of(&self, prev: Link, lvl: usize) -> Link {
        match prev {
            None => self.head[lvl],
            Some(idx) => self.node(idx).forward[lvl],
        }
    }

    fn set_next(&mut self, prev: Link, lvl: usize, next: Link) {
        match prev {
            None => self.head[lvl] = next,
            Some(idx) => self.node_mut(idx).forward[lvl] = next,
        }
    }

    fn place(&mut self, node: Node<K, V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn node(&self, idx: usize) -> &Node<K, V> {
        self.nodes[idx]
            .as_ref()
            .expect("linked slots are occupied")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.nodes[idx]
            .as_mut()
            .expect("linked slots are occupied")
    }

    /// Every level is sorted, and level `k` holds exactly the nodes at least
    /// `k + 1` tall, which makes each level a subset of the one below.
    #[cfg(test)]
    fn structure_test(&self) {
        let mut bottom = 0;
        let mut link = self.head[0];
        while let Some(idx) = link {
            bottom += 1;
            link = self.node(idx).forward[0];
        }
        assert_eq!(self.len, bottom);

        for lvl in 0..MAX_LEVEL {
            let mut count = 0;
            let mut prev: Option<&K> = None;
            let mut link = self.head[lvl];

            while let Some(idx) = link {
                let node = self.node(idx);
                assert!(node.forward.len() > lvl);
                if let Some(prev) = prev {
                    assert!(prev < &node.key);
                }
                prev = Some(&node.key);
                count += 1;
                link = node.forward[lvl];
            }

            let tall_enough = self
                .nodes
                .iter()
                .flatten()
                .filter(|node| node.forward.len() > lvl)
                .count();
            assert_eq!(tall_enough, count);

            if lvl >= self.level {
                assert_eq!(0, count);
            }
        }
    }
}

impl<K, V, R> Container for SkipList<K, V, R> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = [None; MAX_LEVEL];
        self.level = 1;
        self.len = 0;
    }
}

impl<K: Ord, V> Default for SkipList<K, V, SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, R> fmt::Debug for SkipList<K, V, R>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    R: RngCore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipList<K, V, SmallRng> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<K: Ord, V, R: RngCore> Extend<(K, V)> for SkipList<K, V, R> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

pub struct Iter<'a, K, V, R> {
    list: &'a SkipList<K, V, R>,
    next: Link,
    remaining: usize,
}

impl<'a, K: Ord, V, R: RngCore> Iterator for Iter<'a, K, V, R> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.next?);
        self.next = node.forward[0];
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V, R: RngCore> ExactSizeIterator for Iter<'_, K, V, R> {}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::{SkipList, MAX_LEVEL};
    use crate::{Container, Error};

    fn make_rng() -> SmallRng {
        SmallRng::seed_from_u64(12345)
    }

    #[test]
    fn new_is_empty() {
        let list: SkipList<u64, String> = SkipList::new();
        assert!(list.is_empty());
        assert_eq!(None, list.first());
        assert_eq!(None, list.last());
        assert_eq!(1, list.levels());
    }

    #[test]
    fn insert_get_replace() {
        let mut list = SkipList::with_rng(make_rng());
        assert_eq!(None, list.insert(100, "first"));
        assert_eq!(Some("first"), list.insert(100, "second"));
        assert_eq!(1, list.len());
        assert_eq!(Some(&"second"), list.get(&100));
        assert_eq!(None, list.get(&99));

        *list.get_mut(&100).unwrap() = "third";
        assert_eq!(Some((&100, &"third")), list.first());
    }

    #[test]
    fn ascending_order_from_any_insert_order() {
        let mut keys: Vec<u32> = (0..500).collect();
        keys.shuffle(&mut make_rng());

        let mut list = SkipList::with_seed(7);
        for k in &keys {
            list.insert(*k, k * 2);
        }

        let walked: Vec<u32> = list.iter().map(|(k, _)| *k).collect();
        assert_eq!((0..500).collect::<Vec<_>>(), walked);
        assert_eq!(Some((&0, &0)), list.first());
        assert_eq!(Some((&499, &998)), list.last());
        assert_eq!(500, list.iter().len());
        assert!(list.levels() > 1);
        assert!(list.levels() <= MAX_LEVEL);
    }

    #[test]
    fn remove_and_reuse_slots() {
        let mut list: SkipList<u32, u32> = (0..100).map(|k| (k, k)).collect();
        for k in (0..100).filter(|k| k % 2 == 1) {
            assert_eq!(Ok(k), list.remove(&k));
        }
        assert_eq!(Err(Error::NotFound), list.remove(&1));
        assert_eq!(50, list.len());
        assert!(!list.contains(&51));
        assert!(list.contains(&50));

        let slots = list.nodes.len();
        for k in 100..150 {
            list.insert(k, k);
        }
        assert_eq!(slots, list.nodes.len());
        assert_eq!(Some((&149, &149)), list.last());
    }

    #[test]
    fn levels_shrink_when_emptied() {
        let mut list = SkipList::with_rng(make_rng());
        for k in 0..1000 {
            list.insert(k, ());
        }
        assert!(list.levels() > 1);

        for k in 0..1000 {
            list.remove(&k).unwrap();
        }
        assert!(list.is_empty());
        assert_eq!(1, list.levels());
        assert_eq!(None, list.last());
    }

    #[test]
    fn same_seed_same_shape() {
        let a: SkipList<u32, ()> = (0..200).map(|k| (k, ())).collect();
        let b: SkipList<u32, ()> = (0..200).map(|k| (k, ())).collect();
        let heights = |list: &SkipList<u32, ()>| -> Vec<usize> {
            list.nodes
                .iter()
                .flatten()
                .map(|node| node.forward.len())
                .collect()
        };
        assert_eq!(heights(&a), heights(&b));
    }

    #[test]
    fn borrowed_lookups() {
        let mut list = SkipList::new();
        list.insert(String::from("pear"), 3);
        list.insert(String::from("apple"), 1);
        assert_eq!(Some(&1), list.get("apple"));
        assert_eq!(Ok(3), list.remove("pear"));
        assert_eq!("{\"apple\": 1}", format!("{:?}", list));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(None, list.first());
    }
}
