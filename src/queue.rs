//! First-in first-out queues: an unbounded one which grows as it needs to, and
//! a fixed-capacity ring buffer which refuses to grow at all.

use std::collections::{vec_deque, VecDeque};
use std::iter::FromIterator;

use crate::container::Container;
use crate::error::{Error, Result};

/// Unbounded FIFO queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Adds a value to the back of the queue.
    pub fn enqueue(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Takes the value at the front of the queue.
    pub fn dequeue(&mut self) -> Result<T> {
        self.items.pop_front().ok_or(Error::EmptyContainer)
    }

    /// Looks at the front of the queue, which is the next thing `dequeue`
    /// would hand out.
    pub fn peek(&self) -> Result<&T> {
        self.items.front().ok_or(Error::EmptyContainer)
    }

    /// Front to back.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Container for Queue<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// A FIFO queue over a ring buffer allocated once, up front. Once it's full
/// it stays full until something is dequeued; nothing is ever overwritten.
///
/// The slots are `Option<T>` so a dequeued slot actually gives up its value
/// rather than leaving a stale copy lying around in the buffer.
#[derive(Debug, Clone)]
pub struct CircularQueue<T> {
    /// The ring itself. Its length is the capacity and never changes.
    slots: Vec<Option<T>>,

    /// Index of the front of the queue.
    head: usize,

    /// Number of occupied slots, counting forward from `head`.
    len: usize,
}

impl<T> CircularQueue<T> {
    /// Creates a queue which holds at most `capacity` values. A capacity of
    /// zero makes a queue which is permanently full.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            slots,
            head: 0,
            len: 0,
        }
    }

    /// The most this queue will ever hold.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Adds a value to the back of the queue. A full queue reports
    /// [`Error::FullContainer`] and drops the value; use
    /// [`try_enqueue`](Self::try_enqueue) to get it back instead.
    pub fn enqueue(&mut self, value: T) -> Result<()> {
        let capacity = self.capacity();
        self.try_enqueue(value)
            .map_err(|_| Error::FullContainer { capacity })
    }

    /// Adds a value to the back of the queue, handing it straight back if
    /// there's no room.
    pub fn try_enqueue(&mut self, value: T) -> std::result::Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        let tail = self.slot(self.len);
        self.slots[tail] = Some(value);
        self.len += 1;

        Ok(())
    }

    /// Takes the value at the front of the queue.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }

        let value = self.slots[self.head]
            .take()
            .expect("occupied slot in circular queue was empty");
        self.head = self.slot(1);
        self.len -= 1;

        Ok(value)
    }

    /// The front of the queue.
    pub fn peek(&self) -> Result<&T> {
        self.get(0).ok_or(Error::EmptyContainer)
    }

    /// The back of the queue, i.e. the most recently enqueued value.
    pub fn peek_back(&self) -> Result<&T> {
        match self.len {
            0 => Err(Error::EmptyContainer),
            len => self.get(len - 1).ok_or(Error::EmptyContainer),
        }
    }

    /// Front to back.
    pub fn iter(&self) -> CircularQueueIter<'_, T> {
        CircularQueueIter {
            queue: self,
            offset: 0,
        }
    }

    /// The value `offset` places back from the front.
    fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.len {
            return None;
        }

        self.slots[self.slot(offset)].as_ref()
    }

    /// Translates an offset from the head into an index into the ring.
    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.capacity()
    }
}

impl<T> Container for CircularQueue<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }

        self.head = 0;
        self.len = 0;
    }
}

pub struct CircularQueueIter<'a, T> {
    queue: &'a CircularQueue<T>,
    offset: usize,
}

impl<'a, T> Iterator for CircularQueueIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.queue.get(self.offset)?;
        self.offset += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.queue.len - self.offset;
        (remaining, Some(remaining))
    }
}
