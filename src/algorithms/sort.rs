//! In-place comparison sorts.
//!
//! Each sort comes as a plain function over `T: Ord` and a `_by` variant
//! taking a comparator, the same split the standard library makes. None of
//! them can fail; empty and one-element slices are left alone.
//!
//! | Sort | Stable | Extra space | Worst case |
//! |------|--------|-------------|------------|
//! | [`bubble_sort`] | yes | O(1) | O(n²) |
//! | [`insertion_sort`] | yes | O(1) | O(n²) |
//! | [`selection_sort`] | no | O(1) | O(n²) |
//! | [`merge_sort`] | yes | O(n) | O(n log n) |
//! | [`quick_sort`] | no | O(log n) | O(n²) |
//! | [`heap_sort`] | no | O(1) | O(n log n) |

use std::cmp::Ordering;
use std::mem;

/// Quicksort hands slices this short over to insertion sort.
const INSERTION_THRESHOLD: usize = 16;

pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    is_sorted_by(v, |a, b| a.cmp(b))
}

/// Whether no element compares greater than the one after it.
pub fn is_sorted_by<T, F>(v: &[T], mut compare: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    v.windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

pub fn bubble_sort<T: Ord>(v: &mut [T]) {
    bubble_sort_by(v, |a, b| a.cmp(b))
}

/// Swaps neighbors until nothing is out of order. Everything past the last
/// swap of a pass is already in its final place, so the next pass stops
/// there, and a pass with no swaps at all ends the sort.
pub fn bubble_sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut end = v.len();

    while end > 1 {
        let mut last_swap = 0;
        for i in 1..end {
            if compare(&v[i - 1], &v[i]) == Ordering::Greater {
                v.swap(i - 1, i);
                last_swap = i;
            }
        }
        end = last_swap;
    }
}

pub fn insertion_sort<T: Ord>(v: &mut [T]) {
    insertion_sort_by(v, |a, b| a.cmp(b))
}

/// Grows a sorted prefix one element at a time, walking each new element
/// back past everything larger than it.
pub fn insertion_sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && compare(&v[j - 1], &v[j]) == Ordering::Greater {
            v.swap(j - 1, j);
            j -= 1;
        }
    }
}

pub fn selection_sort<T: Ord>(v: &mut [T]) {
    selection_sort_by(v, |a, b| a.cmp(b))
}

pub fn selection_sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 0..v.len() {
        let mut min = i;
        for j in i + 1..v.len() {
            if compare(&v[j], &v[min]) == Ordering::Less {
                min = j;
            }
        }
        v.swap(i, min);
    }
}

pub fn merge_sort<T: Ord + Clone>(v: &mut [T]) {
    merge_sort_by(v, |a, b| a.cmp(b))
}

/// Top-down merge sort through one scratch buffer the size of the input.
pub fn merge_sort_by<T, F>(v: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() <= 1 {
        return;
    }

    let mut scratch = v.to_vec();
    merge_sort_into(v, &mut scratch, &mut compare);
}

fn merge_sort_into<T, F>(v: &mut [T], scratch: &mut [T], compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len <= 1 {
        return;
    }

    let mid = len / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        let (scratch_left, scratch_right) = scratch.split_at_mut(mid);
        merge_sort_into(left, scratch_left, compare);
        merge_sort_into(right, scratch_right, compare);
    }

    scratch[..len].clone_from_slice(v);
    let (left, right) = scratch[..len].split_at(mid);

    let (mut i, mut j) = (0, 0);
    for slot in v.iter_mut() {
        // ties go to the left run, which is what keeps this stable
        let take_left = j == right.len()
            || (i < left.len() && compare(&right[j], &left[i]) != Ordering::Less);

        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}

pub fn quick_sort<T: Ord>(v: &mut [T]) {
    quick_sort_by(v, |a, b| a.cmp(b))
}

/// Quicksort with a median-of-three pivot and Lomuto partitioning. It
/// recurses into the smaller side of each partition and loops on the larger,
/// so the stack stays logarithmic even when the pivots are poor.
pub fn quick_sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quick_sort_slice(v, &mut compare);
}

fn quick_sort_slice<T, F>(mut v: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        if v.len() <= INSERTION_THRESHOLD {
            insertion_sort_by(v, &mut *compare);
            return;
        }

        let pivot = partition(v, compare);
        let (left, right) = mem::take(&mut v).split_at_mut(pivot);
        let right = &mut right[1..];

        if left.len() < right.len() {
            quick_sort_slice(left, compare);
            v = right;
        } else {
            quick_sort_slice(right, compare);
            v = left;
        }
    }
}

/// Puts the median of the first, middle and last elements at the end, then
/// partitions around it. Returns where the pivot lands.
fn partition<T, F>(v: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let last = v.len() - 1;
    let mid = last / 2;

    if compare(&v[mid], &v[0]) == Ordering::Less {
        v.swap(mid, 0);
    }
    if compare(&v[last], &v[0]) == Ordering::Less {
        v.swap(last, 0);
    }
    if compare(&v[last], &v[mid]) == Ordering::Less {
        v.swap(last, mid);
    }
    v.swap(mid, last);

    let mut store = 0;
    for i in 0..last {
        if compare(&v[i], &v[last]) == Ordering::Less {
            v.swap(i, store);
            store += 1;
        }
    }
    v.swap(store, last);

    store
}

pub fn heap_sort<T: Ord>(v: &mut [T]) {
    heap_sort_by(v, |a, b| a.cmp(b))
}

/// Heapifies the slice into a max-heap, then swaps the root to the back of a
/// shrinking heap until the heap is gone.
pub fn heap_sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();

    for pos in (0..len / 2).rev() {
        sift_down(v, pos, len, &mut compare);
    }

    for end in (1..len).rev() {
        v.swap(0, end);
        sift_down(v, 0, end, &mut compare);
    }
}

fn sift_down<T, F>(v: &mut [T], mut pos: usize, end: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let left = 2 * pos + 1;
        if left >= end {
            return;
        }

        let right = left + 1;
        let larger = if right < end && compare(&v[right], &v[left]) == Ordering::Greater {
            right
        } else {
            left
        };

        if compare(&v[pos], &v[larger]) != Ordering::Less {
            return;
        }

        v.swap(pos, larger);
        pos = larger;
    }
}
