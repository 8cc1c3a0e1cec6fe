//! Searching slices for a value.
//!
//! A missing value is `None`, never an error. The binary and interpolation
//! searches expect ascending input and don't check it, so on unsorted input
//! they return some answer, quite possibly the wrong one, but never panic.
//! [`binary_search_checked`] pays O(n) up front to check.

use std::cmp::Ordering;

use super::sort::is_sorted;
use crate::error::{Error, Result};

/// The index of the first element equal to `target`.
pub fn linear_search<T: PartialEq>(v: &[T], target: &T) -> Option<usize> {
    v.iter().position(|item| item == target)
}

/// The index of the first element equal to `target` in an ascending slice.
pub fn binary_search<T: Ord>(v: &[T], target: &T) -> Option<usize> {
    binary_search_by(v, |probe| probe.cmp(target))
}

/// Binary search where `compare` says how each probed element orders
/// against the one being looked for. Finds the first element for which it
/// returns `Equal`.
pub fn binary_search_by<T, F>(v: &[T], mut compare: F) -> Option<usize>
where
    F: FnMut(&T) -> Ordering,
{
    let (mut low, mut high) = (0, v.len());

    while low < high {
        let mid = low + (high - low) / 2;
        if compare(&v[mid]) == Ordering::Less {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    if low < v.len() && compare(&v[low]) == Ordering::Equal {
        Some(low)
    } else {
        None
    }
}

/// Binary search that first makes sure the slice is sorted.
pub fn binary_search_checked<T: Ord>(v: &[T], target: &T) -> Result<Option<usize>> {
    if !is_sorted(v) {
        return Err(Error::PreconditionViolation("input is not sorted"));
    }
    Ok(binary_search(v, target))
}

/// Integers whose distances can be measured, which is what interpolation
/// search needs to guess where a value sits.
pub trait Interpolate: Ord + Copy {
    /// How far `self` is above `low`. Only called with `low <= self`.
    fn distance_from(self, low: Self) -> u128;
}

macro_rules! interpolate_unsigned {
    ($($t:ty),*) => {$(
        impl Interpolate for $t {
            fn distance_from(self, low: Self) -> u128 {
                self as u128 - low as u128
            }
        }
    )*};
}

macro_rules! interpolate_signed {
    ($($t:ty),*) => {$(
        impl Interpolate for $t {
            fn distance_from(self, low: Self) -> u128 {
                // the true difference always fits in u128, even when the
                // i128 subtraction overflows
                (self as i128).wrapping_sub(low as i128) as u128
            }
        }
    )*};
}

interpolate_unsigned!(u8, u16, u32, u64, u128, usize);
interpolate_signed!(i8, i16, i32, i64, i128, isize);

/// Search an ascending slice by guessing a target's position from its value,
/// the way you'd open a dictionary near the back for a word starting with
/// "w". Close to O(log log n) on evenly spread values, O(n) at worst.
pub fn interpolation_search<T: Interpolate>(v: &[T], target: T) -> Option<usize> {
    if v.is_empty() {
        return None;
    }

    let (mut low, mut high) = (0, v.len() - 1);

    while low <= high && target >= v[low] && target <= v[high] {
        if v[low] == v[high] {
            // every value in range is the same, so the guess has nothing to
            // divide by
            return if v[low] == target { Some(low) } else { None };
        }

        let span = high - low;
        let spread = v[high].distance_from(v[low]);
        let offset = target
            .distance_from(v[low])
            .checked_mul(span as u128)
            .map(|scaled| scaled / spread)
            .unwrap_or(span as u128 / 2) as usize;
        let probe = low + offset;

        match v[probe].cmp(&target) {
            Ordering::Equal => return Some(probe),
            Ordering::Less => low = probe + 1,
            // v[low] <= target < v[probe] puts probe above low
            Ordering::Greater => high = probe - 1,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const ODDS: [i32; 6] = [1, 3, 5, 7, 9, 11];

    #[test]
    fn binary_search_finds_and_misses() {
        assert_eq!(Some(3), binary_search(&ODDS, &7));
        assert_eq!(None, binary_search(&ODDS, &4));
        assert_eq!(Some(0), binary_search(&ODDS, &1));
        assert_eq!(Some(5), binary_search(&ODDS, &11));
        assert_eq!(None, binary_search(&ODDS, &0));
        assert_eq!(None, binary_search(&ODDS, &12));
        assert_eq!(None, binary_search(&[], &1));
    }

    #[test]
    fn binary_search_takes_the_first_duplicate() {
        let v = [1, 2, 2, 2, 2, 3];
        assert_eq!(Some(1), binary_search(&v, &2));
    }

    #[test]
    fn binary_search_by_key() {
        let people = [("ann", 31), ("bob", 27), ("cyd", 45)];
        assert_eq!(Some(1), binary_search_by(&people, |(name, _)| name.cmp(&"bob")));
        assert_eq!(None, binary_search_by(&people, |(name, _)| name.cmp(&"bea")));
    }

    #[test]
    fn checked_search_rejects_unsorted() {
        assert_eq!(Ok(Some(3)), binary_search_checked(&ODDS, &7));
        assert_eq!(
            Err(Error::PreconditionViolation("input is not sorted")),
            binary_search_checked(&[3, 1, 2], &1)
        );
    }

    #[test]
    fn linear_search_on_anything() {
        let v = ["d", "a", "c", "a"];
        assert_eq!(Some(1), linear_search(&v, &"a"));
        assert_eq!(None, linear_search(&v, &"z"));
        assert_eq!(Some(2), linear_search(&[0.5, 1.5, 2.5], &2.5));
    }

    #[test]
    fn interpolation_search_finds_everything() {
        let v: Vec<u32> = (0..1000).map(|i| i * 3).collect();
        for (i, value) in v.iter().enumerate() {
            assert_eq!(Some(i), interpolation_search(&v, *value));
        }
        assert_eq!(None, interpolation_search(&v, 1));
        assert_eq!(None, interpolation_search(&v, 3000));
        assert_eq!(Some(3), interpolation_search(&ODDS, 7));
        assert_eq!(None, interpolation_search(&ODDS, 4));
    }

    #[test]
    fn interpolation_search_on_skewed_values() {
        let v: Vec<i64> = (0..64).map(|i| (i * i * i) - 5000).collect();
        for (i, value) in v.iter().enumerate() {
            assert_eq!(Some(i), interpolation_search(&v, *value));
        }
        assert_eq!(None, interpolation_search(&v, -4990));
    }

    #[test]
    fn interpolation_search_edges() {
        assert_eq!(None, interpolation_search::<u8>(&[], 0));
        assert_eq!(Some(0), interpolation_search(&[7, 7, 7], 7));
        assert_eq!(None, interpolation_search(&[7, 7, 7], 8));

        let extremes = [i128::MIN, -1, 0, i128::MAX];
        assert_eq!(Some(0), interpolation_search(&extremes, i128::MIN));
        assert_eq!(Some(2), interpolation_search(&extremes, 0));
        assert_eq!(Some(3), interpolation_search(&extremes, i128::MAX));
        assert_eq!(None, interpolation_search(&extremes, 1));

        let wide = [0, 1, u64::MAX - 1, u64::MAX];
        assert_eq!(Some(2), interpolation_search(&wide, u64::MAX - 1));
        assert_eq!(Some(1), interpolation_search(&[u8::MIN, 1, u8::MAX], 1));
    }
}
