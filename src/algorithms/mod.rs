//! Classic sorting and searching over slices.

pub mod search;
pub mod sort;

pub use search::{
    binary_search, binary_search_by, binary_search_checked, interpolation_search, linear_search,
    Interpolate,
};
pub use sort::{
    bubble_sort, bubble_sort_by, heap_sort, heap_sort_by, insertion_sort, insertion_sort_by,
    is_sorted, is_sorted_by, merge_sort, merge_sort_by, quick_sort, quick_sort_by, selection_sort,
    selection_sort_by,
};
