//! Textbook sorting routines.
//!
//! Each function returns a new ascending `Vec` and leaves its input
//! untouched. Elements only need [`PartialOrd`]; values that compare as
//! neither less, equal nor greater (such as `NaN`) are kept, but their
//! position is unspecified.
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use trellis::algorithms::sort;
//!
//! let values = [5, 3, 9, 1, 3];
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! assert_eq!(sort::quick_sort(&values, &mut rng), vec![1, 3, 3, 5, 9]);
//! assert_eq!(sort::merge_sort(&values), vec![1, 3, 3, 5, 9]);
//! assert_eq!(sort::selection_sort(&values), vec![1, 3, 3, 5, 9]);
//! ```

use std::cmp::Ordering;

use rand::Rng;

/// Randomized three-way quick sort.
///
/// A pivot is drawn from `rng`; the input is split into the elements below,
/// equal to and above it, and the outer parts are sorted recursively.
pub fn quick_sort<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: PartialOrd + Clone,
    R: Rng + ?Sized,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let pivot = &items[rng.random_range(0..items.len())];
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for item in items {
        match item.partial_cmp(pivot) {
            Some(Ordering::Less) => less.push(item.clone()),
            Some(Ordering::Greater) => greater.push(item.clone()),
            Some(Ordering::Equal) | None => equal.push(item.clone()),
        }
    }

    let mut sorted = quick_sort(&less, rng);
    sorted.append(&mut equal);
    sorted.append(&mut quick_sort(&greater, rng));
    sorted
}

/// Selection sort: repeatedly moves the smallest remaining element to the
/// front.
pub fn selection_sort<T: PartialOrd + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    for start in 0..sorted.len() {
        let mut minimum = start;
        for candidate in start + 1..sorted.len() {
            if sorted[candidate] < sorted[minimum] {
                minimum = candidate;
            }
        }
        sorted.swap(start, minimum);
    }
    sorted
}

/// Stable top-down merge sort.
pub fn merge_sort<T: PartialOrd + Clone>(items: &[T]) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }

    let (left, right) = items.split_at(items.len() / 2);
    merge(merge_sort(left), merge_sort(right))
}

fn merge<T: PartialOrd>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => r < l,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}
