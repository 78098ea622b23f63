//! Stable top-down merge sort over a borrowed slice.

/// Returns a sorted copy of `items`, ordered non-decreasing by `key`.
///
/// The sort is stable: records with equal keys keep their input order. The
/// input slice is left untouched.
///
/// Complexity: O(n log n) time, O(n) auxiliary space.
///
/// ## Example
/// ```rust
/// use emporium_core::algorithms::merge_sort;
///
/// let items = vec![("b", 2), ("a", 1), ("c", 2)];
/// let sorted = merge_sort(&items, |(_, price)| *price);
/// assert_eq!(sorted, vec![("a", 1), ("b", 2), ("c", 2)]);
/// ```
pub fn merge_sort<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    sort_slice(items, &key)
}

fn sort_slice<T, K, F>(items: &[T], key: &F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = sort_slice(&items[..mid], key);
    let right = sort_slice(&items[mid..], key);
    merge(left, right, key)
}

/// Merges two sorted runs. The left run wins ties.
fn merge<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) <= key(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sorts_by_projected_key() {
        let words = vec!["pear", "fig", "banana", "kiwi"];
        let sorted = merge_sort(&words, |w| w.len());
        assert_eq!(sorted, vec!["fig", "pear", "kiwi", "banana"]);
    }

    #[test]
    fn test_empty_and_single() {
        let empty: Vec<i32> = Vec::new();
        assert!(merge_sort(&empty, |x| *x).is_empty());
        assert_eq!(merge_sort(&[7], |x| *x), vec![7]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let items = vec![(3, 'a'), (1, 'b'), (3, 'c'), (1, 'd'), (2, 'e')];
        let sorted = merge_sort(&items, |(k, _)| *k);
        assert_eq!(
            sorted,
            vec![(1, 'b'), (1, 'd'), (2, 'e'), (3, 'a'), (3, 'c')]
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let items = vec![5, 4, 3, 2, 1];
        let _ = merge_sort(&items, |x| *x);
        assert_eq!(items, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_case_folded_key() {
        let names = vec!["banana", "Apple", "cherry", "apple"];
        let sorted = merge_sort(&names, |n| n.to_lowercase());
        assert_eq!(sorted, vec!["Apple", "apple", "banana", "cherry"]);
    }

    proptest! {
        /// Matches the standard library's stable sort exactly, which pins
        /// down permutation, ordering and stability at once.
        #[test]
        fn prop_matches_std_stable_sort(
            items in prop::collection::vec((0u8..8, any::<u16>()), 0..200)
        ) {
            let mut expected = items.clone();
            expected.sort_by_key(|(k, _)| *k);

            let sorted = merge_sort(&items, |(k, _)| *k);
            prop_assert_eq!(sorted, expected);
        }

        #[test]
        fn prop_idempotent(items in prop::collection::vec(any::<i32>(), 0..200)) {
            let once = merge_sort(&items, |x| *x);
            let twice = merge_sort(&once, |x| *x);
            prop_assert_eq!(once, twice);
        }
    }
}
