//! Binary search over a slice already sorted by the same key projection.

use std::cmp::Ordering;

/// Finds a record whose key equals `target`.
///
/// # Precondition
///
/// `sorted` must be non-decreasing by `key`, using exactly the projection
/// (including any normalization such as case-folding) that was used to sort
/// it. This is not checked; on unsorted input the result is unspecified and
/// may be a miss even when a matching record exists.
///
/// # Duplicate keys
///
/// When several records share `target`, the one returned is whichever the
/// midpoint sequence lands on first. It is deterministic for a given slice
/// but is neither guaranteed to be the first nor the last duplicate.
///
/// Complexity: O(log n) time, O(1) space.
///
/// ## Example
/// ```rust
/// use emporium_core::algorithms::binary_search_by_key;
///
/// let prices = [10, 20, 20, 30];
/// assert_eq!(binary_search_by_key(&prices, &20, |p| *p), Some(&20));
/// assert_eq!(binary_search_by_key(&prices, &25, |p| *p), None);
/// ```
pub fn binary_search_by_key<'a, T, K, F>(sorted: &'a [T], target: &K, key: F) -> Option<&'a T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    // `high` is exclusive; `mid` is floor((low + last) / 2) with
    // last = high - 1, the classic inclusive-bounds midpoint.
    let mut low = 0;
    let mut high = sorted.len();

    while low < high {
        let mid = low + (high - 1 - low) / 2;
        let probe = &sorted[mid];

        match key(probe).cmp(target) {
            Ordering::Equal => return Some(probe),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::merge_sort;
    use proptest::prelude::*;

    #[test]
    fn test_hit_and_miss() {
        let records = vec![(10, "a"), (20, "b"), (20, "c"), (30, "d")];

        let hit = binary_search_by_key(&records, &20, |(p, _)| *p).unwrap();
        assert_eq!(hit.0, 20);

        assert!(binary_search_by_key(&records, &25, |(p, _)| *p).is_none());
        assert!(binary_search_by_key(&records, &5, |(p, _)| *p).is_none());
        assert!(binary_search_by_key(&records, &35, |(p, _)| *p).is_none());
    }

    #[test]
    fn test_first_probe_on_duplicates() {
        // Inclusive bounds [0, 3] probe index 1 first.
        let records = vec![(10, "a"), (20, "b"), (20, "c"), (30, "d")];
        let hit = binary_search_by_key(&records, &20, |(p, _)| *p).unwrap();
        assert_eq!(hit.1, "b");
    }

    #[test]
    fn test_empty_slice() {
        let empty: [i32; 0] = [];
        assert!(binary_search_by_key(&empty, &1, |x| *x).is_none());
    }

    #[test]
    fn test_single_element() {
        assert_eq!(binary_search_by_key(&[4], &4, |x| *x), Some(&4));
        assert_eq!(binary_search_by_key(&[4], &3, |x| *x), None);
        assert_eq!(binary_search_by_key(&[4], &5, |x| *x), None);
    }

    #[test]
    fn test_case_folded_lookup() {
        let names = merge_sort(&["Pear", "apple", "Mango"], |n| n.to_lowercase());
        let hit = binary_search_by_key(&names, &"mango".to_string(), |n| n.to_lowercase());
        assert_eq!(hit, Some(&"Mango"));
    }

    proptest! {
        #[test]
        fn prop_finds_every_present_key(
            items in prop::collection::vec(0i64..50, 0..100)
        ) {
            let sorted = merge_sort(&items, |x| *x);
            for target in &items {
                let hit = binary_search_by_key(&sorted, target, |x| *x);
                prop_assert_eq!(hit, Some(target));
            }
        }

        #[test]
        fn prop_misses_absent_keys(
            items in prop::collection::vec(0i64..50, 0..100),
            target in 0i64..100
        ) {
            let sorted = merge_sort(&items, |x| *x);
            let hit = binary_search_by_key(&sorted, &target, |x| *x);
            prop_assert_eq!(hit.is_some(), items.contains(&target));
        }
    }
}
