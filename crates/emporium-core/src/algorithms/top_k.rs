use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A record tagged with its projected key and arrival order.
///
/// Ordered by key, then by *earlier* arrival ranking higher, so the heap
/// minimum among equal keys is always the most recently seen record.
struct Ranked<T, K> {
    key: K,
    seq: usize,
    item: T,
}

impl<T, K: Ord> Ord for Ranked<T, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T, K: Ord> PartialOrd for Ranked<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K: Ord> PartialEq for Ranked<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, K: Ord> Eq for Ranked<T, K> {}

/// Keeps the `k` largest-keyed records of a stream in a fixed-size min-heap.
///
/// For each pushed record:
/// 1. If fewer than `k` records are held, it is kept.
/// 2. Otherwise it replaces the current minimum only if its key is
///    strictly greater. A record whose key equals the minimum is dropped,
///    so among ties at the cut-off the first-seen records win.
///
/// Complexity:
/// - Push: O(log k)
/// - Memory: O(k) regardless of stream length
pub struct BoundedTopK<T, K, F> {
    heap: BinaryHeap<Reverse<Ranked<T, K>>>,
    capacity: usize,
    key: F,
    seen: usize,
}

impl<T, K, F> BoundedTopK<T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    /// Creates an empty selector holding at most `capacity` records.
    pub fn new(capacity: usize, key: F) -> Self {
        BoundedTopK {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
            key,
            seen: 0,
        }
    }

    /// Offers one record to the selector.
    pub fn push(&mut self, item: T) {
        let seq = self.seen;
        self.seen += 1;

        if self.capacity == 0 {
            return;
        }

        let key = (self.key)(&item);

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(Ranked { key, seq, item }));
        } else if let Some(Reverse(min)) = self.heap.peek() {
            if key > min.key {
                self.heap.pop();
                self.heap.push(Reverse(Ranked { key, seq, item }));
            }
        }
    }

    /// Number of records currently held (never more than the capacity).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no record is held.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consumes the selector, returning the held records largest key first.
    /// Equal keys come out in arrival order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut ranked: Vec<Ranked<T, K>> =
            self.heap.into_iter().map(|Reverse(r)| r).collect();
        ranked.sort_by(|a, b| b.cmp(a));
        ranked.into_iter().map(|r| r.item).collect()
    }
}

impl<T, K, F> Extend<T> for BoundedTopK<T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// Returns the `k` largest-keyed records of `items`, sorted descending.
///
/// The result has `min(k, n)` elements; `k == 0` yields an empty vector.
///
/// ## Example
/// ```rust
/// use emporium_core::algorithms::top_k;
///
/// let prices = vec![5, 1, 9, 3, 9, 2];
/// assert_eq!(top_k(prices, 3, |p| *p), vec![9, 9, 5]);
/// ```
pub fn top_k<T, K, F, I>(items: I, k: usize, key: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut selector = BoundedTopK::new(k, key);
    selector.extend(items);
    selector.into_sorted_vec()
}
