//! Bounded best-K selection.
//!
//! [`TopK`] keeps the `limit` best entries of a stream using a min-heap of
//! at most `limit + 1` entries. **A greater key is a better entry.** Queries
//! that rank something ascending wrap that component in
//! [`std::cmp::Reverse`], so every ordering reads as a plain tuple key,
//! e.g. "date descending, then id ascending" is `(date, Reverse(id))`.
//!
//! Keys must form a total order over the candidates for results to be
//! deterministic, so every query key ends with a unique id.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K: Ord, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, V> Eq for Entry<K, V> {}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Keeps the best `limit` entries pushed into it.
pub struct TopK<K, V> {
    limit: Option<usize>,
    /// Min-heap on key: the top is the worst entry kept.
    heap: BinaryHeap<Reverse<Entry<K, V>>>,
}

impl<K: Ord, V> TopK<K, V> {
    /// A selector that keeps at most `limit` entries. `limit == 0` keeps
    /// nothing.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            heap: BinaryHeap::with_capacity(limit.saturating_add(1).min(1024)),
        }
    }

    /// A selector that keeps everything; draining it is a full sort.
    pub fn unbounded() -> Self {
        Self {
            limit: None,
            heap: BinaryHeap::new(),
        }
    }

    /// Offers a candidate. Evicts the worst entry once more than `limit`
    /// are held.
    pub fn push(&mut self, key: K, value: V) {
        if self.limit == Some(0) {
            return;
        }
        self.heap.push(Reverse(Entry { key, value }));
        if let Some(limit) = self.limit {
            if self.heap.len() > limit {
                self.heap.pop();
            }
        }
    }

    /// The key of the worst entry currently kept.
    pub fn worst(&self) -> Option<&K> {
        self.heap.peek().map(|Reverse(entry)| &entry.key)
    }

    /// Whether a candidate with `key` would be kept if pushed now.
    pub fn accepts(&self, key: &K) -> bool {
        match self.limit {
            Some(0) => false,
            Some(limit) if self.heap.len() >= limit => self.worst().map_or(true, |worst| key > worst),
            _ => true,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drains the entries, best first.
    pub fn into_sorted(self) -> Vec<(K, V)> {
        // Ascending over Reverse is descending over the keys.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(entry)| (entry.key, entry.value))
            .collect()
    }

    /// Drains the values, best first.
    pub fn into_values(self) -> Vec<V> {
        self.into_sorted().into_iter().map(|(_, value)| value).collect()
    }
}

impl<K: Ord, V> Extend<(K, V)> for TopK<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_keeps_best() {
        let mut top = TopK::new(2);
        top.extend([(3, "c"), (1, "a"), (5, "e"), (4, "d")]);
        assert_eq!(top.into_values(), vec!["e", "d"]);
    }

    #[test]
    fn test_zero_limit_keeps_nothing() {
        let mut top = TopK::new(0);
        top.push(1, ());
        assert!(top.is_empty());
        assert!(!top.accepts(&100));
    }

    #[test]
    fn test_no_eviction_at_limit() {
        let mut top = TopK::new(3);
        top.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
        assert_eq!(top.len(), 3);
        assert_eq!(top.worst(), Some(&1));
        assert!(top.accepts(&2));
        assert!(!top.accepts(&0));
    }

    #[test]
    fn test_reverse_components_sort_ascending() {
        // date descending, then id ascending
        let mut top = TopK::new(10);
        top.push((10, Reverse(2)), "late-2");
        top.push((10, Reverse(1)), "late-1");
        top.push((5, Reverse(0)), "early");
        assert_eq!(top.into_values(), vec!["late-1", "late-2", "early"]);
    }

    #[test]
    fn test_unbounded_is_full_sort() {
        let mut top = TopK::unbounded();
        top.extend((0..100).map(|i| ((i * 37) % 100, i)));
        let keys: Vec<i32> = top.into_sorted().into_iter().map(|(k, _)| k).collect();
        let expected: Vec<i32> = (0..100).rev().collect();
        assert_eq!(keys, expected);
    }

    proptest! {
        #[test]
        fn prop_matches_full_sort(
            keys in prop::collection::vec(any::<i16>(), 0..200),
            limit in 0usize..30,
        ) {
            let mut top = TopK::new(limit);
            for (i, key) in keys.iter().enumerate() {
                top.push(*key, i);
            }
            let kept: Vec<i16> = top.into_sorted().into_iter().map(|(k, _)| k).collect();

            let mut sorted = keys.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            sorted.truncate(limit);

            prop_assert!(kept.len() <= limit);
            prop_assert_eq!(kept, sorted);
        }
    }
}
