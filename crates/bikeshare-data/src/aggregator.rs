//! Frequency counting over trip columns.
//!
//! Every "most common" figure in the report comes from [`value_counts`]:
//! values are counted in a `BTreeMap`, then ordered by descending count.
//! Ties keep the map's ascending value order, so the mode of a column is
//! the smallest value among those sharing the highest count. The result
//! does not depend on the order trips were loaded in.

use std::collections::BTreeMap;

// ── ValueCount ────────────────────────────────────────────────────────────────

/// A distinct value together with how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount<T> {
    pub value: T,
    pub count: usize,
}

impl<T> ValueCount<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }
}

// ── Counting ──────────────────────────────────────────────────────────────────

/// Count each distinct value, most frequent first.
pub fn value_counts<T, I>(values: I) -> Vec<ValueCount<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut map: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *map.entry(value).or_default() += 1;
    }

    let mut counts: Vec<ValueCount<T>> = map
        .into_iter()
        .map(|(value, count)| ValueCount::new(value, count))
        .collect();

    // Stable sort: equal counts stay in ascending value order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The most frequent value, or `None` when `values` is empty.
pub fn mode<T, I>(values: I) -> Option<ValueCount<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next()
}

/// A column reduced to its nulls and the frequency of its non-null values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown<T> {
    /// Number of empty cells.
    pub missing: usize,
    /// Distinct non-null values, most frequent first.
    pub counts: Vec<ValueCount<T>>,
}

impl<T: Ord> Breakdown<T> {
    /// Split `values` into nulls and a frequency table of the rest.
    pub fn from_options<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let mut missing = 0usize;
        let present = values.into_iter().filter_map(|v| {
            if v.is_none() {
                missing += 1;
            }
            v
        });
        let counts = value_counts(present);
        Self { missing, counts }
    }

    /// Number of non-null values.
    pub fn present(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    pub fn mode(&self) -> Option<&ValueCount<T>> {
        self.counts.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── value_counts ──────────────────────────────────────────────────────────

    #[test]
    fn test_value_counts_orders_by_count() {
        let counts = value_counts(["b", "a", "b", "c", "b", "a"]);
        assert_eq!(
            counts,
            vec![
                ValueCount::new("b", 3),
                ValueCount::new("a", 2),
                ValueCount::new("c", 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_ties_ascending() {
        let counts = value_counts([9u32, 3, 7, 3, 9, 7]);
        let values: Vec<u32> = counts.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![3, 7, 9]);
        assert!(counts.iter().all(|c| c.count == 2));
    }

    #[test]
    fn test_value_counts_empty() {
        let counts = value_counts(Vec::<u32>::new());
        assert!(counts.is_empty());
    }

    // ── mode ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_mode_picks_highest_count() {
        assert_eq!(mode([1, 2, 2, 3]), Some(ValueCount::new(2, 2)));
    }

    #[test]
    fn test_mode_tie_is_smallest_value() {
        assert_eq!(
            mode(["Zed St", "Alpha Ave", "Zed St", "Alpha Ave"]),
            Some(ValueCount::new("Alpha Ave", 2))
        );
    }

    #[test]
    fn test_mode_is_order_insensitive() {
        let forward = mode([5, 1, 5, 1, 3]);
        let backward = mode([3, 1, 5, 1, 5]);
        assert_eq!(forward, backward);
        assert_eq!(forward, Some(ValueCount::new(1, 2)));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<i32>::new()), None);
    }

    // ── Breakdown ─────────────────────────────────────────────────────────────

    #[test]
    fn test_breakdown_counts_missing() {
        let b = Breakdown::from_options([Some("Male"), None, Some("Female"), Some("Male"), None]);
        assert_eq!(b.missing, 2);
        assert_eq!(b.present(), 3);
        assert_eq!(b.mode(), Some(&ValueCount::new("Male", 2)));
    }

    #[test]
    fn test_breakdown_all_missing() {
        let b: Breakdown<&str> = Breakdown::from_options([None, None]);
        assert_eq!(b.missing, 2);
        assert!(b.counts.is_empty());
        assert_eq!(b.mode(), None);
    }
}
