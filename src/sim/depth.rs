//! Back-to-front ordering of visible blocks
//!
//! Partition-exchange sort over `(index, key)` pairs, in place. The pivot is
//! the first element of each range (Hoare partition). Ranges wait on an
//! explicit stack instead of the call stack; the larger half is pushed and
//! the smaller one is processed first, so the stack never holds more than
//! `log2(n)` ranges even for adversarial input.

/// A block index paired with its sort value (negative distance to the player)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    pub index: usize,
    pub key: f32,
}

impl SortKey {
    pub fn new(index: usize, key: f32) -> Self {
        Self { index, key }
    }

    /// Key for painter's ordering: farther blocks get smaller keys
    pub fn from_distance(index: usize, distance: f32) -> Self {
        Self::new(index, -distance)
    }
}

/// Key order of the sorted output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[inline]
    fn before(self, a: f32, b: f32) -> bool {
        match self {
            SortOrder::Ascending => a < b,
            SortOrder::Descending => a > b,
        }
    }
}

/// Sort keys in place
pub fn sort_keys(items: &mut [SortKey], order: SortOrder) {
    // Pending inclusive ranges
    let mut stack: Vec<(usize, usize)> = Vec::new();
    if items.len() > 1 {
        stack.push((0, items.len() - 1));
    }

    while let Some((mut lo, mut hi)) = stack.pop() {
        while lo < hi {
            let split = partition(items, lo, hi, order);
            // [lo, split] and [split + 1, hi]
            if split - lo < hi - split {
                stack.push((split + 1, hi));
                hi = split;
            } else {
                stack.push((lo, split));
                lo = split + 1;
            }
        }
    }
}

/// Hoare partition around `items[lo]`. Returns `j` such that every key in
/// `lo..=j` sorts no later than every key in `j+1..=hi`, with `lo <= j < hi`.
fn partition(items: &mut [SortKey], lo: usize, hi: usize, order: SortOrder) -> usize {
    let pivot = items[lo].key;
    let mut i = lo;
    let mut j = hi;
    let mut first = true;

    loop {
        if !first {
            i += 1;
        }
        while order.before(items[i].key, pivot) {
            i += 1;
        }
        if !first {
            j -= 1;
        }
        first = false;
        while order.before(pivot, items[j].key) {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        items.swap(i, j);
    }
}

/// Farthest first: ascending by negative distance
pub fn back_to_front(items: &mut [SortKey]) {
    sort_keys(items, SortOrder::Ascending);
}

/// Largest key first
pub fn sort_descending(items: &mut [SortKey]) {
    sort_keys(items, SortOrder::Descending);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn indices(items: &[SortKey]) -> Vec<usize> {
        items.iter().map(|k| k.index).collect()
    }

    #[test]
    fn test_three_blocks_farthest_first() {
        let distances = [10.0, 5.0, 20.0];
        let mut keys: Vec<SortKey> = distances
            .iter()
            .enumerate()
            .map(|(i, d)| SortKey::from_distance(i, *d))
            .collect();
        back_to_front(&mut keys);
        assert_eq!(indices(&keys), vec![2, 0, 1]);
        let ordered: Vec<f32> = keys.iter().map(|k| distances[k.index]).collect();
        assert_eq!(ordered, vec![20.0, 10.0, 5.0]);
    }

    #[test]
    fn test_descending_raw_keys() {
        let mut keys = vec![
            SortKey::new(0, 10.0),
            SortKey::new(1, 5.0),
            SortKey::new(2, 20.0),
        ];
        sort_descending(&mut keys);
        assert_eq!(indices(&keys), vec![2, 0, 1]);
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<SortKey> = Vec::new();
        back_to_front(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![SortKey::new(7, 1.0)];
        back_to_front(&mut one);
        assert_eq!(indices(&one), vec![7]);
    }

    #[test]
    fn test_duplicates_and_presorted() {
        let mut keys: Vec<SortKey> = (0..64).map(|i| SortKey::new(i, (i % 3) as f32)).collect();
        sort_keys(&mut keys, SortOrder::Ascending);
        assert!(keys.windows(2).all(|w| w[0].key <= w[1].key));

        // Already sorted input is the worst case for a first-element pivot
        let mut sorted: Vec<SortKey> = (0..2000).map(|i| SortKey::new(i, i as f32)).collect();
        sort_keys(&mut sorted, SortOrder::Descending);
        assert_eq!(sorted[0].index, 1999);
        assert_eq!(sorted[1999].index, 0);
    }

    proptest! {
        #[test]
        fn sorted_and_permutation(
            raw in prop::collection::vec(-1000.0f32..1000.0, 0..200),
            descending in any::<bool>()
        ) {
            let mut keys: Vec<SortKey> =
                raw.iter().enumerate().map(|(i, k)| SortKey::new(i, *k)).collect();
            let order = if descending { SortOrder::Descending } else { SortOrder::Ascending };
            sort_keys(&mut keys, order);

            for w in keys.windows(2) {
                match order {
                    SortOrder::Ascending => prop_assert!(w[0].key <= w[1].key),
                    SortOrder::Descending => prop_assert!(w[0].key >= w[1].key),
                }
            }
            let mut seen = indices(&keys);
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..raw.len()).collect::<Vec<_>>());
            for k in &keys {
                prop_assert_eq!(k.key, raw[k.index]);
            }
        }
    }
}
