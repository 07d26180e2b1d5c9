//! Square spiral enumeration of grid offsets
//!
//! Maps a linear index to an offset around the origin. Index 0 is the origin,
//! indices `1..=8` are ring 1, `9..=24` ring 2 and so on: by index
//! `(2N+1)^2 - 1` every cell within Chebyshev distance `N` has been visited
//! exactly once, nearest rings first.
//!
//! Each ring `L` holds `8L` cells split into `2L` sections of four. The first
//! and last sections are the mid-edge "troughs"; the rest are "stages" that
//! step outward toward the corners, alternating between the vertical and
//! horizontal edges. Within a section the four cells are the four rotations
//! selected by `relPos % 4`.

use glam::IVec2;

/// Offset of the `index`-th cell of the square spiral
pub fn spiral_offset(index: u32) -> IVec2 {
    let i = index as i64;
    let layer = (((i + 1) as f64).sqrt() - 1.0) / 2.0;
    let layer = layer.ceil() as i64;
    let rel_pos = i - ((layer - 1) * (layer - 1) + (layer - 1)) * 4;
    // ceil(rel_pos / 4); rel_pos is never negative
    let section = (rel_pos + 3) / 4;
    let quarter = rel_pos % 4;

    let (x, y) = if section == 1 || section == layer * 2 {
        let trough = section / 2;
        match quarter {
            0 => (layer, trough),
            1 => (-layer, -trough),
            2 => (trough, -layer),
            _ => (-trough, layer),
        }
    } else {
        // ceil((section - 1) / 2)
        let stage = section / 2;
        if section % 2 == 0 {
            match quarter {
                0 => (layer, -stage),
                1 => (layer, stage),
                2 => (-layer, -stage),
                _ => (-layer, stage),
            }
        } else {
            match quarter {
                0 => (stage, -layer),
                1 => (stage, layer),
                2 => (-stage, -layer),
                _ => (-stage, layer),
            }
        }
    };

    IVec2::new(x as i32, y as i32)
}

/// Number of spiral indices covering every cell within Chebyshev `radius`
#[inline]
pub const fn spiral_len(radius: u32) -> u32 {
    (2 * radius + 1) * (2 * radius + 1)
}

/// Iterator over `(index, offset)` pairs of a contiguous index range
#[derive(Debug, Clone)]
pub struct SpiralIter {
    range: std::ops::RangeInclusive<u32>,
}

impl SpiralIter {
    /// Indices `start..=end` in increasing order
    pub fn new(start: u32, end: u32) -> Self {
        Self { range: start..=end }
    }

    /// The ring-1 neighbourhood, excluding the centre
    pub fn neighbours() -> Self {
        Self::new(1, 8)
    }
}

impl Iterator for SpiralIter {
    type Item = (u32, IVec2);

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|i| (i, spiral_offset(i)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for SpiralIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|i| (i, spiral_offset(i)))
    }
}

impl ExactSizeIterator for SpiralIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chebyshev;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_origin() {
        assert_eq!(spiral_offset(0), IVec2::ZERO);
    }

    #[test]
    fn test_first_ring_exactly_once() {
        let ring: Vec<IVec2> = (1..=8).map(spiral_offset).collect();
        let unique: HashSet<IVec2> = ring.iter().copied().collect();
        assert_eq!(unique.len(), 8);
        for offset in &ring {
            assert_eq!(chebyshev(*offset), 1, "{offset:?} is not on ring 1");
        }
    }

    #[test]
    fn test_known_prefix() {
        let expected = [
            (0, 0),
            (-1, 0),
            (0, -1),
            (0, 1),
            (1, 0),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
            (-2, 0),
            (0, -2),
            (0, 2),
            (2, 0),
            (2, 1),
        ];
        for (i, (x, y)) in expected.iter().enumerate() {
            assert_eq!(spiral_offset(i as u32), IVec2::new(*x, *y), "index {i}");
        }
    }

    #[test]
    fn test_coverage_exhaustive_small_radii() {
        for n in 0..=5i32 {
            let len = spiral_len(n as u32);
            let seen: HashSet<IVec2> = (0..len).map(spiral_offset).collect();
            assert_eq!(seen.len(), len as usize, "duplicates within radius {n}");

            let mut expected = HashSet::new();
            for y in -n..=n {
                for x in -n..=n {
                    expected.insert(IVec2::new(x, y));
                }
            }
            assert_eq!(seen, expected, "coverage mismatch at radius {n}");
        }
    }

    #[test]
    fn test_draw_radius_index() {
        assert_eq!(spiral_len(crate::consts::DRAW_RADIUS) - 1, 440);
        assert_eq!(chebyshev(spiral_offset(440)), 10);
        assert_eq!(chebyshev(spiral_offset(441)), 11);
    }

    #[test]
    fn test_iter_reversed() {
        let back: Vec<u32> = SpiralIter::new(1, 8).rev().map(|(i, _)| i).collect();
        assert_eq!(back, vec![8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(SpiralIter::neighbours().len(), 8);
    }

    proptest! {
        #[test]
        fn distance_never_decreases(i in 0u32..50_000) {
            let a = chebyshev(spiral_offset(i));
            let b = chebyshev(spiral_offset(i + 1));
            prop_assert!(a <= b);
        }

        #[test]
        fn index_lands_on_its_layer(i in 1u32..200_000) {
            let layer = (((i + 1) as f64).sqrt() - 1.0) / 2.0;
            prop_assert_eq!(chebyshev(spiral_offset(i)), layer.ceil() as i32);
        }
    }
}
