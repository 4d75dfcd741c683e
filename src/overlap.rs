//! Overlap queries over a fixed set of ranges.
//!
//! Ranges are kept sorted by start with a running maximum of their ends, the
//! same augmentation an augmented interval list uses. "Does anything overlap
//! `q`?" is then one binary search: among the ranges starting before `q`
//! ends, the furthest-reaching one decides.

use crate::OffsetRange;

/// An immutable set of ranges answering "does any member overlap this range".
#[derive(Debug, Clone, Default)]
pub struct OverlappingRangeSet {
    /// Sorted, deduplicated, non-empty ranges.
    ranges: Vec<OffsetRange>,
    /// `max_end[i]` is the largest `end` among `ranges[..=i]`.
    max_end: Vec<usize>,
}

impl OverlappingRangeSet {
    /// Index `ranges`. Empty ranges cover no offsets and are dropped.
    pub fn build<'a, I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = &'a OffsetRange>,
    {
        let mut ranges: Vec<OffsetRange> = ranges
            .into_iter()
            .copied()
            .filter(|r| !r.is_empty())
            .collect();
        ranges.sort_unstable();
        ranges.dedup();

        let mut max_end = Vec::with_capacity(ranges.len());
        let mut running = 0;
        for range in &ranges {
            running = running.max(range.end());
            max_end.push(running);
        }

        Self { ranges, max_end }
    }

    /// Number of ranges starting strictly before `query` ends.
    fn candidates(&self, query: &OffsetRange) -> usize {
        self.ranges.partition_point(|r| r.start() < query.end())
    }

    /// True if any member shares at least one offset with `query`.
    pub fn overlaps_any(&self, query: &OffsetRange) -> bool {
        if query.is_empty() {
            return false;
        }
        match self.candidates(query) {
            0 => false,
            n => self.max_end[n - 1] > query.start(),
        }
    }

    /// Every member overlapping `query`, in ascending order.
    pub fn overlapping<'a>(&'a self, query: &'a OffsetRange) -> impl Iterator<Item = &'a OffsetRange> + 'a {
        let n = if query.is_empty() { 0 } else { self.candidates(query) };
        self.ranges[..n]
            .iter()
            .filter(move |r| r.end() > query.start())
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn r(start: usize, end: usize) -> OffsetRange {
        OffsetRange::new(start, end)
    }

    #[test]
    fn test_empty_set() {
        let set = OverlappingRangeSet::build(&Vec::<OffsetRange>::new());
        assert!(set.is_empty());
        assert!(!set.overlaps_any(&r(0, 100)));
    }

    #[test]
    fn test_overlap_queries() {
        let set = OverlappingRangeSet::build(&[r(10, 20), r(30, 40), r(12, 15)]);

        assert!(set.overlaps_any(&r(19, 25)));
        assert!(set.overlaps_any(&r(0, 11)));
        assert!(set.overlaps_any(&r(35, 36)));
        // touching is not overlapping
        assert!(!set.overlaps_any(&r(20, 30)));
        assert!(!set.overlaps_any(&r(0, 10)));
        assert!(!set.overlaps_any(&r(40, 50)));
    }

    #[test]
    fn test_long_range_reaches_past_later_starts() {
        // the [0,100) range must be found even though later ranges end earlier
        let set = OverlappingRangeSet::build(&[r(0, 100), r(5, 6), r(7, 8)]);
        assert!(set.overlaps_any(&r(50, 60)));
        assert_eq!(set.overlapping(&r(50, 60)).collect::<Vec<_>>(), vec![&r(0, 100)]);
    }

    #[test]
    fn test_empty_ranges_are_ignored() {
        let set = OverlappingRangeSet::build(&[r(5, 5), r(10, 12)]);
        assert_eq!(set.len(), 1);
        assert!(!set.overlaps_any(&r(3, 8)));
        assert!(!set.overlaps_any(&r(11, 11)));
    }

    #[test]
    fn test_overlapping_lists_all_hits() {
        let set = OverlappingRangeSet::build(&[r(0, 5), r(4, 9), r(20, 25), r(4, 9)]);
        let hits: Vec<_> = set.overlapping(&r(3, 6)).copied().collect();
        assert_eq!(hits, vec![r(0, 5), r(4, 9)]);
    }

    proptest! {
        #[test]
        fn agrees_with_pairwise_scan(
            members in prop::collection::vec((0usize..80, 0usize..15), 0..20),
            query in (0usize..90, 0usize..15),
        ) {
            let members: Vec<OffsetRange> =
                members.into_iter().map(|(s, l)| r(s, s + l)).collect();
            let query = r(query.0, query.0 + query.1);
            let set = OverlappingRangeSet::build(&members);

            let naive = members.iter().any(|m| m.overlaps(&query));
            prop_assert_eq!(set.overlaps_any(&query), naive);
            prop_assert_eq!(set.overlapping(&query).next().is_some(), naive);
        }
    }
}
