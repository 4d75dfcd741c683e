//! Interval union for justification spans.
//!
//! The predicate justifications of every response in a linked cluster are
//! poured into one [`RangeReconciler`]; what comes out is the canonical,
//! non-redundant justification set for the cluster.

use crate::OffsetRange;

/// A union of offset ranges, kept as sorted disjoint intervals.
///
/// Ranges that overlap or touch (`[0,5)` and `[5,9)`) are coalesced, so no
/// two stored ranges could be merged further. Empty ranges cover nothing and
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeReconciler {
    ranges: Vec<OffsetRange>,
}

impl RangeReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot merge: the minimal disjoint cover of `spans`, ascending.
    pub fn merge<I>(spans: I) -> Vec<OffsetRange>
    where
        I: IntoIterator<Item = OffsetRange>,
    {
        let mut reconciler = Self::new();
        reconciler.extend(spans);
        reconciler.into_ranges()
    }

    /// Add one range, absorbing every stored range connected to it.
    pub fn add(&mut self, range: OffsetRange) {
        if range.is_empty() {
            return;
        }
        // stored ranges are disjoint and sorted, so both bounds are monotone
        let lo = self.ranges.partition_point(|r| r.end() < range.start());
        let hi = self.ranges.partition_point(|r| r.start() <= range.end());

        let merged = self.ranges[lo..hi]
            .iter()
            .fold(range, |acc, r| acc.span(r));
        self.ranges.splice(lo..hi, std::iter::once(merged));
    }

    /// The merged ranges, ascending.
    pub fn ranges(&self) -> &[OffsetRange] {
        &self.ranges
    }

    pub fn into_ranges(self) -> Vec<OffsetRange> {
        self.ranges
    }

    /// True if a single merged range covers all of `range`.
    pub fn encloses(&self, range: &OffsetRange) -> bool {
        let idx = self.ranges.partition_point(|r| r.end() < range.end());
        self.ranges
            .get(idx)
            .map_or(false, |r| r.encloses(range))
    }

    pub fn contains_offset(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end() <= offset);
        self.ranges
            .get(idx)
            .map_or(false, |r| r.contains_offset(offset))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl Extend<OffsetRange> for RangeReconciler {
    fn extend<I: IntoIterator<Item = OffsetRange>>(&mut self, iter: I) {
        for range in iter {
            self.add(range);
        }
    }
}

impl std::iter::FromIterator<OffsetRange> for RangeReconciler {
    fn from_iter<I: IntoIterator<Item = OffsetRange>>(iter: I) -> Self {
        let mut reconciler = Self::new();
        reconciler.extend(iter);
        reconciler
    }
}
