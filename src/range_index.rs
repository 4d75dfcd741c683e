//! Exact-range lookup over reference annotations.

use std::collections::HashMap;

use crate::{AlignResult, OffsetRange};

/// Maps an offset range to every annotation occupying exactly that range.
///
/// One range may index several annotations (coreferent mentions with
/// identical boundaries, for instance). Values under a key keep the order in
/// which they were encountered while building. The index is immutable once
/// built.
#[derive(Debug, Clone)]
pub struct RangeIndex<T> {
    by_range: HashMap<OffsetRange, Vec<T>>,
    len: usize,
}

impl<T> RangeIndex<T> {
    /// Group `items` by the range `selector` picks for each of them.
    ///
    /// Items for which the selector returns `None` (a mention without a head,
    /// when indexing heads) are left out. Fails on the first inverted range.
    pub fn build<I, F>(items: I, mut selector: F) -> AlignResult<Self>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Option<OffsetRange>,
    {
        let mut by_range: HashMap<OffsetRange, Vec<T>> = HashMap::new();
        let mut len = 0;
        for item in items {
            if let Some(range) = selector(&item) {
                by_range.entry(range.validate()?).or_default().push(item);
                len += 1;
            }
        }
        Ok(Self { by_range, len })
    }

    /// Annotations whose selected range equals `range` exactly.
    ///
    /// Returns an empty slice when nothing is indexed there.
    pub fn exact_matches(&self, range: &OffsetRange) -> &[T] {
        self.by_range
            .get(range)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct ranges present in the index, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &OffsetRange> {
        self.by_range.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OffsetRange, &[T])> {
        self.by_range.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of indexed annotations (not distinct ranges).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
