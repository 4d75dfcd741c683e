//! Character offset ranges over a document's original text.
//!
//! All ranges are half-open: `[start, end)`. The KBP file formats write
//! inclusive `first-last` pairs, which [`OffsetRange::from_inclusive`]
//! converts at the boundary.

use std::fmt;

use crate::error::AlignError;

/// A character position in a document's original text.
pub type Offset = usize;

/// A half-open interval `[start, end)` of character offsets.
///
/// Ordering is lexicographic on `(start, end)`, which is what the range
/// containers rely on for deterministic iteration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct OffsetRange {
    start: Offset,
    end: Offset,
}

impl OffsetRange {
    /// Create a range without checking `start <= end`.
    ///
    /// Annotation loaders produce ranges straight from the data, so an
    /// inverted range is representable here and rejected when an index is
    /// built (see [`OffsetRange::validate`]).
    pub const fn new(start: Offset, end: Offset) -> Self {
        Self { start, end }
    }

    /// Create a range, rejecting `start > end`.
    pub fn try_new(start: Offset, end: Offset) -> Result<Self, AlignError> {
        Self::new(start, end).validate()
    }

    /// Convert inclusive `first..=last` offsets into a half-open range.
    ///
    /// `None` if `last` is the largest offset, whose successor has no
    /// representation.
    pub fn from_inclusive(first: Offset, last: Offset) -> Option<Self> {
        last.checked_add(1).map(|end| Self::new(first, end))
    }

    pub const fn start(&self) -> Offset {
        self.start
    }

    pub const fn end(&self) -> Offset {
        self.end
    }

    /// The last offset covered, for writing back to the inclusive formats.
    /// `None` for an empty range.
    pub fn last_inclusive(&self) -> Option<Offset> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Returns the range back if it is well formed.
    pub fn validate(self) -> Result<Self, AlignError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(AlignError::InvertedRange {
                start: self.start,
                end: self.end,
            })
        }
    }

    pub fn contains_offset(&self, offset: Offset) -> bool {
        self.start <= offset && offset < self.end
    }

    /// True if every offset of `other` lies within `self`.
    ///
    /// An empty range is enclosed by any range whose bounds surround its
    /// position, so `[5,10)` encloses `[7,7)` and `[10,10)`.
    pub fn encloses(&self, other: &OffsetRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if the two ranges share at least one offset.
    pub fn overlaps(&self, other: &OffsetRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if the ranges overlap or touch, i.e. their union is a single
    /// interval.
    pub fn is_connected(&self, other: &OffsetRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The smallest range enclosing both.
    pub fn span(&self, other: &OffsetRange) -> OffsetRange {
        OffsetRange::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The shared offsets, if any.
    pub fn intersection(&self, other: &OffsetRange) -> Option<OffsetRange> {
        if self.overlaps(other) {
            Some(OffsetRange::new(
                self.start.max(other.start),
                self.end.min(other.end),
            ))
        } else {
            None
        }
    }
}

impl fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end)
    }
}

impl From<std::ops::Range<Offset>> for OffsetRange {
    fn from(range: std::ops::Range<Offset>) -> Self {
        OffsetRange::new(range.start, range.end)
    }
}
