//! Span alignment between system event-argument responses and ERE reference
//! annotation.
//!
//! A system response names its argument by a character span. Scoring needs
//! to know which reference entity mentions and filler arguments that span
//! denotes, under a configurable strictness: exact extent or head equality,
//! containment in the reference extent, or relaxation through the head an
//! automatic parse assigns to the span.
//!
//! ## Core Types
//!
//! - [`OffsetRange`] - Half-open character range
//! - [`RangeIndex`] / [`OverlappingRangeSet`] - Exact and overlap lookup
//! - [`RangeReconciler`] - Merges overlapping or touching ranges
//! - [`SpanMatcher`] - The alignment rules
//! - [`ReferenceAligner`] - Per-document alignment of responses
//!
//! ## Example
//!
//! ```
//! use ere_align::{
//!     Entity, EntityMention, MatchPolicy, OffsetRange, ReferenceAligner, ReferenceDocument,
//!     SystemResponse,
//! };
//!
//! let obama = Entity::new(
//!     "ent-1",
//!     "PER",
//!     vec![EntityMention::new("m-1", OffsetRange::new(0, 12), Some(OffsetRange::new(7, 12)))],
//! );
//! let doc = ReferenceDocument::new("doc-1", vec![obama], vec![], vec![]).unwrap();
//! let aligner = ReferenceAligner::new(&doc, None, MatchPolicy::contained()).unwrap();
//!
//! let response = SystemResponse::new("r-1", "doc-1", OffsetRange::new(7, 12));
//! let entities = aligner.entities_for_response(&response);
//! assert_eq!(entities[0].id, "ent-1");
//! ```

mod aligner;
mod auxiliary;
mod config;
mod display;
mod error;
mod matcher;
mod offsets;
mod overlap;
mod range_index;
mod reconcile;
mod reference;
mod response;

// Offsets and errors
pub use error::{AlignError, AlignResult};
pub use offsets::{Offset, OffsetRange};

// Range containers
pub use overlap::OverlappingRangeSet;
pub use range_index::RangeIndex;
pub use reconcile::RangeReconciler;

// Annotation model
pub use reference::{
    Argument,
    Entity,
    EntityArgument,
    EntityMention,
    Event,
    EventMention,
    Filler,
    FillerArgument,
    ReferenceDocument,
};
pub use response::SystemResponse;

// Auxiliary parse
pub use auxiliary::{
    AuxiliaryDocument,
    AuxiliaryHeadResolver,
    AuxiliarySentence,
    HeadSource,
    ParseNode,
    ParseTree,
    ParsedDocument,
    ParsedSentence,
};

// Alignment
pub use aligner::{FillerAlignment, MentionAlignment, ReferenceAligner};
pub use config::MatchPolicy;
pub use matcher::{MatchRule, SpanMatcher, SystemSpan};

// Rendering
pub use display::AlignmentDisplay;
