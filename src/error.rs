//! Error types for alignment.
//!
//! Configuration problems and malformed annotation data are reported when an
//! aligner or index is built. Queries themselves never fail: an unaligned
//! response is an empty result, not an error.

use thiserror::Error;

use crate::OffsetRange;

/// Errors raised while building alignment structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// Auxiliary relaxation was requested but no auxiliary parse was supplied.
    #[error("auxiliary relaxation requested but no auxiliary document was supplied")]
    MissingAuxiliaryDocument,

    /// A range whose start lies after its end.
    #[error("inverted offset range: start {start} > end {end}")]
    InvertedRange { start: usize, end: usize },

    /// A declared head that falls outside its own mention's extent.
    #[error("head {head} of mention {mention} is not enclosed by its extent {extent}")]
    HeadOutsideExtent {
        mention: String,
        head: OffsetRange,
        extent: OffsetRange,
    },

    /// Two mentions share an id, so the mention to entity table is ambiguous.
    #[error("mention id {mention} appears more than once")]
    DuplicateMention { mention: String },

    /// A policy file could not be read or parsed.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A reference document or auxiliary parse could not be read or written.
    #[error("invalid annotation data: {message}")]
    Data { message: String },
}

/// Result type for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;
