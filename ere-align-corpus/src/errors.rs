//! Error types for corpus query matching.

use ere_align::AlignError;
use thiserror::Error;

/// Errors raised while loading queries or matching them against system output.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A malformed line in a query file. `line` is 1-based.
    #[error("invalid query line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A file that could not be read.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// A query response with no usable assessment.
    #[error("query response {response} is unassessed")]
    Unassessed { response: String },

    /// The system output holds nothing for a document the executor matched.
    #[error("no system output for document {doc_id}")]
    MissingDocument { doc_id: String },

    /// A document's linking was written without response-set ids.
    #[error("linking for document {doc_id} lacks response set ids")]
    MissingLinkingIds { doc_id: String },

    /// An event frame id that names no response set of its document.
    #[error("document {doc_id} has no response set {response_set_id}")]
    UnknownResponseSet {
        doc_id: String,
        response_set_id: String,
    },

    #[error(transparent)]
    Align(#[from] AlignError),
}

/// Result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
