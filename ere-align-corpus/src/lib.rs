//! Corpus-level query matching for KBP event-argument evaluation.
//!
//! A corpus query names an event through one or more entry points. Systems
//! answer it by reporting event frames across the corpus; each answer is
//! reduced to a [`QueryResponse`] (query, document and merged predicate
//! justifications) and looked up among the assessments.
//!
//! ## Modules
//!
//! - [`query`] - Query model and the tab-separated query file
//! - [`assessment`] - Query responses and their assessments
//! - [`linking`] - Response sets and per-document linking
//! - [`matches`] - Correct and system query/document matches
//! - [`errors`] - Error types

pub mod assessment;
pub mod errors;
pub mod linking;
pub mod matches;
pub mod query;

pub use assessment::{CorpusQueryAssessments, QueryAssessment, QueryResponse};
pub use errors::{CorpusError, CorpusResult};
pub use linking::{ResponseLinking, ResponseSet};
pub use matches::{
    correct_matches, DocEventFrameReference, QueryDocMatch, QueryExecutor, SystemMatchExtractor,
    SystemOutput,
};
pub use query::{load_queries, parse_queries, CorpusQuery, CorpusQueryEntryPoint, CorpusQuerySet};
