//! System responses: the candidate extractions being scored.

use crate::OffsetRange;

/// One argument asserted by an extraction system.
///
/// Only `base_filler` takes part in alignment; the descriptors travel along
/// for the downstream scorer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SystemResponse {
    pub id: String,
    pub doc_id: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub realis: String,
    /// The span the system asserts as the argument filler.
    pub base_filler: OffsetRange,
    /// Evidence spans for the event predicate.
    #[serde(default)]
    pub predicate_justifications: Vec<OffsetRange>,
}

impl SystemResponse {
    /// A response carrying only what alignment needs.
    pub fn new(id: impl Into<String>, doc_id: impl Into<String>, base_filler: OffsetRange) -> Self {
        Self {
            id: id.into(),
            doc_id: doc_id.into(),
            event_type: String::new(),
            role: String::new(),
            realis: String::new(),
            base_filler,
            predicate_justifications: Vec::new(),
        }
    }

    pub fn with_event(mut self, event_type: impl Into<String>, role: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self.role = role.into();
        self
    }

    pub fn with_realis(mut self, realis: impl Into<String>) -> Self {
        self.realis = realis.into();
        self
    }

    pub fn with_predicate_justifications(mut self, spans: Vec<OffsetRange>) -> Self {
        self.predicate_justifications = spans;
        self
    }

    pub fn base_filler(&self) -> OffsetRange {
        self.base_filler
    }
}
