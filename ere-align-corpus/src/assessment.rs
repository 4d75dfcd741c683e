//! Query responses and their assessments.

use std::collections::HashMap;
use std::fmt;

use ere_align::{OffsetRange, RangeReconciler};

/// An assessor's judgement of one query response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum QueryAssessment {
    Correct,
    Wrong,
    Unassessed,
}

/// A system's answer to a query in one document, identified by the
/// predicate justifications it cites.
///
/// Justifications are held in canonical form: merged, sorted and disjoint.
/// Two responses citing the same text compare equal however their spans
/// were split up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct QueryResponse {
    pub query_id: String,
    pub doc_id: String,
    predicate_justifications: Vec<OffsetRange>,
}

impl QueryResponse {
    pub fn new<I>(query_id: impl Into<String>, doc_id: impl Into<String>, predicate_justifications: I) -> Self
    where
        I: IntoIterator<Item = OffsetRange>,
    {
        Self {
            query_id: query_id.into(),
            doc_id: doc_id.into(),
            predicate_justifications: RangeReconciler::merge(predicate_justifications),
        }
    }

    pub fn predicate_justifications(&self) -> &[OffsetRange] {
        &self.predicate_justifications
    }
}

impl fmt::Display for QueryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} [", self.query_id, self.doc_id)?;
        for (idx, pj) in self.predicate_justifications.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", pj)?;
        }
        f.write_str("]")
    }
}

/// Every assessed query response of an evaluation.
#[derive(Debug, Clone, Default)]
pub struct CorpusQueryAssessments {
    assessments: HashMap<QueryResponse, QueryAssessment>,
}

impl CorpusQueryAssessments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assessment, replacing any earlier one for the response.
    pub fn insert(&mut self, response: QueryResponse, assessment: QueryAssessment) {
        if let Some(previous) = self.assessments.insert(response.clone(), assessment) {
            if previous != assessment {
                log::warn!(
                    "assessment of {} changed from {:?} to {:?}",
                    response,
                    previous,
                    assessment
                );
            }
        }
    }

    pub fn assessment(&self, response: &QueryResponse) -> Option<QueryAssessment> {
        self.assessments.get(response).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QueryResponse, QueryAssessment)> {
        self.assessments.iter().map(|(r, a)| (r, *a))
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}

impl std::iter::FromIterator<(QueryResponse, QueryAssessment)> for CorpusQueryAssessments {
    fn from_iter<I: IntoIterator<Item = (QueryResponse, QueryAssessment)>>(iter: I) -> Self {
        let mut assessments = Self::new();
        for (response, assessment) in iter {
            assessments.insert(response, assessment);
        }
        assessments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: usize, end: usize) -> OffsetRange {
        OffsetRange::new(start, end)
    }

    #[test]
    fn test_justifications_canonicalized() {
        let split = QueryResponse::new("Q1", "D1", vec![r(20, 30), r(0, 5), r(4, 9)]);
        let whole = QueryResponse::new("Q1", "D1", vec![r(0, 9), r(20, 30)]);
        assert_eq!(split, whole);
        assert_eq!(split.predicate_justifications(), &[r(0, 9), r(20, 30)]);
        assert_eq!(split.to_string(), "Q1/D1 [[0,9), [20,30)]");
    }

    #[test]
    fn test_lookup_by_equal_response() {
        let assessments: CorpusQueryAssessments = vec![
            (QueryResponse::new("Q1", "D1", vec![r(0, 9)]), QueryAssessment::Correct),
            (QueryResponse::new("Q1", "D2", vec![r(3, 7)]), QueryAssessment::Wrong),
        ]
        .into_iter()
        .collect();

        let split = QueryResponse::new("Q1", "D1", vec![r(0, 4), r(4, 9)]);
        assert_eq!(assessments.assessment(&split), Some(QueryAssessment::Correct));
        assert_eq!(
            assessments.assessment(&QueryResponse::new("Q2", "D1", vec![r(0, 9)])),
            None
        );
        assert_eq!(assessments.len(), 2);
    }

    #[test]
    fn test_reassessment_replaces() {
        let mut assessments = CorpusQueryAssessments::new();
        let response = QueryResponse::new("Q1", "D1", vec![r(0, 9)]);
        assessments.insert(response.clone(), QueryAssessment::Unassessed);
        assessments.insert(response.clone(), QueryAssessment::Wrong);
        assert_eq!(assessments.assessment(&response), Some(QueryAssessment::Wrong));
        assert_eq!(assessments.len(), 1);
    }
}
