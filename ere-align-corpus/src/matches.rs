//! Query/document matches, from assessments and from system output.
//!
//! Scoring compares two sets of [`QueryDocMatch`]: the documents assessors
//! found correct for a query, and the documents a system matched it to.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    CorpusError, CorpusQuery, CorpusQueryAssessments, CorpusResult, QueryAssessment, QueryResponse,
    ResponseLinking,
};

/// A query matched against a document, with the assessment of that match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct QueryDocMatch {
    pub query_id: String,
    pub doc_id: String,
    pub assessment: QueryAssessment,
}

/// An event frame a system reported in one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocEventFrameReference {
    pub doc_id: String,
    pub event_frame_id: String,
}

/// A system's output for the corpus, as per-document response linkings.
#[derive(Debug, Clone, Default)]
pub struct SystemOutput {
    linkings: BTreeMap<String, ResponseLinking>,
}

impl SystemOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, linking: ResponseLinking) {
        self.linkings.insert(linking.doc_id().to_string(), linking);
    }

    pub fn linking(&self, doc_id: &str) -> CorpusResult<&ResponseLinking> {
        self.linkings
            .get(doc_id)
            .ok_or_else(|| CorpusError::MissingDocument {
                doc_id: doc_id.to_string(),
            })
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.linkings.keys().map(String::as_str)
    }
}

/// Finds the event frames in system output that answer a query.
pub trait QueryExecutor {
    fn query_event_frames(
        &self,
        output: &SystemOutput,
        query: &CorpusQuery,
    ) -> CorpusResult<Vec<DocEventFrameReference>>;
}

/// The matches assessors judged correct for `query`.
///
/// Fails if any response to the query is still unassessed.
pub fn correct_matches(
    query: &CorpusQuery,
    assessments: &CorpusQueryAssessments,
) -> CorpusResult<BTreeSet<QueryDocMatch>> {
    let mut matches = BTreeSet::new();
    for (response, assessment) in assessments.iter() {
        if response.query_id != query.id {
            continue;
        }
        match assessment {
            QueryAssessment::Unassessed => {
                return Err(CorpusError::Unassessed {
                    response: response.to_string(),
                })
            }
            QueryAssessment::Correct => {
                matches.insert(QueryDocMatch {
                    query_id: response.query_id.clone(),
                    doc_id: response.doc_id.clone(),
                    assessment,
                });
            }
            QueryAssessment::Wrong => {}
        }
    }
    Ok(matches)
}

/// Turns a system's answers to a query into assessed matches.
pub struct SystemMatchExtractor<'a, E> {
    assessments: &'a CorpusQueryAssessments,
    executor: E,
}

impl<'a, E: QueryExecutor> SystemMatchExtractor<'a, E> {
    pub fn new(assessments: &'a CorpusQueryAssessments, executor: E) -> Self {
        Self {
            assessments,
            executor,
        }
    }

    /// Every document the system matched `query` to, with its assessment.
    ///
    /// Each matched event frame's response set is reduced to a
    /// [`QueryResponse`] by merging its predicate justifications; that
    /// response must have been assessed.
    pub fn extract_matches(
        &self,
        query: &CorpusQuery,
        output: &SystemOutput,
    ) -> CorpusResult<BTreeSet<QueryDocMatch>> {
        let mut matches = BTreeSet::new();
        for frame in self.executor.query_event_frames(output, query)? {
            let response_set = output
                .linking(&frame.doc_id)?
                .response_set(&frame.event_frame_id)?;
            let response = QueryResponse::new(
                query.id.clone(),
                frame.doc_id.clone(),
                response_set.merged_predicate_justifications(),
            );
            let assessment = self
                .assessments
                .assessment(&response)
                .ok_or_else(|| CorpusError::Unassessed {
                    response: response.to_string(),
                })?;
            log::debug!("{} matched as {:?}", response, assessment);
            matches.insert(QueryDocMatch {
                query_id: query.id.clone(),
                doc_id: frame.doc_id,
                assessment,
            });
        }
        Ok(matches)
    }
}
