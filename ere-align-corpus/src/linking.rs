//! Response linking: which system responses a system considers the same
//! event frame.

use std::collections::{BTreeMap, HashMap};

use ere_align::{OffsetRange, RangeReconciler, SystemResponse};

use crate::{CorpusError, CorpusResult};

/// One linked cluster of responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSet {
    responses: Vec<SystemResponse>,
}

impl ResponseSet {
    pub fn new(responses: Vec<SystemResponse>) -> Self {
        Self { responses }
    }

    pub fn responses(&self) -> &[SystemResponse] {
        &self.responses
    }

    /// The predicate justifications of every member, merged into one
    /// canonical set of disjoint spans.
    pub fn merged_predicate_justifications(&self) -> Vec<OffsetRange> {
        RangeReconciler::merge(
            self.responses
                .iter()
                .flat_map(|r| r.predicate_justifications.iter().copied()),
        )
    }
}

/// A document's response sets, optionally addressable by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLinking {
    doc_id: String,
    response_sets: Vec<ResponseSet>,
    /// response set id -> index into `response_sets`
    response_set_ids: Option<HashMap<String, usize>>,
}

impl ResponseLinking {
    /// A linking written without response-set ids.
    pub fn new(doc_id: impl Into<String>, response_sets: Vec<ResponseSet>) -> Self {
        Self {
            doc_id: doc_id.into(),
            response_sets,
            response_set_ids: None,
        }
    }

    /// A linking whose response sets carry ids.
    pub fn with_ids<I>(doc_id: impl Into<String>, response_sets: I) -> Self
    where
        I: IntoIterator<Item = (String, ResponseSet)>,
    {
        let mut sets = Vec::new();
        let mut ids = HashMap::new();
        for (id, set) in response_sets {
            ids.insert(id, sets.len());
            sets.push(set);
        }
        Self {
            doc_id: doc_id.into(),
            response_sets: sets,
            response_set_ids: Some(ids),
        }
    }

    /// Build an id-carrying linking from response ids.
    ///
    /// Ids that name no response in `responses` are skipped with a warning.
    pub fn from_response_ids<I>(doc_id: impl Into<String>, responses: &[SystemResponse], clusters: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let doc_id = doc_id.into();
        let by_id: HashMap<&str, &SystemResponse> =
            responses.iter().map(|r| (r.id.as_str(), r)).collect();

        let sets: BTreeMap<String, ResponseSet> = clusters
            .into_iter()
            .map(|(set_id, member_ids)| {
                let members = member_ids
                    .iter()
                    .filter_map(|id| match by_id.get(id.as_str()) {
                        Some(response) => Some((*response).clone()),
                        None => {
                            log::warn!(
                                "response set {} in {} names unknown response {}",
                                set_id,
                                doc_id,
                                id
                            );
                            None
                        }
                    })
                    .collect();
                (set_id, ResponseSet::new(members))
            })
            .collect();
        Self::with_ids(doc_id, sets)
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    pub fn response_sets(&self) -> &[ResponseSet] {
        &self.response_sets
    }

    pub fn has_ids(&self) -> bool {
        self.response_set_ids.is_some()
    }

    /// The response set with the given id.
    pub fn response_set(&self, id: &str) -> CorpusResult<&ResponseSet> {
        let ids = self
            .response_set_ids
            .as_ref()
            .ok_or_else(|| CorpusError::MissingLinkingIds {
                doc_id: self.doc_id.clone(),
            })?;
        ids.get(id)
            .map(|&idx| &self.response_sets[idx])
            .ok_or_else(|| CorpusError::UnknownResponseSet {
                doc_id: self.doc_id.clone(),
                response_set_id: id.to_string(),
            })
    }
}
