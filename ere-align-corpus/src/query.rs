//! Corpus queries and the tab-separated query file.
//!
//! Each line of a query file describes one entry point:
//!
//! ```text
//! queryID <TAB> docID <TAB> eventType <TAB> role <TAB> casOffsets <TAB> pjOffsets
//! ```
//!
//! Offsets are written as inclusive `first-last` character offsets.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ere_align::OffsetRange;

use crate::{CorpusError, CorpusResult};

const FIELDS_PER_LINE: usize = 6;

/// Where a query points into the corpus: an argument of an event in one
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CorpusQueryEntryPoint {
    pub doc_id: String,
    pub event_type: String,
    pub role: String,
    /// The canonical argument string.
    pub cas: OffsetRange,
    pub predicate_justification: OffsetRange,
}

/// A query and all of its entry points.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CorpusQuery {
    pub id: String,
    pub entry_points: Vec<CorpusQueryEntryPoint>,
}

/// Every query of an evaluation, ordered by query id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusQuerySet {
    queries: Vec<CorpusQuery>,
}

impl CorpusQuerySet {
    /// Group entry points by query id. Repeated entry points are kept once.
    pub fn from_entry_points<I>(entry_points: I) -> Self
    where
        I: IntoIterator<Item = (String, CorpusQueryEntryPoint)>,
    {
        let mut by_query: BTreeMap<String, Vec<CorpusQueryEntryPoint>> = BTreeMap::new();
        for (query_id, entry_point) in entry_points {
            let entry_points = by_query.entry(query_id).or_default();
            if !entry_points.contains(&entry_point) {
                entry_points.push(entry_point);
            }
        }
        let queries = by_query
            .into_iter()
            .map(|(id, entry_points)| CorpusQuery { id, entry_points })
            .collect();
        Self { queries }
    }

    pub fn queries(&self) -> &[CorpusQuery] {
        &self.queries
    }

    pub fn query(&self, id: &str) -> Option<&CorpusQuery> {
        self.queries
            .binary_search_by(|q| q.id.as_str().cmp(id))
            .ok()
            .map(|idx| &self.queries[idx])
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn entry_point_count(&self) -> usize {
        self.queries.iter().map(|q| q.entry_points.len()).sum()
    }
}

/// Parse inclusive `first-last` offsets.
fn parse_offsets(field: &str) -> Result<OffsetRange, String> {
    let (first, last) = field
        .split_once('-')
        .ok_or_else(|| format!("expected first-last offsets but got {:?}", field))?;
    let first: usize = first
        .trim()
        .parse()
        .map_err(|e| format!("bad start offset {:?}: {}", first, e))?;
    let last: usize = last
        .trim()
        .parse()
        .map_err(|e| format!("bad end offset {:?}: {}", last, e))?;
    if last < first {
        return Err(format!("offsets {} run backwards", field));
    }
    OffsetRange::from_inclusive(first, last)
        .ok_or_else(|| format!("end offset {} is out of range", last))
}

fn parse_line(line: &str) -> Result<(String, CorpusQueryEntryPoint), String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELDS_PER_LINE {
        return Err(format!(
            "expected {} tab-separated fields but got {}",
            FIELDS_PER_LINE,
            fields.len()
        ));
    }
    let entry_point = CorpusQueryEntryPoint {
        doc_id: fields[1].to_string(),
        event_type: fields[2].to_string(),
        role: fields[3].to_string(),
        cas: parse_offsets(fields[4])?,
        predicate_justification: parse_offsets(fields[5])?,
    };
    Ok((fields[0].to_string(), entry_point))
}

/// Parse the contents of a query file.
///
/// Any malformed line fails the whole file, reporting its 1-based number.
pub fn parse_queries(content: &str) -> CorpusResult<CorpusQuerySet> {
    let mut entry_points = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let entry = parse_line(line).map_err(|message| CorpusError::Parse {
            line: idx + 1,
            message: format!("{}: {:?}", message, line),
        })?;
        entry_points.push(entry);
    }
    let set = CorpusQuerySet::from_entry_points(entry_points);
    log::info!(
        "Loaded {} queries with {} entry points",
        set.len(),
        set.entry_point_count()
    );
    Ok(set)
}

/// Load a query file.
pub fn load_queries(path: &Path) -> CorpusResult<CorpusQuerySet> {
    let content = fs::read_to_string(path).map_err(|e| CorpusError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_queries(&content)
}
