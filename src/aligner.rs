//! Per-document alignment of system responses to reference annotation.
//!
//! Build one [`ReferenceAligner`] per reference document, then query it once
//! per system response. Construction validates the document and builds the
//! range indexes; queries are read-only and may run concurrently.
//!
//! Exact rules are answered from the range indexes. The per-annotation scan
//! runs only when the policy allows a looser rule and the system span (or its
//! auxiliary head) could touch some reference extent at all.

use crate::{
    AlignResult, AuxiliaryHeadResolver, Entity, EntityMention, FillerArgument, MatchPolicy,
    MatchRule, OffsetRange, OverlappingRangeSet, RangeIndex, ReferenceDocument, SpanMatcher,
    SystemResponse, SystemSpan,
};

/// Position of a mention: (entity index, mention index). Sorted keys follow
/// the document's own enumeration order.
type MentionKey = (usize, usize);

/// A mention a response aligned to, and the rule that accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionAlignment<'a> {
    pub mention: &'a EntityMention,
    pub entity: &'a Entity,
    pub rule: MatchRule,
}

/// A filler argument a response aligned to, and the rule that accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillerAlignment<'a> {
    pub argument: &'a FillerArgument,
    pub rule: MatchRule,
}

/// Overlap prefilter for one family of extents.
#[derive(Debug)]
struct ExtentCoverage {
    extents: OverlappingRangeSet,
    /// Empty extents overlap nothing, yet can still satisfy a rule.
    has_empty: bool,
}

impl ExtentCoverage {
    fn build<'a, I>(extents: I) -> Self
    where
        I: IntoIterator<Item = &'a OffsetRange>,
    {
        let extents: Vec<&OffsetRange> = extents.into_iter().collect();
        Self {
            has_empty: extents.iter().any(|e| e.is_empty()),
            extents: OverlappingRangeSet::build(extents),
        }
    }

    /// Whether a non-exact rule could possibly fire for `system`.
    ///
    /// Every looser rule needs the extent to share an offset with the system
    /// span or its auxiliary head, unless one of those ranges is empty.
    fn may_relax(&self, system: &SystemSpan) -> bool {
        let touches = |range: &OffsetRange| range.is_empty() || self.extents.overlaps_any(range);
        self.has_empty
            || touches(&system.span)
            || system.auxiliary_head.as_ref().map_or(false, touches)
    }
}

/// Aligns system responses against one reference document.
#[derive(Debug)]
pub struct ReferenceAligner<'a> {
    document: &'a ReferenceDocument,
    matcher: SpanMatcher<'a>,
    mentions_by_extent: RangeIndex<MentionKey>,
    mentions_by_head: RangeIndex<MentionKey>,
    mention_coverage: ExtentCoverage,
    /// filler arguments in annotation order, equal arguments kept once
    filler_arguments: Vec<&'a FillerArgument>,
    fillers_by_extent: RangeIndex<usize>,
    filler_coverage: ExtentCoverage,
}

impl<'a> ReferenceAligner<'a> {
    /// Validate `document` and index it.
    ///
    /// Fails with `MissingAuxiliaryDocument` when the policy relaxes through
    /// an auxiliary parse but none is given, and with the document's own
    /// validation error when a range is inverted or a head escapes its extent.
    pub fn new(
        document: &'a ReferenceDocument,
        auxiliary: Option<AuxiliaryHeadResolver<'a>>,
        policy: MatchPolicy,
    ) -> AlignResult<Self> {
        let matcher = SpanMatcher::new(policy, auxiliary)?;
        document.validate()?;

        let keyed: Vec<(MentionKey, &EntityMention)> = document
            .entities()
            .iter()
            .enumerate()
            .flat_map(|(e, entity)| {
                entity
                    .mentions
                    .iter()
                    .enumerate()
                    .map(move |(m, mention)| ((e, m), mention))
            })
            .collect();
        let mentions_by_extent = RangeIndex::build(keyed.iter().map(|(k, _)| *k), |k| {
            Some(document.entities()[k.0].mentions[k.1].extent)
        })?;
        let mentions_by_head = RangeIndex::build(keyed.iter().map(|(k, _)| *k), |k| {
            document.entities()[k.0].mentions[k.1].head
        })?;
        let mention_coverage = ExtentCoverage::build(keyed.iter().map(|(_, m)| &m.extent));

        let mut filler_arguments: Vec<&'a FillerArgument> = Vec::new();
        for arg in document.filler_arguments() {
            if !filler_arguments.contains(&arg) {
                filler_arguments.push(arg);
            }
        }
        let fillers_by_extent = RangeIndex::build(0..filler_arguments.len(), |&i| {
            Some(filler_arguments[i].filler.extent)
        })?;
        let filler_coverage = ExtentCoverage::build(filler_arguments.iter().map(|a| &a.filler.extent));

        log::debug!(
            "indexed {}: {} mentions, {} filler arguments",
            document.doc_id(),
            mentions_by_extent.len(),
            filler_arguments.len()
        );

        Ok(Self {
            document,
            matcher,
            mentions_by_extent,
            mentions_by_head,
            mention_coverage,
            filler_arguments,
            fillers_by_extent,
            filler_coverage,
        })
    }

    pub fn document(&self) -> &'a ReferenceDocument {
        self.document
    }

    pub fn policy(&self) -> MatchPolicy {
        self.matcher.policy()
    }

    fn allows_relaxation(&self) -> bool {
        let policy = self.matcher.policy();
        policy.use_auxiliary_relaxation || !policy.exact_head_only_for_auxiliary
    }

    fn mention_at(&self, key: MentionKey) -> (&'a Entity, &'a EntityMention) {
        let entity = &self.document.entities()[key.0];
        (entity, &entity.mentions[key.1])
    }

    /// Every mention `response` aligns with, in document order, with the
    /// rule that accepted each one.
    pub fn mention_alignments(&self, response: &SystemResponse) -> Vec<MentionAlignment<'a>> {
        let system = self.matcher.prepare(response.base_filler());

        let hits: Vec<(MentionKey, MatchRule)> =
            if self.allows_relaxation() && self.mention_coverage.may_relax(&system) {
                self.scan_mentions(&system)
            } else {
                self.exact_mentions(&system.span)
            };

        hits.into_iter()
            .map(|(key, rule)| {
                let (entity, mention) = self.mention_at(key);
                log::debug!(
                    "response {} aligned to mention {} ({})",
                    response.id,
                    mention.id,
                    rule.label()
                );
                MentionAlignment {
                    mention,
                    entity,
                    rule,
                }
            })
            .collect()
    }

    fn exact_mentions(&self, span: &OffsetRange) -> Vec<(MentionKey, MatchRule)> {
        let mut hits: Vec<(MentionKey, MatchRule)> = self
            .mentions_by_extent
            .exact_matches(span)
            .iter()
            .map(|&key| (key, MatchRule::ExactExtent))
            .collect();
        for &key in self.mentions_by_head.exact_matches(span) {
            if !hits.iter().any(|(k, _)| *k == key) {
                hits.push((key, MatchRule::ExactHead));
            }
        }
        hits.sort_by_key(|(key, _)| *key);
        hits
    }

    fn scan_mentions(&self, system: &SystemSpan) -> Vec<(MentionKey, MatchRule)> {
        let mut hits = Vec::new();
        for (e, entity) in self.document.entities().iter().enumerate() {
            for (m, mention) in entity.mentions.iter().enumerate() {
                if let Some(rule) =
                    self.matcher
                        .matching_rule(&mention.extent, mention.head.as_ref(), system)
                {
                    hits.push(((e, m), rule));
                }
            }
        }
        hits
    }

    /// Reference mentions matching the response's base filler, in document
    /// order.
    pub fn mentions_for_response(&self, response: &SystemResponse) -> Vec<&'a EntityMention> {
        self.mention_alignments(response)
            .into_iter()
            .map(|a| a.mention)
            .collect()
    }

    /// Entities owning at least one matched mention, each listed once, in
    /// order of first match.
    pub fn entities_for_response(&self, response: &SystemResponse) -> Vec<&'a Entity> {
        let mut entities: Vec<&'a Entity> = Vec::new();
        for mention in self.mentions_for_response(response) {
            if let Some(entity) = self.document.entity_containing(mention) {
                if !entities.iter().any(|seen| seen.id == entity.id) {
                    entities.push(entity);
                }
            }
        }
        entities
    }

    /// Filler arguments the response aligns with, and the accepting rule.
    ///
    /// Fillers carry no head, so only extent rules and auxiliary relaxation
    /// against the extent apply.
    pub fn filler_alignments(&self, response: &SystemResponse) -> Vec<FillerAlignment<'a>> {
        let system = self.matcher.prepare(response.base_filler());

        let hits: Vec<(usize, MatchRule)> =
            if self.allows_relaxation() && self.filler_coverage.may_relax(&system) {
                self.filler_arguments
                    .iter()
                    .enumerate()
                    .filter_map(|(i, arg)| {
                        self.matcher
                            .matching_rule(&arg.filler.extent, None, &system)
                            .map(|rule| (i, rule))
                    })
                    .collect()
            } else {
                self.fillers_by_extent
                    .exact_matches(&system.span)
                    .iter()
                    .map(|&i| (i, MatchRule::ExactExtent))
                    .collect()
            };

        hits.into_iter()
            .map(|(i, rule)| {
                let argument = self.filler_arguments[i];
                log::debug!(
                    "response {} aligned to filler {} ({})",
                    response.id,
                    argument.filler.id,
                    rule.label()
                );
                FillerAlignment { argument, rule }
            })
            .collect()
    }

    /// Filler-typed event arguments matching the response's base filler.
    /// Equal arguments appear once.
    pub fn fillers_for_response(&self, response: &SystemResponse) -> Vec<&'a FillerArgument> {
        self.filler_alignments(response)
            .into_iter()
            .map(|a| a.argument)
            .collect()
    }
}
