//! The span alignment decision procedure.
//!
//! Rules are tried in a fixed order and the first that holds wins:
//!
//! 1. the system span equals the reference extent;
//! 2. the system span equals the reference head;
//! 3. the reference extent encloses the system span (unless exact heads are
//!    required);
//! 4. with auxiliary relaxation, the auxiliary parse head `H` of the system
//!    span equals the extent or the reference head, or (unless exact heads
//!    are required) `H` and the extent enclose one another and both the
//!    extent and the system span enclose a head witness.

use crate::{AlignError, AlignResult, AuxiliaryHeadResolver, MatchPolicy, OffsetRange};

/// Which rule accepted an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum MatchRule {
    ExactExtent,
    ExactHead,
    ExtentContainment,
    AuxiliaryHeadExact,
    AuxiliaryHeadEnclosure,
}

impl MatchRule {
    pub fn is_exact(&self) -> bool {
        matches!(self, MatchRule::ExactExtent | MatchRule::ExactHead)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchRule::ExactExtent => "exact extent",
            MatchRule::ExactHead => "exact head",
            MatchRule::ExtentContainment => "extent containment",
            MatchRule::AuxiliaryHeadExact => "auxiliary head",
            MatchRule::AuxiliaryHeadEnclosure => "auxiliary head enclosure",
        }
    }
}

/// A system span together with its auxiliary head, looked up once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemSpan {
    pub span: OffsetRange,
    pub auxiliary_head: Option<OffsetRange>,
}

impl SystemSpan {
    /// A span with no auxiliary head.
    pub fn bare(span: OffsetRange) -> Self {
        Self {
            span,
            auxiliary_head: None,
        }
    }
}

/// Decides whether a system span denotes a reference annotation.
#[derive(Debug, Clone, Copy)]
pub struct SpanMatcher<'a> {
    policy: MatchPolicy,
    auxiliary: Option<AuxiliaryHeadResolver<'a>>,
}

impl<'a> SpanMatcher<'a> {
    /// Fails if the policy asks for auxiliary relaxation without a resolver.
    pub fn new(policy: MatchPolicy, auxiliary: Option<AuxiliaryHeadResolver<'a>>) -> AlignResult<Self> {
        if policy.use_auxiliary_relaxation && auxiliary.is_none() {
            return Err(AlignError::MissingAuxiliaryDocument);
        }
        Ok(Self { policy, auxiliary })
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Look up the auxiliary head of `span`, if the policy will use it.
    pub fn prepare(&self, span: OffsetRange) -> SystemSpan {
        let auxiliary_head = if self.policy.use_auxiliary_relaxation {
            self.auxiliary.and_then(|aux| aux.head_for(&span))
        } else {
            None
        };
        SystemSpan {
            span,
            auxiliary_head,
        }
    }

    /// Does `span` align with a reference annotation with this extent and head?
    pub fn matches(&self, extent: &OffsetRange, head: Option<&OffsetRange>, span: &OffsetRange) -> bool {
        self.matching_rule(extent, head, &self.prepare(*span)).is_some()
    }

    /// The first rule under which `system` aligns with the annotation.
    pub fn matching_rule(
        &self,
        extent: &OffsetRange,
        head: Option<&OffsetRange>,
        system: &SystemSpan,
    ) -> Option<MatchRule> {
        let span = &system.span;
        let exact_only = self.policy.exact_head_only_for_auxiliary;

        if extent == span {
            return Some(MatchRule::ExactExtent);
        }
        if head == Some(span) {
            return Some(MatchRule::ExactHead);
        }
        // a reference extent is assumed to enclose its own head
        if !exact_only && extent.encloses(span) {
            return Some(MatchRule::ExtentContainment);
        }

        if !self.policy.use_auxiliary_relaxation {
            return None;
        }
        let aux_head = system.auxiliary_head.as_ref()?;

        if extent == aux_head || head == Some(aux_head) {
            return Some(MatchRule::AuxiliaryHeadExact);
        }
        if !exact_only && (extent.encloses(aux_head) || aux_head.encloses(extent)) {
            // each side must hold a head, by either notion of head
            let witnessed_by = |outer: &OffsetRange| {
                outer.encloses(aux_head) || head.map_or(false, |h| outer.encloses(h))
            };
            if witnessed_by(extent) && witnessed_by(span) {
                return Some(MatchRule::AuxiliaryHeadEnclosure);
            }
        }
        None
    }
}
