//! Heads from an automatic parse of the same text.
//!
//! Reference annotation does not always mark a head, and system spans never
//! do. When relaxation is enabled the aligner asks a parallel parse for the
//! syntactic head of the system span: find the first sentence containing the
//! span, the smallest parse node exactly spanning it, and that node's
//! terminal head.
//!
//! The three lookup steps are expressed as traits so any parse store can be
//! plugged in; [`ParsedDocument`] is the in-memory implementation.

use crate::{AlignError, AlignResult, OffsetRange};

/// A node of a constituency parse.
pub trait ParseNode {
    fn span(&self) -> OffsetRange;

    /// The leaf reached by following head children down from this node.
    fn terminal_head(&self) -> Option<&Self>;
}

/// A parsed sentence.
pub trait AuxiliarySentence {
    type Node: ParseNode;

    /// The smallest node whose span is exactly `range`.
    fn node_for_offsets(&self, range: &OffsetRange) -> Option<&Self::Node>;
}

/// A parsed document, parallel to the reference document's text.
pub trait AuxiliaryDocument {
    type Sentence: AuxiliarySentence;

    fn first_sentence_containing(&self, range: &OffsetRange) -> Option<&Self::Sentence>;
}

/// Object-safe view of an auxiliary document: span in, head span out.
///
/// Implemented for every [`AuxiliaryDocument`]; implement it directly for
/// head sources that are not parse trees.
pub trait HeadSource: Send + Sync {
    fn head_for(&self, range: &OffsetRange) -> Option<OffsetRange>;
}

impl<A> HeadSource for A
where
    A: AuxiliaryDocument + Send + Sync,
{
    fn head_for(&self, range: &OffsetRange) -> Option<OffsetRange> {
        let sentence = self.first_sentence_containing(range)?;
        let node = sentence.node_for_offsets(range)?;
        node.terminal_head().map(|head| head.span())
    }
}

/// Resolves the auxiliary head of a document-relative span.
///
/// Every failure along the lookup (no sentence, no exactly-spanning node, no
/// head child) means "no head", never an error.
#[derive(Clone, Copy)]
pub struct AuxiliaryHeadResolver<'a> {
    source: &'a dyn HeadSource,
}

impl<'a> AuxiliaryHeadResolver<'a> {
    pub fn new<S: HeadSource>(source: &'a S) -> Self {
        Self { source }
    }

    pub fn from_dyn(source: &'a dyn HeadSource) -> Self {
        Self { source }
    }

    pub fn head_for(&self, range: &OffsetRange) -> Option<OffsetRange> {
        let head = self.source.head_for(range);
        if head.is_none() {
            log::debug!("no auxiliary head for {}", range);
        }
        head
    }
}

impl std::fmt::Debug for AuxiliaryHeadResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuxiliaryHeadResolver").finish()
    }
}

// ============================================================================
// In-memory parse trees
// ============================================================================

/// A head-annotated constituency tree over character offsets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseTree {
    pub label: String,
    pub span: OffsetRange,
    /// Index of the head child; `None` for leaves and unheaded nodes.
    #[serde(default)]
    pub head: Option<usize>,
    #[serde(default)]
    pub children: Vec<ParseTree>,
}

impl ParseTree {
    /// A terminal (token) node.
    pub fn leaf(label: impl Into<String>, span: OffsetRange) -> Self {
        Self {
            label: label.into(),
            span,
            head: None,
            children: Vec::new(),
        }
    }

    /// An internal node spanning its children, headed by `children[head]`.
    ///
    /// `children` are in text order. `None` if there are none, since the
    /// node would have no span.
    pub fn node(label: impl Into<String>, head: Option<usize>, children: Vec<ParseTree>) -> Option<Self> {
        let span = OffsetRange::new(children.first()?.span.start(), children.last()?.span.end());
        Some(Self {
            label: label.into(),
            span,
            head,
            children,
        })
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Deepest node whose span equals `range`.
    fn find_exact(&self, range: &OffsetRange) -> Option<&ParseTree> {
        if !self.span.encloses(range) {
            return None;
        }
        self.children
            .iter()
            .find_map(|child| child.find_exact(range))
            .or_else(|| if self.span == *range { Some(self) } else { None })
    }
}

impl ParseNode for ParseTree {
    fn span(&self) -> OffsetRange {
        self.span
    }

    fn terminal_head(&self) -> Option<&Self> {
        if self.is_leaf() {
            return Some(self);
        }
        self.children.get(self.head?)?.terminal_head()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParsedSentence {
    pub tree: ParseTree,
}

impl ParsedSentence {
    pub fn new(tree: ParseTree) -> Self {
        Self { tree }
    }

    pub fn span(&self) -> OffsetRange {
        self.tree.span
    }
}

impl AuxiliarySentence for ParsedSentence {
    type Node = ParseTree;

    fn node_for_offsets(&self, range: &OffsetRange) -> Option<&ParseTree> {
        self.tree.find_exact(range)
    }
}

/// An automatic parse of a whole document, sentence by sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParsedDocument {
    pub sentences: Vec<ParsedSentence>,
}

impl ParsedDocument {
    pub fn new(sentences: Vec<ParsedSentence>) -> Self {
        Self { sentences }
    }

    /// Read a parse written in RON.
    pub fn from_ron_str(s: &str) -> AlignResult<Self> {
        ron::from_str(s).map_err(|e| AlignError::Data {
            message: format!("auxiliary parse: {}", e),
        })
    }
}

impl AuxiliaryDocument for ParsedDocument {
    type Sentence = ParsedSentence;

    fn first_sentence_containing(&self, range: &OffsetRange) -> Option<&ParsedSentence> {
        self.sentences.iter().find(|s| s.span().encloses(range))
    }
}
