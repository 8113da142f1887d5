//! Highlight classification.
//!
//! Maps syntax nodes to a small set of display groups and collects the
//! classified ranges of one line.

use std::fmt;

use text_size::TextRange;

use bnf_syntax::{Ast, NodeRef};

/// Display class of a highlighted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HighlightGroup {
    /// `::=` and `|`.
    Operator,
    /// Quoted literals.
    String,
    /// Rule names.
    Identifier,
    /// Comments.
    Comment,
}

impl HighlightGroup {
    /// Every group, in declaration order.
    pub const ALL: [HighlightGroup; 4] = [
        HighlightGroup::Operator,
        HighlightGroup::String,
        HighlightGroup::Identifier,
        HighlightGroup::Comment,
    ];

    /// Default display name of the group.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HighlightGroup::Operator => "Operator",
            HighlightGroup::String => "String",
            HighlightGroup::Identifier => "Identifier",
            HighlightGroup::Comment => "Comment",
        }
    }
}

impl fmt::Display for HighlightGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified range on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Highlight {
    /// Zero-based line number.
    pub line: u32,
    /// Byte range within the line.
    pub range: TextRange,
    /// Display class.
    pub group: HighlightGroup,
}

/// The display class of a node, if it has one.
///
/// Operators are classified by their own token range only, so the operands
/// below them are highlighted separately. Statements and concatenation gaps
/// are not highlighted.
#[must_use]
pub fn classify(node: NodeRef<'_>) -> Option<HighlightGroup> {
    match node {
        NodeRef::Terminal(_) => Some(HighlightGroup::String),
        NodeRef::NonTerminal(_) => Some(HighlightGroup::Identifier),
        NodeRef::Comment(_) => Some(HighlightGroup::Comment),
        NodeRef::Assignment(_) | NodeRef::Alternative(_) => Some(HighlightGroup::Operator),
        NodeRef::Statement(_) | NodeRef::Compound(_) => None,
    }
}

/// Highlights of one parsed line, left to right.
///
/// Degraded ASTs are highlighted from their best-effort tokens.
#[must_use]
pub fn highlight_line(line: u32, ast: &Ast) -> Vec<Highlight> {
    let mut highlights = Vec::new();
    let _ = ast.traverse(|node| {
        if let Some(group) = classify(node) {
            highlights.push(Highlight {
                line,
                range: node.range(),
                group,
            });
        }
        Ok::<(), std::convert::Infallible>(())
    });
    highlights
}
