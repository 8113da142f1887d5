//! Typed syntax tree for one BNF line.
//!
//! Every node exposes exactly two navigable children through [`NodeRef`].
//! Variable-arity constructs (alternatives, concatenations) are encoded as
//! right-threaded chains of binary nodes: the last element of a chain is
//! stored directly as the right child instead of being wrapped, so a chain of
//! one element is just that element.
//!
//! All ranges are absolute byte offsets into the parsed line, never offsets
//! relative to a parent node.

use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;
use text_size::TextRange;

use crate::error::DescriptiveError;

/// Name and position shared by all nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Literal text, rule name, comment body or operator spelling.
    pub name: SmolStr,
    /// Absolute byte range in the line.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(name: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    pub(crate) fn from_bytes(bytes: &[u8], range: TextRange) -> Self {
        Self::new(String::from_utf8_lossy(bytes), range)
    }
}

macro_rules! leaf_node {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub Token);

        impl $name {
            /// The name of the node.
            #[must_use]
            pub fn name(&self) -> &str {
                &self.0.name
            }

            /// The absolute range of the node.
            #[must_use]
            pub fn range(&self) -> TextRange {
                self.0.range
            }
        }
    };
}

leaf_node! {
    /// A quoted literal. The name excludes the quotes, the range includes them.
    Terminal
}

leaf_node! {
    /// `<name>`. The name excludes the angle brackets, the range includes them.
    NonTerminal
}

leaf_node! {
    /// `; ...` up to the end of the line. The name is the text after `;`.
    Comment
}

/// Shape shared by the three expression kinds: an operator token plus two
/// children.
///
/// The strict parser always sets both children. Operator wrappers produced
/// by the permissive tokenizer carry only the token.
///
/// Right-threaded chains grow with the line, so every trait below walks the
/// right spine in a loop. `Debug` prints the spine as a flat list.
pub struct Expression {
    /// The connecting operator (`::=`, `|`, or the gap between two atoms).
    pub token: Token,
    /// Left child.
    pub left: Option<Box<Node>>,
    /// Right child.
    pub right: Option<Box<Node>>,
}

impl Expression {
    pub(crate) fn binary(token: Token, left: Node, right: Node) -> Self {
        Self {
            token,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub(crate) fn operator(token: Token) -> Self {
        Self {
            token,
            left: None,
            right: None,
        }
    }
}

/// Which wrapper holds an expression on the right spine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Link {
    Assignment,
    Alternative,
    Compound,
}

impl Link {
    fn of(node: &Node) -> Option<(Link, &Expression)> {
        match node {
            Node::Assignment(AssignmentExpression(expr)) => Some((Link::Assignment, expr)),
            Node::Alternative(AlternativeExpression(expr)) => Some((Link::Alternative, expr)),
            Node::Compound(CompoundExpression(expr)) => Some((Link::Compound, expr)),
            Node::Terminal(_) | Node::NonTerminal(_) | Node::Comment(_) => None,
        }
    }

    fn wrap(self, expr: Expression) -> Node {
        match self {
            Link::Assignment => Node::Assignment(AssignmentExpression(expr)),
            Link::Alternative => Node::Alternative(AlternativeExpression(expr)),
            Link::Compound => Node::Compound(CompoundExpression(expr)),
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut next = self.right.take();
        while let Some(mut node) = next {
            next = match &mut *node {
                Node::Assignment(AssignmentExpression(expr))
                | Node::Alternative(AlternativeExpression(expr))
                | Node::Compound(CompoundExpression(expr)) => expr.right.take(),
                Node::Terminal(_) | Node::NonTerminal(_) | Node::Comment(_) => None,
            };
        }
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        let mut spine = Vec::new();
        let mut tail = None;
        let mut next = self.right.as_deref();
        while let Some(node) = next {
            next = match Link::of(node) {
                Some((link, expr)) => {
                    spine.push((link, expr));
                    expr.right.as_deref()
                }
                None => {
                    tail = Some(Box::new(node.clone()));
                    None
                }
            };
        }

        let mut right = tail;
        while let Some((link, expr)) = spine.pop() {
            right = Some(Box::new(link.wrap(Expression {
                token: expr.token.clone(),
                left: expr.left.clone(),
                right,
            })));
        }
        Expression {
            token: self.token.clone(),
            left: self.left.clone(),
            right,
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let (mut lhs, mut rhs) = (self, other);
        loop {
            if lhs.token != rhs.token || lhs.left != rhs.left {
                return false;
            }
            match (lhs.right.as_deref(), rhs.right.as_deref()) {
                (None, None) => return true,
                (Some(a), Some(b)) => match (Link::of(a), Link::of(b)) {
                    (Some((link_a, next_a)), Some((link_b, next_b))) if link_a == link_b => {
                        lhs = next_a;
                        rhs = next_b;
                    }
                    (None, None) => return a == b,
                    _ => return false,
                },
                _ => return false,
            }
        }
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut expr = self;
        loop {
            expr.token.hash(state);
            expr.left.hash(state);
            match expr.right.as_deref() {
                None => {
                    0u8.hash(state);
                    return;
                }
                Some(node) => match Link::of(node) {
                    Some((link, next)) => {
                        1u8.hash(state);
                        link.hash(state);
                        expr = next;
                    }
                    None => {
                        2u8.hash(state);
                        node.hash(state);
                        return;
                    }
                },
            }
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Debug)]
        struct Element<'a> {
            link: Option<Link>,
            token: &'a Token,
            left: Option<&'a Node>,
        }

        let mut list = f.debug_list();
        let mut link = None;
        let mut expr = self;
        loop {
            list.entry(&Element {
                link,
                token: &expr.token,
                left: expr.left.as_deref(),
            });
            match expr.right.as_deref() {
                None => break,
                Some(node) => match Link::of(node) {
                    Some((next_link, next)) => {
                        link = Some(next_link);
                        expr = next;
                    }
                    None => {
                        list.entry(node);
                        break;
                    }
                },
            }
        }
        list.finish()
    }
}

/// `<name> ::= rhs`. Left is always a [`NonTerminal`]; right is an
/// alternative, compound, non-terminal or terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssignmentExpression(pub Expression);

/// One arm of `a | b | ...`. Right chains to the next alternative or ends in
/// the last arm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlternativeExpression(pub Expression);

/// One element of `a b ...`. Right chains to the next element or ends in the
/// last atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundExpression(pub Expression);

/// Any node below a [`Statement`].
// Variants mirror the leaf and expression types above.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    Comment(Comment),
    Assignment(AssignmentExpression),
    Alternative(AlternativeExpression),
    Compound(CompoundExpression),
}

impl Node {
    /// Borrowed uniform view of the node.
    #[must_use]
    pub fn view(&self) -> NodeRef<'_> {
        match self {
            Node::Terminal(node) => NodeRef::Terminal(node),
            Node::NonTerminal(node) => NodeRef::NonTerminal(node),
            Node::Comment(node) => NodeRef::Comment(node),
            Node::Assignment(node) => NodeRef::Assignment(node),
            Node::Alternative(node) => NodeRef::Alternative(node),
            Node::Compound(node) => NodeRef::Compound(node),
        }
    }

    /// See [`NodeRef::kind`].
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.view().kind()
    }

    /// See [`NodeRef::range`].
    #[must_use]
    pub fn range(&self) -> TextRange {
        self.view().range()
    }
}

/// Root of one parsed line: an optional rule and an optional trailing comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Statement {
    /// The production rule, absent on comment-only lines.
    pub rule: Option<AssignmentExpression>,
    /// The trailing comment.
    pub comment: Option<Comment>,
}

impl Statement {
    /// `true` for a line with neither a rule nor a comment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rule.is_none() && self.comment.is_none()
    }

    /// The rule name and every non-terminal referenced by the rule, in
    /// traversal order.
    #[must_use]
    pub fn non_terminals(&self) -> Vec<&NonTerminal> {
        let mut names = Vec::new();
        let _ = traverse(NodeRef::Statement(self), |node| {
            if let NodeRef::NonTerminal(nt) = node {
                names.push(nt);
            }
            Ok::<(), std::convert::Infallible>(())
        });
        names
    }
}

/// Type tag of a node.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Terminal,
    NonTerminal,
    Comment,
    Statement,
    Assignment,
    Alternative,
    Compound,
}

/// Borrowed view over every node kind, including [`Statement`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Terminal(&'a Terminal),
    NonTerminal(&'a NonTerminal),
    Comment(&'a Comment),
    Statement(&'a Statement),
    Assignment(&'a AssignmentExpression),
    Alternative(&'a AlternativeExpression),
    Compound(&'a CompoundExpression),
}

impl<'a> NodeRef<'a> {
    /// Left child, `None` when absent.
    #[must_use]
    pub fn left(self) -> Option<NodeRef<'a>> {
        match self {
            NodeRef::Terminal(_) | NodeRef::NonTerminal(_) | NodeRef::Comment(_) => None,
            NodeRef::Statement(stmt) => stmt.rule.as_ref().map(NodeRef::Assignment),
            NodeRef::Assignment(AssignmentExpression(expr))
            | NodeRef::Alternative(AlternativeExpression(expr))
            | NodeRef::Compound(CompoundExpression(expr)) => {
                expr.left.as_deref().map(Node::view)
            }
        }
    }

    /// Right child, `None` when absent.
    #[must_use]
    pub fn right(self) -> Option<NodeRef<'a>> {
        match self {
            NodeRef::Terminal(_) | NodeRef::NonTerminal(_) | NodeRef::Comment(_) => None,
            NodeRef::Statement(stmt) => stmt.comment.as_ref().map(NodeRef::Comment),
            NodeRef::Assignment(AssignmentExpression(expr))
            | NodeRef::Alternative(AlternativeExpression(expr))
            | NodeRef::Compound(CompoundExpression(expr)) => {
                expr.right.as_deref().map(Node::view)
            }
        }
    }

    /// Type tag.
    #[must_use]
    pub fn kind(self) -> NodeKind {
        match self {
            NodeRef::Terminal(_) => NodeKind::Terminal,
            NodeRef::NonTerminal(_) => NodeKind::NonTerminal,
            NodeRef::Comment(_) => NodeKind::Comment,
            NodeRef::Statement(_) => NodeKind::Statement,
            NodeRef::Assignment(_) => NodeKind::Assignment,
            NodeRef::Alternative(_) => NodeKind::Alternative,
            NodeRef::Compound(_) => NodeKind::Compound,
        }
    }

    /// The node's own token. Statements have none.
    #[must_use]
    pub fn token(self) -> Option<&'a Token> {
        match self {
            NodeRef::Terminal(Terminal(token))
            | NodeRef::NonTerminal(NonTerminal(token))
            | NodeRef::Comment(Comment(token)) => Some(token),
            NodeRef::Statement(_) => None,
            NodeRef::Assignment(AssignmentExpression(expr))
            | NodeRef::Alternative(AlternativeExpression(expr))
            | NodeRef::Compound(CompoundExpression(expr)) => Some(&expr.token),
        }
    }

    /// Absolute range of the node's own token. For a statement, the span of
    /// its rule and comment.
    #[must_use]
    pub fn range(self) -> TextRange {
        if let Some(token) = self.token() {
            return token.range;
        }
        let spans = [self.left(), self.right()]
            .into_iter()
            .flatten()
            .map(NodeRef::span);
        spans
            .reduce(TextRange::cover)
            .unwrap_or_else(|| TextRange::empty(0.into()))
    }

    /// The range covered by the whole subtree.
    #[must_use]
    pub fn span(self) -> TextRange {
        let mut cover: Option<TextRange> = None;
        let _ = traverse(self, |node| {
            if let Some(token) = node.token().filter(|token| !token.range.is_empty()) {
                cover = Some(cover.map_or(token.range, |acc| acc.cover(token.range)));
            }
            Ok::<(), std::convert::Infallible>(())
        });
        cover
            .or_else(|| self.token().map(|token| token.range))
            .unwrap_or_else(|| TextRange::empty(0.into()))
    }
}

/// Iterative in-order walk over the binary tree rooted at `root`.
///
/// Returns the number of successful `visit` calls and the first error, if
/// any. The walk stops at the first error.
pub fn traverse<'a, E>(
    root: NodeRef<'a>,
    mut visit: impl FnMut(NodeRef<'a>) -> Result<(), E>,
) -> (usize, Result<(), E>) {
    let mut stack = vec![Some(root)];
    let mut visited = 0;

    while let Some(top) = stack.last().copied() {
        if let Some(node) = top {
            stack.push(node.left());
            continue;
        }

        stack.pop();
        let Some(parent) = stack.last_mut() else {
            break;
        };
        // Only non-nil entries sit below a nil one.
        let Some(node) = *parent else {
            break;
        };
        *parent = node.right();

        if let Err(err) = visit(node) {
            return (visited, Err(err));
        }
        visited += 1;
    }

    (visited, Ok(()))
}

/// Result of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// The strict parser accepted the line. Blank lines hold no statements.
    Strict(Vec<Statement>),
    /// The strict parser failed; the line was tokenized instead.
    Degraded {
        /// Token groups, one per line.
        lines: Vec<Vec<Node>>,
        /// Why strict parsing failed.
        diagnostic: DescriptiveError,
    },
}

impl Ast {
    /// Number of statements (strict) or token groups (degraded).
    #[must_use]
    pub fn rule_count(&self) -> usize {
        match self {
            Ast::Strict(statements) => statements.len(),
            Ast::Degraded { lines, .. } => lines.len(),
        }
    }

    /// The strict-parse failure, present only in degraded mode.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&DescriptiveError> {
        match self {
            Ast::Strict(_) => None,
            Ast::Degraded { diagnostic, .. } => Some(diagnostic),
        }
    }

    /// `true` when the line was parsed by the strict parser.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        matches!(self, Ast::Strict(_))
    }

    /// The statements of a strict AST; empty when degraded.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        match self {
            Ast::Strict(statements) => statements,
            Ast::Degraded { .. } => &[],
        }
    }

    /// Walks every statement (strict) or every token (degraded) in order.
    ///
    /// An AST without statements yields `(0, Ok(()))` without calling
    /// `visit`.
    pub fn traverse<'a, E>(
        &'a self,
        mut visit: impl FnMut(NodeRef<'a>) -> Result<(), E>,
    ) -> (usize, Result<(), E>) {
        let roots: Box<dyn Iterator<Item = NodeRef<'a>> + 'a> = match self {
            Ast::Strict(statements) => Box::new(statements.iter().map(NodeRef::Statement)),
            Ast::Degraded { lines, .. } => Box::new(lines.iter().flatten().map(Node::view)),
        };

        let mut total = 0;
        for root in roots {
            let (visited, result) = traverse(root, &mut visit);
            total += visited;
            if result.is_err() {
                return (total, result);
            }
        }
        (total, Ok(()))
    }
}

impl std::fmt::Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<AST rules={};>", self.rule_count())
    }
}
