//! Recursive-descent parser for one BNF line.
//!
//! ```text
//! statement   := ws? rule? comment? lineEnd
//! rule        := nonTerminal ws? "::=" ws? expression
//! expression  := list (ws? "|" ws? expression)?
//! list        := atom (ws atom)*
//! ```
//!
//! Optional continuations are attempted from a saved cursor position; when
//! the attempt fails the cursor is restored and the part built so far is the
//! result. Required productions propagate their error immediately.

use crate::ast::{
    AlternativeExpression, AssignmentExpression, CompoundExpression, Expression, Node, Statement,
    Token,
};
use crate::error::{ErrorKind, Expected, PositionedError};
use crate::lexer::{
    is_eol, scan_assignment, scan_atom, scan_comment, scan_disjunction, scan_non_terminal, Cursor,
};

/// Parses one line with the strict grammar.
///
/// Fails on the first required construct that does not match; no partial
/// statement is returned.
pub fn parse_statement(line: &[u8]) -> Result<Statement, PositionedError> {
    Parser::new(line).statement()
}

/// The parser state: the line and a cursor into it.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(line: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(line),
        }
    }

    fn statement(mut self) -> Result<Statement, PositionedError> {
        self.cursor.skip_whitespace();

        let rule = if self.at(b'<') {
            Some(self.rule()?)
        } else {
            None
        };

        self.cursor.skip_whitespace();
        let comment = if self.at(b';') {
            Some(scan_comment(&mut self.cursor)?)
        } else {
            None
        };

        self.line_end()?;
        Ok(Statement { rule, comment })
    }

    fn rule(&mut self) -> Result<AssignmentExpression, PositionedError> {
        let name = scan_non_terminal(&mut self.cursor)?;
        self.cursor.skip_whitespace();
        let token = scan_assignment(&mut self.cursor)?;
        self.cursor.skip_whitespace();
        let rhs = self.expression()?;

        Ok(AssignmentExpression(Expression::binary(
            token,
            Node::NonTerminal(name),
            rhs,
        )))
    }

    /// `list (ws? "|" ws? expression)?`, unrolled into a loop so that long
    /// alternations do not deepen the call stack.
    fn expression(&mut self) -> Result<Node, PositionedError> {
        let head = self.list()?;
        let mut arms = Vec::new();

        loop {
            let checkpoint = self.cursor.pos();
            match self.alternative_arm() {
                Ok(arm) => arms.push(arm),
                Err(_) => {
                    self.cursor.reset(checkpoint);
                    break;
                }
            }
        }

        Ok(fold_right(head, arms, |token, left, right| {
            Node::Alternative(AlternativeExpression(Expression::binary(token, left, right)))
        }))
    }

    fn alternative_arm(&mut self) -> Result<(Token, Node), PositionedError> {
        self.cursor.skip_whitespace();
        let token = scan_disjunction(&mut self.cursor)?;
        self.cursor.skip_whitespace();
        let list = self.list()?;
        Ok((token, list))
    }

    fn list(&mut self) -> Result<Node, PositionedError> {
        let head = scan_atom(&mut self.cursor)?;
        let mut rest = Vec::new();

        loop {
            let checkpoint = self.cursor.pos();
            self.cursor.skip_whitespace();
            let gap = self.cursor.range_from(checkpoint);
            match scan_atom(&mut self.cursor) {
                Ok(atom) => rest.push((Token::new("", gap), atom)),
                Err(_) => {
                    self.cursor.reset(checkpoint);
                    break;
                }
            }
        }

        Ok(fold_right(head, rest, |token, left, right| {
            Node::Compound(CompoundExpression(Expression::binary(token, left, right)))
        }))
    }

    fn line_end(&mut self) -> Result<(), PositionedError> {
        self.cursor.skip_whitespace();
        self.cursor.eat_while(is_eol);
        match self.cursor.peek() {
            None => Ok(()),
            Some(byte) => Err(self
                .cursor
                .error(ErrorKind::UnexpectedByte(byte), Expected::LineEnd)),
        }
    }

    fn at(&self, byte: u8) -> bool {
        self.cursor.peek() == Some(byte)
    }
}

/// Threads `head, (op1, e1), (op2, e2), ...` into
/// `join(op1, head, join(op2, e1, e2))`: every operator becomes a binary node
/// whose right child is the rest of the chain, and the last element is
/// uplifted into the chain unwrapped.
fn fold_right(
    head: Node,
    mut rest: Vec<(Token, Node)>,
    join: impl Fn(Token, Node, Node) -> Node,
) -> Node {
    let Some((mut token, mut acc)) = rest.pop() else {
        return head;
    };
    while let Some((prev_token, prev)) = rest.pop() {
        acc = join(token, prev, acc);
        token = prev_token;
    }
    join(token, head, acc)
}
