//! Scanners for the lexemes of BNF and the permissive tokenizer.
//!
//! The scanners in this module are shared by the strict parser and by
//! [`tokenize`]. Each scanner either consumes one complete lexeme and returns
//! it, or fails with a [`PositionedError`] and leaves the cursor wherever it
//! stopped; callers that want to retry restore the cursor themselves.

mod cursor;

pub use cursor::{
    is_angle_bracket, is_digit, is_eol, is_hyphen, is_letter, is_quote, is_rule_char,
    is_vertical_bar, is_whitespace, text_size, Cursor,
};

use crate::ast::{
    AlternativeExpression, AssignmentExpression, Comment, Expression, Node, NonTerminal, Terminal,
    Token,
};
use crate::error::{ErrorKind, Expected, PositionedError};

/// Spelling of the assignment symbol.
pub const ASSIGNMENT: &[u8] = b"::=";

/// Scans `'"' (byte-except-'"')* '"'` or the single-quoted equivalent.
///
/// A literal may contain the other quote character unescaped but never a
/// line terminator: `\n` or `\r` before the closing quote leaves the literal
/// unterminated. A missing closing quote is reported at the opening quote.
pub fn scan_literal(cursor: &mut Cursor<'_>) -> Result<Terminal, PositionedError> {
    let start = cursor.pos();
    let quote = cursor.expect_class(is_quote, Expected::Terminal)?;

    let body_start = cursor.pos();
    cursor.eat_while(|byte| byte != quote && !is_eol(byte));
    let body = cursor.slice_from(body_start);

    if cursor.peek() != Some(quote) {
        let mut at_quote = cursor.clone();
        at_quote.reset(start);
        return Err(at_quote.error(ErrorKind::UnterminatedLiteral, Expected::Terminal));
    }
    cursor.bump();

    Ok(Terminal(Token::from_bytes(body, cursor.range_from(start))))
}

/// Scans `'<' letter (letter | digit | '-')* '>'`.
pub fn scan_non_terminal(cursor: &mut Cursor<'_>) -> Result<NonTerminal, PositionedError> {
    let start = cursor.pos();
    cursor.expect_byte(b'<', Expected::NonTerminal)?;

    let name_start = cursor.pos();
    cursor.expect_class(is_letter, Expected::NonTerminal)?;
    cursor.eat_while(is_rule_char);
    let name = cursor.slice_from(name_start);

    cursor.expect_byte(b'>', Expected::NonTerminal)?;

    Ok(NonTerminal(Token::from_bytes(name, cursor.range_from(start))))
}

/// Scans `atom := literal | nonTerminal`, choosing by the first byte.
pub fn scan_atom(cursor: &mut Cursor<'_>) -> Result<Node, PositionedError> {
    match cursor.peek() {
        Some(byte) if is_quote(byte) => scan_literal(cursor).map(Node::Terminal),
        Some(b'<') => scan_non_terminal(cursor).map(Node::NonTerminal),
        Some(byte) => Err(cursor.error(ErrorKind::UnexpectedByte(byte), Expected::Atom)),
        None => Err(cursor.error(ErrorKind::UnexpectedEndOfInput, Expected::Atom)),
    }
}

/// Scans `';' (byte-except-EOL)*`.
pub fn scan_comment(cursor: &mut Cursor<'_>) -> Result<Comment, PositionedError> {
    let start = cursor.pos();
    cursor.expect_byte(b';', Expected::LineEnd)?;

    let body_start = cursor.pos();
    cursor.eat_while(|byte| !is_eol(byte));
    let body = cursor.slice_from(body_start);

    Ok(Comment(Token::from_bytes(body, cursor.range_from(start))))
}

/// Scans `::=`.
pub fn scan_assignment(cursor: &mut Cursor<'_>) -> Result<Token, PositionedError> {
    let start = cursor.pos();
    let rest = cursor.buf().get(start..).unwrap_or_default();
    if !rest.starts_with(ASSIGNMENT) {
        // A truncated `::` still needs more input rather than a different byte.
        let kind = match cursor.peek() {
            Some(byte) if !ASSIGNMENT.starts_with(rest) => ErrorKind::UnexpectedByte(byte),
            _ => ErrorKind::UnexpectedEndOfInput,
        };
        return Err(cursor.error(kind, Expected::Assignment));
    }
    cursor.bump_n(ASSIGNMENT.len());
    Ok(Token::from_bytes(ASSIGNMENT, cursor.range_from(start)))
}

/// Scans `|`.
pub fn scan_disjunction(cursor: &mut Cursor<'_>) -> Result<Token, PositionedError> {
    let start = cursor.pos();
    cursor.expect_class(is_vertical_bar, Expected::LineEnd)?;
    Ok(Token::from_bytes(b"|", cursor.range_from(start)))
}

/// Best-effort tokenization of one line. Never fails.
///
/// At each position the tokenizer tries, in order, `|`, `::=`, an atom and a
/// comment. When nothing matches it skips one byte and tries again. Operators
/// come back as expression nodes without children.
#[must_use]
pub fn tokenize(line: &[u8]) -> Vec<Node> {
    let mut cursor = Cursor::new(line);
    let mut tokens = Vec::new();

    while !cursor.at_end() {
        let checkpoint = cursor.pos();

        if let Ok(token) = scan_disjunction(&mut cursor) {
            tokens.push(Node::Alternative(AlternativeExpression(
                Expression::operator(token),
            )));
            continue;
        }
        cursor.reset(checkpoint);

        if let Ok(token) = scan_assignment(&mut cursor) {
            tokens.push(Node::Assignment(AssignmentExpression(Expression::operator(
                token,
            ))));
            continue;
        }
        cursor.reset(checkpoint);

        if let Ok(atom) = scan_atom(&mut cursor) {
            tokens.push(atom);
            continue;
        }
        cursor.reset(checkpoint);

        if let Ok(comment) = scan_comment(&mut cursor) {
            tokens.push(Node::Comment(comment));
            continue;
        }
        cursor.reset(checkpoint);

        cursor.bump();
    }

    tokens
}
