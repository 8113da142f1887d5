//! `bnf-syntax` - Lexer, parser, and typed syntax tree for single BNF lines.
//!
//! Each line of a grammar is parsed on its own:
//!
//! - **Lexer**: byte-level scanners for literals, rule names, operators and
//!   comments, plus a permissive [`tokenize`] that never fails
//! - **Parser**: a strict recursive-descent parser producing a [`Statement`]
//! - **AST**: a binary tree of typed nodes with absolute byte ranges
//!
//! [`parse`] combines the two: strict first, tokens plus a diagnostic when the
//! strict grammar rejects the line. It always returns an [`Ast`].
//!
//! # Example
//!
//! ```
//! use bnf_syntax::{parse, NodeKind};
//!
//! let ast = parse(r#"<digit> ::= "0" | "1""#);
//! assert!(ast.is_strict());
//! assert_eq!(ast.rule_count(), 1);
//!
//! let mut kinds = Vec::new();
//! let (count, result) = ast.traverse(|node| {
//!     kinds.push(node.kind());
//!     Ok::<_, ()>(())
//! });
//! assert!(result.is_ok());
//! assert_eq!(count, 6);
//! assert_eq!(kinds[0], NodeKind::NonTerminal);
//! assert_eq!(kinds[5], NodeKind::Statement);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{
    traverse, AlternativeExpression, AssignmentExpression, Ast, Comment, CompoundExpression,
    Expression, Node, NodeKind, NodeRef, NonTerminal, Statement, Terminal, Token,
};
pub use error::{DescriptiveError, ErrorKind, Expected, PositionedError};
pub use lexer::tokenize;
pub use parser::{parse, parse_statement};
