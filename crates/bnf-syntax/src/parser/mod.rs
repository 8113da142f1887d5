//! Line parsing: the strict grammar with a permissive fallback.

#[allow(clippy::module_inception)]
mod parser;

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

pub use parser::parse_statement;

use crate::ast::{Ast, Node, Statement};
use crate::error::{DescriptiveError, ErrorKind, Expected, PositionedError};
use crate::lexer::tokenize;

/// Parses one line into an [`Ast`]. Never fails.
///
/// The strict parser runs first. If it rejects the line, the line is
/// tokenized instead and the rejection is kept as the AST's diagnostic. A
/// fault inside the parser is contained the same way.
pub fn parse(line: impl AsRef<[u8]>) -> Ast {
    let line = line.as_ref();
    contained(line, || parse_statement(line), || tokenize(line))
}

/// Runs `strict`, falling back to `tokens` on a rejection or a panic. A panic
/// in `tokens` leaves an empty token group.
fn contained(
    line: &[u8],
    strict: impl FnOnce() -> Result<Statement, PositionedError>,
    tokens: impl FnOnce() -> Vec<Node>,
) -> Ast {
    let error = match panic::catch_unwind(AssertUnwindSafe(strict)) {
        Ok(Ok(statement)) => {
            let statements = if statement.is_empty() {
                Vec::new()
            } else {
                vec![statement]
            };
            return Ast::Strict(statements);
        }
        Ok(Err(err)) => {
            debug!(%err, "strict parse failed, tokenizing line");
            err
        }
        Err(_) => {
            error!(len = line.len(), "parser faulted, tokenizing line");
            PositionedError::new(ErrorKind::InternalFault, 0.into(), Expected::Line)
        }
    };

    let tokens = panic::catch_unwind(AssertUnwindSafe(tokens)).unwrap_or_else(|_| {
        error!(len = line.len(), "tokenizer faulted, dropping tokens");
        Vec::new()
    });

    Ast::Degraded {
        lines: vec![tokens],
        diagnostic: DescriptiveError::from(error),
    }
}
