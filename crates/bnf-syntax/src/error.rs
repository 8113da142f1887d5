//! Parse errors.
//!
//! The strict parser reports failures as [`PositionedError`]. The dispatcher
//! wraps the error in a [`DescriptiveError`] before attaching it to a
//! degraded [`Ast`](crate::Ast), so callers can show a readable message next
//! to the best-effort tokens.

use std::fmt;

use text_size::TextSize;
use thiserror::Error;

/// What went wrong at the failing byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The byte under the cursor does not belong to any expected class.
    #[error("unexpected byte {0:#04x}")]
    UnexpectedByte(u8),

    /// The line ended while more input was required.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A quoted literal has no closing quote.
    #[error("unterminated literal")]
    UnterminatedLiteral,

    /// The parser itself faulted; the line is still tokenized.
    #[error("internal parser fault")]
    InternalFault,
}

/// The construct a production was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// `<name>`
    NonTerminal,
    /// A quoted literal.
    Terminal,
    /// A literal or a non-terminal.
    Atom,
    /// `::=`
    Assignment,
    /// Trailing spaces followed by the end of the line.
    LineEnd,
    /// Anything; used for internal faults.
    Line,
}

impl Expected {
    /// Human-readable name of the construct.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Expected::NonTerminal => "non-terminal",
            Expected::Terminal => "terminal",
            Expected::Atom => "terminal or non-terminal",
            Expected::Assignment => "assignment symbol",
            Expected::LineEnd => "end of line",
            Expected::Line => "well-formed line",
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// An [`ErrorKind`] pinned to the absolute byte offset in the line where it
/// occurred, together with the construct being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at position {}", to_u32(.offset))]
pub struct PositionedError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Offset of the offending byte (or of the line end).
    pub offset: TextSize,
    /// The construct that was required.
    pub expected: Expected,
}

fn to_u32(offset: &TextSize) -> u32 {
    u32::from(*offset)
}

impl PositionedError {
    pub(crate) fn new(kind: ErrorKind, offset: TextSize, expected: Expected) -> Self {
        Self {
            kind,
            offset,
            expected,
        }
    }

    /// Returns `true` when the error was caused by running out of input.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        self.kind == ErrorKind::UnexpectedEndOfInput
    }
}

/// A [`PositionedError`] phrased for display.
///
/// Never used for control flow: the parser only produces and consumes
/// [`PositionedError`]. Positions in the message are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptiveError {
    /// The underlying error.
    pub error: PositionedError,
}

impl fmt::Display for DescriptiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} expected at position {}",
            self.error.expected,
            u64::from(u32::from(self.error.offset)) + 1
        )
    }
}

impl std::error::Error for DescriptiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl DescriptiveError {
    /// The absolute byte offset of the failure.
    #[must_use]
    pub fn offset(&self) -> TextSize {
        self.error.offset
    }

    /// The failure kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.error.kind
    }
}

impl From<PositionedError> for DescriptiveError {
    fn from(error: PositionedError) -> Self {
        Self { error }
    }
}
